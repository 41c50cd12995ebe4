//! VetDesk Core Library
//!
//! Business workflows of the clinic admin, independent of any front end:
//! - Paginated, searchable resource lists with delete-then-refresh
//! - Debounced search submission
//! - Tutor + address + pet registration with CEP prefill
//!
//! Backend access goes through the seams in `vetdesk-api`
//! ([`ListSource`](vetdesk_api::ListSource), [`AddressLookup`](vetdesk_api::AddressLookup),
//! [`TutorRegistrar`](vetdesk_api::TutorRegistrar)); user feedback goes
//! through a [`Notifier`].

pub mod error;
pub mod notify;
pub mod pagination;
pub mod services;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use pagination::{PageControls, page_window};
pub use services::{
    DebouncedSearch, ListSnapshot, LoadOutcome, PaginatedResourceList, ServiceContext,
    TutorRegistration,
};
