//! Workflow services

mod debounce;
mod list;
mod registration;

pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, DebouncedSearch, SearchDebouncer};
pub use list::{EMPTY_LIST_MESSAGE, ListSnapshot, LoadOutcome, PaginatedResourceList};
pub use registration::{
    ADDRESS_FILLED_MESSAGE, AddressField, AddressForm, CEP_LOOKUP_FAILED_MESSAGE,
    CEP_NOT_FOUND_MESSAGE, CepOutcome, DEFAULT_COUNTRY, PetDetails, PetForm, REGISTERED_MESSAGE,
    REGISTRATION_FAILED_MESSAGE, RegistrationForm, RegistrationStep, TutorForm,
    TutorRegistration, UF_CODES, build_request, validate_address, validate_pet, validate_tutor,
};

use std::sync::Arc;
use std::time::Duration;

use vetdesk_api::{AddressLookup, ApiClient, Resource, ResourceEndpoint, TutorRegistrar};

use crate::notify::Notifier;

/// Service context - holds every dependency
///
/// The platform layer builds it once and hands out workflows from it.
pub struct ServiceContext {
    /// Shared backend client (owns the session cookie)
    pub api: Arc<ApiClient>,
    pub address_lookup: Arc<dyn AddressLookup>,
    pub registrar: Arc<dyn TutorRegistrar>,
    pub notifier: Arc<dyn Notifier>,
    pub page_size: u32,
    pub search_debounce: Duration,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        api: Arc<ApiClient>,
        address_lookup: Arc<dyn AddressLookup>,
        registrar: Arc<dyn TutorRegistrar>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            address_lookup,
            registrar,
            notifier,
            page_size: vetdesk_api::DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// HTTP endpoint for one resource.
    pub fn endpoint<R: Resource>(&self) -> ResourceEndpoint<R> {
        ResourceEndpoint::new(Arc::clone(&self.api))
    }

    /// A fresh list view for `R`, not yet loaded.
    pub fn list<R: Resource>(&self) -> Arc<PaginatedResourceList<R>> {
        Arc::new(PaginatedResourceList::new(
            Arc::new(self.endpoint::<R>()),
            Arc::clone(&self.notifier),
            self.page_size,
        ))
    }

    /// A list view whose search box submits after the configured quiet period.
    pub fn debounced_search<R: Resource>(&self) -> DebouncedSearch<R> {
        DebouncedSearch::new(self.list::<R>(), self.search_debounce)
    }

    /// An empty registration form.
    pub fn registration(&self) -> TutorRegistration {
        TutorRegistration::new(
            Arc::clone(&self.address_lookup),
            Arc::clone(&self.registrar),
            Arc::clone(&self.notifier),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use crate::test_utils::{MockAddressLookup, MockRegistrar};
    use vetdesk_api::{Appointment, ApiClientConfig};

    fn context() -> ServiceContext {
        let api = Arc::new(ApiClient::new(ApiClientConfig::default()).unwrap());
        ServiceContext::new(
            api,
            Arc::new(MockAddressLookup::found()),
            Arc::new(MockRegistrar::new()),
            Arc::new(LogNotifier),
        )
    }

    #[test]
    fn lists_start_on_page_one_with_configured_size() {
        let ctx = context().with_page_size(25);
        let list = ctx.list::<Appointment>();
        let s = list.snapshot();
        assert_eq!(s.current_page, 1);
        assert_eq!(s.page_size, 25);
        assert!(s.items.is_empty());
        assert!(!s.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_search_holds_for_configured_delay() {
        let ctx = context().with_search_debounce(Duration::from_millis(200));
        let search = ctx.debounced_search::<Appointment>();

        search.input("rex");
        assert_eq!(search.list().snapshot().search_term, "rex");
        assert!(search.is_pending());

        tokio::time::advance(Duration::from_millis(199)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(search.is_pending());
        assert!(search.list().snapshot().applied_search.is_none());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(context().with_page_size(0).page_size, 1);
    }

    #[test]
    fn registration_starts_at_tutor_step() {
        let flow = context().registration();
        assert_eq!(flow.step(), RegistrationStep::Tutor);
        assert_eq!(flow.form().address.country, DEFAULT_COUNTRY);
    }
}
