//! # vetdesk-api
//!
//! Typed client for the VetDesk clinic backend: appointments, groomings,
//! staff, products, services, pets, tutors and payments, plus session
//! handling and CEP (postal code) lookup.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vetdesk_api::{
//!     ApiClient, ApiClientConfig, Appointment, AuthService, ListQuery, ListSource,
//!     ResourceEndpoint,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. One client per backend; it owns the session cookie
//!     let client = Arc::new(ApiClient::new(ApiClientConfig::default())?);
//!
//!     // 2. Open a session
//!     AuthService::new(client.clone())
//!         .login("admin@clinic.com", "secret")
//!         .await?;
//!
//!     // 3. Page through appointments
//!     let appointments = ResourceEndpoint::<Appointment>::new(client);
//!     let page = appointments
//!         .fetch_page(&ListQuery::new(1, 10, Some("rex")))
//!         .await?;
//!     for a in &page.items {
//!         println!("{} {}", a.id, a.status_label());
//!     }
//!     println!("{} in total", page.total_count);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, ApiError>`](ApiError). Nothing is retried:
//!
//! - [`ApiError::Network`] / [`ApiError::Timeout`]: the server was not reached
//! - [`ApiError::Unauthorized`]: no session, or it expired
//! - [`ApiError::Rejected`]: the server refused the payload (400/409/422)
//! - [`ApiError::Parse`]: the body did not match the endpoint's schema
//!
//! [`ApiError::user_message`] gives the text to show to a person.

mod auth;
mod cep;
mod error;
mod http_client;
pub mod labels;
mod registration;
mod resources;
mod traits;
mod types;
mod utils;

pub use auth::{AuthService, PanelSummary, SessionUser};
pub use cep::{CEP_LEN, CepAddress, CepClient, DEFAULT_CEP_BASE_URL, format_cep, normalize_cep, strip_cep};
pub use error::{
    ApiError, CONNECTION_ERROR_MESSAGE, Result, SERVER_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
pub use http_client::{
    ApiClient, ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS,
};
pub use registration::{Gender, TUTOR_WITH_PET_PATH, TutorEndpoint, TutorWithPetRequest};
pub use resources::{
    AddTutorRequest, Annotated, Appointment, ClinicService, CreateAppointmentRequest,
    CreateProductRequest, Employee, Grooming, ItemKind, ItemRequest, NoteRequest, Payment,
    PaymentOrderSummary, Pet, PetSummary, Product, Resource, ResourceEndpoint, ServiceRequest,
    Tutor, UpdateEmployeeRequest, VetSummary, item_path,
};
pub use traits::{AddressLookup, ListSource, TutorRegistrar};
pub use types::{DEFAULT_PAGE_SIZE, ListQuery, ListResult, normalize_search, total_pages};

pub use labels::Code;
pub use utils::datetime;
pub use utils::number::format_brl;
