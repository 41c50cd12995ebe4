//! Platform-agnostic application bootstrap for the VetDesk admin.
//!
//! Provides `AppConfig` (TOML config), `init_logging`, `AppState` (service
//! container) and `AppStateBuilder` (notifier injection).

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;

use std::sync::Arc;

use vetdesk_api::{ApiClient, AuthService, CepClient, TutorEndpoint};
use vetdesk_core::notify::{LogNotifier, Notifier};
use vetdesk_core::services::ServiceContext;

/// Platform-agnostic application state.
///
/// Every front end constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    pub config: AppConfig,
    /// Shared backend client (owns the session cookie)
    pub api: Arc<ApiClient>,
    pub cep: Arc<CepClient>,
    pub auth: AuthService,
    /// Service context (lists, search, registration)
    pub ctx: Arc<ServiceContext>,
}

impl AppState {
    /// Open a session when credentials are configured.
    ///
    /// Returns whether a login was attempted and succeeded.
    pub async fn run_startup(&self) -> AppResult<bool> {
        let Some(session) = &self.config.session else {
            log::debug!("No session credentials configured, skipping login");
            return Ok(false);
        };
        match self.auth.login(&session.email, &session.password).await {
            Ok(()) => Ok(true),
            Err(e) => {
                log::error!("Login as {} failed: {e}", session.email);
                Err(e.into())
            }
        }
    }
}

/// Builder for constructing `AppState`.
///
/// # Optional
/// - `config`: defaults to `AppConfig::default()`
/// - `notifier`: defaults to `LogNotifier`
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<AppConfig>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `AppError::InvalidConfig` when the config does not validate,
    /// `AppError::Api` when an HTTP client cannot be created.
    pub fn build(self) -> AppResult<AppState> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));

        let api = Arc::new(ApiClient::new(config.api_client_config())?);
        let cep = Arc::new(CepClient::new(config.cep.base_url.trim())?);
        let registrar = Arc::new(TutorEndpoint::new(Arc::clone(&api)));

        let ctx = Arc::new(
            ServiceContext::new(Arc::clone(&api), cep.clone(), registrar, notifier)
                .with_page_size(config.list.page_size)
                .with_search_debounce(config.search_debounce()),
        );
        log::info!("Backend at {}", api.base_url());

        Ok(AppState {
            auth: AuthService::new(Arc::clone(&api)),
            config,
            api,
            cep,
            ctx,
        })
    }
}
