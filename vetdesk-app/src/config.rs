//! `config.toml` loading

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vetdesk_api::{
    ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_CEP_BASE_URL, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_SECS,
};

use crate::error::{AppError, AppResult};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "VETDESK_API_URL";

const APP_DIR: &str = "vetdesk";
const CONFIG_FILE: &str = "config.toml";

/// Upper bound for `list.page_size`.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CepSection {
    pub base_url: String,
}

impl Default for CepSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CEP_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSection {
    pub page_size: u32,
    pub search_debounce_ms: u64,
}

impl Default for ListSection {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: 500,
        }
    }
}

/// Credentials used to open a session at startup.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SessionSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSection")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSection,
    pub cep: CepSection,
    pub list: ListSection,
    pub session: Option<SessionSection>,
}

impl AppConfig {
    /// `<config dir>/vetdesk/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. A missing file yields the defaults. `VETDESK_API_URL` is
    /// applied last.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::debug!("No config directory on this platform, using defaults");
                Self::default()
            }
        };
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        log::info!("Loading config from {}", path.display());
        Self::parse(&text).map_err(|e| match e {
            AppError::Parse { detail, .. } => AppError::Parse {
                path: Some(path.to_path_buf()),
                detail,
            },
            other => other,
        })
    }

    /// Parse TOML text. Sections and keys left out take their defaults.
    pub fn parse(text: &str) -> AppResult<Self> {
        toml::from_str(text).map_err(|e| AppError::Parse {
            path: None,
            detail: e.to_string(),
        })
    }

    /// Replace `api.base_url` with a non-blank `value`.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            log::debug!("{API_URL_ENV} overrides api.base_url with {url}");
            self.api.base_url = url;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let invalid = |field: &str, detail: &str| AppError::InvalidConfig {
            field: field.to_string(),
            detail: detail.to_string(),
        };

        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be at least 1"));
        }
        if self.cep.base_url.trim().is_empty() {
            return Err(invalid("cep.base_url", "must not be empty"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.list.page_size) {
            return Err(invalid("list.page_size", "must be between 1 and 100"));
        }
        if let Some(session) = &self.session
            && session.email.trim().is_empty()
        {
            return Err(invalid("session.email", "must not be empty"));
        }
        Ok(())
    }

    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            ..ApiClientConfig::with_base_url(self.api.base_url.trim())
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.list.search_debounce_ms)
    }
}
