//! Bootstrap errors

use std::path::PathBuf;

use thiserror::Error;
use vetdesk_api::ApiError;
use vetdesk_core::CoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config{}: {detail}", location(.path.as_deref()))]
    Parse {
        path: Option<PathBuf>,
        detail: String,
    },

    #[error("Invalid config value {field}: {detail}")]
    InvalidConfig { field: String, detail: String },

    #[error("Logging already initialised: {0}")]
    Logging(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

fn location(path: Option<&std::path::Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

pub type AppResult<T> = std::result::Result<T, AppError>;
