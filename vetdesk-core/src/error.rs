//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use vetdesk_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A form field failed validation; `message` is shown to the user as is.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The operation is not allowed in the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Backend error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    pub(crate) fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether it is expected behavior (user input, missing record, expired
    /// session), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::InvalidState(_) => true,
            Self::Api(e) => e.is_expected(),
        }
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidState(detail) => detail.clone(),
            Self::Api(e) => e.user_message(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
