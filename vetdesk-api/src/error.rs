use serde::{Deserialize, Serialize};

/// Fallback shown to users when the request never reached the server.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão com o servidor";
/// Fallback shown to users when the server failed without a message.
pub const SERVER_ERROR_MESSAGE: &str = "Erro no servidor";
/// Fallback shown to users for anything else.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Erro inesperado";

/// Unified error type for every call made against the backend.
///
/// Each variant carries the `endpoint` (path relative to the base URL) that
/// produced it, plus variant-specific context. Server-supplied messages are
/// kept verbatim in `raw_message` so they can be shown to the user.
///
/// Nothing in this crate retries automatically: every failure is surfaced
/// once and the caller decides what to do with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    Network {
        /// Endpoint that was being called.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    Timeout {
        /// Endpoint that was being called.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// HTTP 401: the session cookie is missing or expired.
    Unauthorized {
        /// Endpoint that was being called.
        endpoint: String,
        /// Message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// HTTP 403: the session lacks permission for this panel or action.
    Forbidden {
        /// Endpoint that was being called.
        endpoint: String,
        /// Message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// HTTP 404: the record or route does not exist.
    NotFound {
        /// Endpoint that was being called.
        endpoint: String,
        /// Message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// HTTP 400 / 409 / 422: the server refused the request payload.
    Rejected {
        /// Endpoint that was being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// Any other non-2xx answer.
    Server {
        /// Endpoint that was being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// The response body did not match the schema expected for the endpoint.
    Parse {
        /// Endpoint that was being called.
        endpoint: String,
        /// Details about the mismatch.
        detail: String,
    },

    /// A request body could not be serialized.
    Serialization {
        /// Endpoint that was being called.
        endpoint: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// A caller-supplied argument was rejected before any request was made.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (user input, missing record, expired
    /// session), used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
                | Self::Rejected { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the request never produced an HTTP answer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Message returned by the server, when it supplied one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { raw_message, .. }
            | Self::Forbidden { raw_message, .. }
            | Self::NotFound { raw_message, .. }
            | Self::Rejected { raw_message, .. }
            | Self::Server { raw_message, .. } => raw_message.as_deref(),
            _ => None,
        }
    }

    /// Text suitable for a user-facing notification.
    ///
    /// Prefers the server-supplied message; otherwise falls back to a generic
    /// string for the error class.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Some(msg) = self.server_message().filter(|m| !m.trim().is_empty()) {
            return msg.to_string();
        }
        match self {
            Self::Network { .. } | Self::Timeout { .. } => CONNECTION_ERROR_MESSAGE.to_string(),
            Self::Unauthorized { .. }
            | Self::Forbidden { .. }
            | Self::NotFound { .. }
            | Self::Rejected { .. }
            | Self::Server { .. } => SERVER_ERROR_MESSAGE.to_string(),
            Self::InvalidParameter { detail, .. } => detail.clone(),
            Self::Parse { .. } | Self::Serialization { .. } => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Maps a non-2xx status to the matching variant.
    pub(crate) fn from_status(endpoint: &str, status: u16, raw_message: Option<String>) -> Self {
        let endpoint = endpoint.to_string();
        match status {
            401 => Self::Unauthorized {
                endpoint,
                raw_message,
            },
            403 => Self::Forbidden {
                endpoint,
                raw_message,
            },
            404 => Self::NotFound {
                endpoint,
                raw_message,
            },
            400 | 409 | 422 => Self::Rejected {
                endpoint,
                status,
                raw_message,
            },
            _ => Self::Server {
                endpoint,
                status,
                raw_message,
            },
        }
    }
}

fn write_with_message(
    f: &mut std::fmt::Formatter<'_>,
    prefix: std::fmt::Arguments<'_>,
    raw_message: Option<&String>,
) -> std::fmt::Result {
    match raw_message {
        Some(msg) => write!(f, "{prefix}: {msg}"),
        None => write!(f, "{prefix}"),
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { endpoint, detail } => {
                write!(f, "[{endpoint}] Network error: {detail}")
            }
            Self::Timeout { endpoint, detail } => {
                write!(f, "[{endpoint}] Request timeout: {detail}")
            }
            Self::Unauthorized {
                endpoint,
                raw_message,
            } => write_with_message(
                f,
                format_args!("[{endpoint}] Unauthorized"),
                raw_message.as_ref(),
            ),
            Self::Forbidden {
                endpoint,
                raw_message,
            } => write_with_message(
                f,
                format_args!("[{endpoint}] Forbidden"),
                raw_message.as_ref(),
            ),
            Self::NotFound {
                endpoint,
                raw_message,
            } => write_with_message(
                f,
                format_args!("[{endpoint}] Not found"),
                raw_message.as_ref(),
            ),
            Self::Rejected {
                endpoint,
                status,
                raw_message,
            } => write_with_message(
                f,
                format_args!("[{endpoint}] Rejected (HTTP {status})"),
                raw_message.as_ref(),
            ),
            Self::Server {
                endpoint,
                status,
                raw_message,
            } => write_with_message(
                f,
                format_args!("[{endpoint}] Server error (HTTP {status})"),
                raw_message.as_ref(),
            ),
            Self::Parse { endpoint, detail } => {
                write!(f, "[{endpoint}] Parse error: {detail}")
            }
            Self::Serialization { endpoint, detail } => {
                write!(f, "[{endpoint}] Serialization error: {detail}")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
