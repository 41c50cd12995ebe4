//! Shared HTTP client for the clinic backend
//!
//! Every page of the admin talks to one backend through one [`ApiClient`].
//! The client owns the cookie jar (the session lives there after
//! `auth/login`), unwraps the `{ statusCode, success, message, data }`
//! envelope and maps non-2xx answers onto [`ApiError`].
//!
//! # design principles
//! - **One request flow** - send, log, read the body, classify the status
//! - **Typed at the edge** - callers pick the type `data` is decoded into
//! - **No retries** - a failure is reported once and the caller decides

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::types::{Envelope, ErrorBody, MessageField};
use crate::utils::log_sanitizer::{body_for_log, truncate_for_log};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Default request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Endpoints whose 401 just means "no session yet".
const QUIET_UNAUTHORIZED: [&str; 2] = ["auth/me", "auth/verify"];

/// Construction parameters for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: concat!("vetdesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Default config pointed at another backend.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Session-carrying client for the clinic backend.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` is itself pooled.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build the client. Fails only when the TLS backend cannot initialise.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::InvalidParameter {
                param: "base_url".to_string(),
                detail: "must not be empty".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .user_agent(config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidParameter {
                param: "http_client".to_string(),
                detail: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path?query` and decode `data`.
    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)).query(query);
        let text = self.execute(request, &Method::GET, path).await?;
        Self::decode_data(&text, path)
    }

    /// `POST path` with a JSON body and decode `data`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT path` with a JSON body and decode `data`.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PATCH path` with a JSON body and decode `data`.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `GET path` and decode the whole body, for endpoints that answer
    /// without the `data` envelope.
    pub async fn get_bare<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path));
        let text = self.execute(request, &Method::GET, path).await?;
        Self::decode_bare(&text, path)
    }

    /// `POST path` with a JSON body and decode the whole body.
    pub async fn post_bare<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.json_request(Method::POST, path, body)?;
        let text = self.execute(request, &Method::POST, path).await?;
        Self::decode_bare(&text, path)
    }

    /// `DELETE path`. The response body is not inspected.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.client.delete(self.url(path));
        self.execute(request, &Method::DELETE, path).await?;
        Ok(())
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.json_request(method.clone(), path, body)?;
        let text = self.execute(request, &method, path).await?;
        Self::decode_data(&text, path)
    }

    fn json_request<B>(&self, method: Method, path: &str, body: &B) -> Result<RequestBuilder>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(body).map_err(|e| ApiError::Serialization {
            endpoint: path.to_string(),
            detail: e.to_string(),
        })?;
        log::debug!("[api] {method} {path} body: {}", body_for_log(&payload));
        Ok(self.client.request(method, self.url(path)).json(&payload))
    }

    /// Send the request, read the body and classify the status.
    ///
    /// Returns the body text of a 2xx answer.
    async fn execute(&self, request: RequestBuilder, method: &Method, path: &str) -> Result<String> {
        log::debug!("[api] {method} {}", self.url(path));

        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ApiError::Timeout {
                    endpoint: path.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::Network {
                    endpoint: path.to_string(),
                    detail: e.to_string(),
                }
            };
            log::error!("[api] {method} {path} failed: {err}");
            err
        })?;

        let status = response.status();
        log::debug!("[api] {method} {path} -> {}", status.as_u16());

        let text = response.text().await.map_err(|e| ApiError::Network {
            endpoint: path.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("[api] Response Body: {}", truncate_for_log(&text));

        if status.is_success() {
            return Ok(text);
        }

        let raw_message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .and_then(MessageField::into_text);
        let err = ApiError::from_status(path, status.as_u16(), raw_message);

        if matches!(err, ApiError::Unauthorized { .. }) && is_quiet_unauthorized(path) {
            log::debug!("[api] {err}");
        } else if err.is_expected() {
            log::warn!("[api] {err}");
        } else {
            log::error!("[api] {err}");
        }
        Err(err)
    }

    /// Unwrap the envelope and decode `data` into `T`.
    fn decode_data<T: DeserializeOwned>(text: &str, path: &str) -> Result<T> {
        let data = Self::unwrap_envelope(text, path)?;
        decode_value(data, path)
    }

    /// Decode the whole body into `T`. An empty body decodes as `null`.
    pub(crate) fn decode_bare<T: DeserializeOwned>(text: &str, path: &str) -> Result<T> {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).map_err(|e| parse_failure(path, text, &e.to_string()))?
        };
        decode_value(body, path)
    }

    /// Parse the body and hand back `data`.
    ///
    /// A JSON body without a `data` member is a `Parse` error.
    pub(crate) fn unwrap_envelope(text: &str, path: &str) -> Result<Value> {
        // Some endpoints answer 204 / empty body on success.
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let body: Value =
            serde_json::from_str(text).map_err(|e| parse_failure(path, text, &e.to_string()))?;
        if body.get("data").is_none() {
            return Err(parse_failure(path, text, "missing `data` envelope"));
        }
        let envelope: Envelope =
            serde_json::from_value(body).map_err(|e| parse_failure(path, text, &e.to_string()))?;
        if let Some(ref message) = envelope.message {
            log::debug!("[api] {path}: {message}");
        }
        Ok(envelope.data)
    }
}

fn decode_value<T: DeserializeOwned>(value: Value, path: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        log::error!("[api] {path} unexpected data: {e}");
        ApiError::Parse {
            endpoint: path.to_string(),
            detail: e.to_string(),
        }
    })
}

fn parse_failure(path: &str, text: &str, detail: &str) -> ApiError {
    log::error!("[api] {path} JSON parse failed: {detail}");
    log::error!("[api] Raw response: {}", truncate_for_log(text));
    ApiError::Parse {
        endpoint: path.to_string(),
        detail: detail.to_string(),
    }
}

fn is_quiet_unauthorized(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    QUIET_UNAUTHORIZED.contains(&path)
}
