//! Cookie-based session endpoints
//!
//! The backend sets an HttpOnly session cookie on `auth/login`; the
//! [`ApiClient`] cookie jar replays it on every later call. These endpoints
//! answer with bare objects, so they go through the `*_bare` calls.

use std::sync::Arc;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::http_client::ApiClient;

/// A panel (module) the user can work in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub panel_type: String,
}

/// The authenticated user as `auth/me` reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub panel_id: Option<String>,
    #[serde(default)]
    pub panel_type: Option<String>,
    #[serde(default)]
    pub veterinary_clinic_id: Option<String>,
    #[serde(default)]
    pub panels: Vec<PanelSummary>,
}

#[derive(Debug, Deserialize)]
struct UserWrapper {
    user: SessionUser,
}

/// Either `{ user: {...} }` or the user itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserPayload {
    Wrapped(UserWrapper),
    Bare(SessionUser),
}

impl From<UserPayload> for SessionUser {
    fn from(payload: UserPayload) -> Self {
        match payload {
            UserPayload::Wrapped(w) => w.user,
            UserPayload::Bare(u) => u,
        }
    }
}

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Open a session. The cookie lands in the shared jar.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.client
            .post_bare::<IgnoredAny, _>("auth/login", &json!({ "email": email, "password": password }))
            .await?;
        log::info!("[auth] Logged in as {email}");
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.client
            .post_bare::<IgnoredAny, _>("auth/logout", &json!({}))
            .await?;
        log::info!("[auth] Logged out");
        Ok(())
    }

    /// Current user. 401 means there is no session.
    pub async fn me(&self) -> Result<SessionUser> {
        let payload: UserPayload = self.client.get_bare("auth/me").await?;
        Ok(payload.into())
    }

    /// Whether the session cookie is still valid.
    ///
    /// A 401 is answered with `Ok(false)`; other failures propagate.
    pub async fn verify(&self) -> Result<bool> {
        match self.client.get_bare::<IgnoredAny>("auth/verify").await {
            Ok(_) => Ok(true),
            Err(crate::error::ApiError::Unauthorized { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Switch the session to another panel.
    pub async fn select_panel(&self, panel_id: &str, panel_type: &str) -> Result<SessionUser> {
        let payload: UserPayload = self
            .client
            .post_bare(
                "auth/select-panel",
                &json!({ "panelId": panel_id, "panelType": panel_type }),
            )
            .await?;
        Ok(payload.into())
    }
}
