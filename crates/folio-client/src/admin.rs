//! Backend housekeeping: health probe and server-side session cleanup.
//!
//! These calls are outside the session lifecycle, so they use the plain
//! [`ApiError`] instead of the channel error mapping. Each request is bounded
//! by the backend's admin timeout.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpBackend, check_response};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub active_sessions: u64,
    #[serde(default)]
    pub api_key_configured: bool,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

impl HttpBackend {
    /// Probe the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or times out, the backend
    /// returns a non-success status, or the body is not a health document
    /// ([`ApiError::Parse`]).
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.fetch(self.http.get(self.url("/health"))).await
    }

    /// Drop the server-side state of one session. Returns the server message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 404 if the backend does not know
    /// the session.
    pub async fn clear_session(&self, session_id: &str) -> Result<String, ApiError> {
        let url = self.url(&format!("/session/{}", urlencoding::encode(session_id)));
        let body: MessageBody = self.fetch(self.http.delete(url)).await?;
        tracing::info!(session_id, "server session cleared");
        Ok(body.message)
    }

    /// Drop the server-side state of every session. Returns the server message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the status is not 2xx.
    pub async fn clear_all_sessions(&self) -> Result<String, ApiError> {
        let body: MessageBody = self.fetch(self.http.delete(self.url("/sessions"))).await?;
        tracing::info!("all server sessions cleared");
        Ok(body.message)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = request.timeout(self.admin_timeout).send().await?;
        let body = check_response(resp).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
