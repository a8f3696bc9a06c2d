//! reqwest-backed [`Backend`] and shared response helpers.
//!
//! Centralizes the status checks so the channel modules stay focused on
//! request construction and mapping:
//! - [`Rejection::read`] captures status + optional `detail` of a non-2xx
//!   response for the channel error mapping
//! - [`check_response`] turns a non-2xx response into [`ApiError::Api`] for
//!   the housekeeping endpoints

use std::time::Duration;

use folio_core::limits::ADMIN_TIMEOUT;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::backend::{Backend, ChatRequest, UploadRequest};
use crate::error::{ApiError, TransportError};

/// HTTP client for the Folio backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    pub(crate) http: reqwest::Client,
    origin: String,
    pub(crate) admin_timeout: Duration,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    ///
    /// No client-wide timeout is set: each channel bounds its own exchange,
    /// and the housekeeping calls use [`ADMIN_TIMEOUT`] per request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            origin: base_url.trim_end_matches('/').to_string(),
            admin_timeout: ADMIN_TIMEOUT,
        })
    }

    /// Override the bounded wait of the housekeeping calls.
    #[must_use]
    pub const fn with_admin_timeout(mut self, timeout: Duration) -> Self {
        self.admin_timeout = timeout;
        self
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }
}

impl Backend for HttpBackend {
    async fn upload_pdf(
        &self,
        request: UploadRequest,
    ) -> Result<reqwest::Response, TransportError> {
        let part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("session_id", request.session_id);

        let resp = self
            .http
            .post(self.url("/upload-pdf"))
            .multipart(form)
            .send()
            .await?;
        Ok(resp)
    }

    async fn chat(&self, request: ChatRequest) -> Result<reqwest::Response, TransportError> {
        let resp = self
            .http
            .post(self.url("/chat"))
            .json(&request)
            .send()
            .await?;
        Ok(resp)
    }
}

// ── Response helpers ───────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Status and server-supplied explanation of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub status: u16,
    /// Non-empty string `detail` from a JSON body, if any.
    pub detail: Option<String>,
}

impl Rejection {
    /// Consume a non-2xx response. An unreadable or non-JSON body simply
    /// yields no detail.
    pub async fn read(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let detail = match resp.bytes().await {
            Ok(body) => parse_detail(&body),
            Err(error) => {
                tracing::debug!(status, %error, "could not read error body");
                None
            }
        };
        Self { status, detail }
    }
}

fn parse_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

/// Check a housekeeping response for a non-success status.
///
/// Returns the response unchanged on success; otherwise
/// [`ApiError::Api`] with the `detail` string or the raw body.
pub(crate) async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = parse_detail(body.as_bytes()).unwrap_or(body);
    Err(ApiError::Api { status, message })
}
