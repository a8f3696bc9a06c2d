//! Backend endpoint configuration.

use std::time::Duration;

use folio_core::limits::{CHAT_TIMEOUT, UPLOAD_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_upload_timeout_secs() -> u64 {
    UPLOAD_TIMEOUT.as_secs()
}

const fn default_chat_timeout_secs() -> u64 {
    CHAT_TIMEOUT.as_secs()
}

fn default_user_agent() -> String {
    format!("folio/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Origin of the inference backend (e.g., `http://localhost:8000`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bounded wait for `POST /upload-pdf`, in seconds.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,

    /// Bounded wait for `POST /chat`, in seconds.
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_timeout_secs: default_upload_timeout_secs(),
            chat_timeout_secs: default_chat_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub const fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    #[must_use]
    pub const fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    /// Base URL without a trailing slash, ready for joining endpoint paths.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a base URL that is empty or
    /// not `http(s)://`, or for a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(invalid("backend.base_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "backend.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.upload_timeout_secs == 0 {
            return Err(invalid("backend.upload_timeout_secs", "must be greater than 0"));
        }
        if self.chat_timeout_secs == 0 {
            return Err(invalid("backend.chat_timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
