//! Upload channel: local validation, then `POST /upload-pdf`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use folio_core::UploadState;
use folio_core::limits::{MAX_UPLOAD_BYTES, PDF_MIME_TYPE, UPLOAD_TIMEOUT, format_megabytes};
use serde::{Deserialize, Serialize};

use crate::backend::{Backend, UploadRequest};
use crate::error::UploadError;
use crate::gate::Gate;
use crate::http::Rejection;

/// A file picked for upload. Validated and dropped after each attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }

    /// Pick a file from disk, typing it by extension the way a browser file
    /// picker does.
    ///
    /// Type and size come from the file's metadata. The contents are read
    /// only when those pass [`check`](Self::check); a rejected file yields a
    /// candidate with empty `bytes` that [`UploadChannel::submit`] refuses
    /// with the matching message.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be inspected or read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let mut candidate = Self {
            file_name,
            mime_type: mime_type_for(path).to_string(),
            size_bytes: tokio::fs::metadata(path).await?.len(),
            bytes: Vec::new(),
        };

        if candidate.check().is_ok() {
            candidate.bytes = tokio::fs::read(path).await?;
            candidate.size_bytes = candidate.bytes.len() as u64;
        }
        Ok(candidate)
    }

    /// Local acceptance rules: PDF MIME type, at most 10 MiB.
    ///
    /// # Errors
    ///
    /// [`UploadError::InvalidFileType`] unless the MIME type is exactly
    /// `application/pdf`; [`UploadError::FileTooLarge`] above 10 MiB.
    pub fn check(&self) -> Result<(), UploadError> {
        if self.mime_type != PDF_MIME_TYPE {
            return Err(UploadError::InvalidFileType {
                mime_type: self.mime_type.clone(),
            });
        }
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(UploadError::FileTooLarge {
                size_bytes: self.size_bytes,
            });
        }
        Ok(())
    }
}

/// MIME type implied by a file's extension.
#[must_use]
pub fn mime_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

/// Optional confirmation body of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// Successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadAck {
    /// Name of the file as it was picked locally.
    pub original_file_name: String,
    pub size_bytes: u64,
    pub receipt: Option<UploadReceipt>,
}

impl UploadAck {
    /// Confirmation line shown to the user.
    #[must_use]
    pub fn success_message(&self) -> String {
        format!(
            "PDF uploaded and processed successfully! ({} MB)",
            format_megabytes(self.size_bytes)
        )
    }
}

/// Validates a candidate and submits it bound to a session.
pub struct UploadChannel<B> {
    backend: Arc<B>,
    timeout: Duration,
    gate: Gate,
}

impl<B: Backend> UploadChannel<B> {
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            timeout: UPLOAD_TIMEOUT,
            gate: Gate::default(),
        }
    }

    /// Override the bounded wait.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn state(&self) -> UploadState {
        if self.gate.is_busy() {
            UploadState::Uploading
        } else {
            UploadState::Idle
        }
    }

    /// Check type and size without touching the network.
    ///
    /// # Errors
    ///
    /// [`UploadError::InvalidFileType`] unless the MIME type is exactly
    /// `application/pdf`; [`UploadError::FileTooLarge`] above 10 MiB.
    pub fn validate(candidate: &UploadCandidate) -> Result<(), UploadError> {
        candidate.check()
    }

    /// Validate and upload `candidate` for `session_id`.
    ///
    /// `None` means nothing was picked and resolves to `Ok(None)` without
    /// any effect. No retry is attempted.
    ///
    /// # Errors
    ///
    /// Every failure resolves to an [`UploadError`] whose `Display` is the
    /// user-facing message; the raw cause is logged.
    pub async fn submit(
        &self,
        candidate: Option<UploadCandidate>,
        session_id: &str,
    ) -> Result<Option<UploadAck>, UploadError> {
        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let result = self.run(candidate, session_id).await;
        match &result {
            Ok(ack) => tracing::info!(
                session_id,
                file = %ack.original_file_name,
                size_bytes = ack.size_bytes,
                "upload accepted"
            ),
            Err(error) if error.kind().is_local() => tracing::debug!(
                session_id,
                kind = %error.kind(),
                cause = ?error,
                "upload refused before sending"
            ),
            Err(error) => tracing::warn!(
                session_id,
                kind = %error.kind(),
                cause = ?error,
                "upload failed"
            ),
        }
        result.map(Some)
    }

    async fn run(
        &self,
        candidate: UploadCandidate,
        session_id: &str,
    ) -> Result<UploadAck, UploadError> {
        Self::validate(&candidate)?;
        let Some(_pass) = self.gate.try_enter() else {
            return Err(UploadError::Busy);
        };

        let original_file_name = candidate.file_name.clone();
        let size_bytes = candidate.size_bytes;
        let request = UploadRequest {
            session_id: session_id.to_string(),
            file_name: candidate.file_name,
            mime_type: candidate.mime_type,
            bytes: candidate.bytes,
        };

        tracing::debug!(session_id, file = %original_file_name, size_bytes, "uploading");
        let receipt = match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result?,
            Err(_elapsed) => return Err(UploadError::Timeout),
        };

        Ok(UploadAck {
            original_file_name,
            size_bytes,
            receipt,
        })
    }

    async fn exchange(&self, request: UploadRequest) -> Result<Option<UploadReceipt>, UploadError> {
        let resp = self.backend.upload_pdf(request).await?;
        if !resp.status().is_success() {
            return Err(UploadError::from_rejection(Rejection::read(resp).await));
        }

        // The body is informational; any 2xx counts as success.
        let receipt = match resp.bytes().await {
            Ok(body) => serde_json::from_slice::<UploadReceipt>(&body).ok(),
            Err(error) => {
                tracing::debug!(%error, "upload confirmation body unreadable");
                None
            }
        };
        Ok(receipt)
    }
}
