//! Fixed limits of the upload and chat exchanges.

use std::time::Duration;

/// The only MIME type the upload channel accepts.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Largest accepted upload, inclusive: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default bounded wait for `POST /upload-pdf`.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Default bounded wait for `POST /chat`.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(45);

/// Default bounded wait for the health and session-cleanup calls.
pub const ADMIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Size in MiB with two decimals, as shown after a successful upload.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / 1024.0 / 1024.0)
}
