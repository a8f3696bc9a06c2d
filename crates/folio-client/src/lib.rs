//! # folio-client
//!
//! Session-scoped upload and chat channels against the Folio backend.
//!
//! - [`UploadChannel`] validates a PDF locally and sends it with the session
//!   identifier (`POST /upload-pdf`, 120 s bound)
//! - [`ChatChannel`] sends one question at a time and keeps the transcript
//!   (`POST /chat`, 45 s bound)
//! - [`SessionController`] owns the session and gates which channel is
//!   reachable
//! - [`HttpBackend`] is the reqwest transport; the [`Backend`] trait is the
//!   seam the channels are written against
//!
//! Every failure surfaces as a typed error whose `Display` is the message
//! meant for the user. Nothing is retried.

pub mod admin;
pub mod backend;
pub mod chat;
pub mod controller;
pub mod upload;

mod error;
mod gate;
mod http;

#[cfg(test)]
mod testing;

pub use admin::HealthStatus;
pub use backend::{Backend, ChatRequest, UploadRequest};
pub use chat::ChatChannel;
pub use controller::{SessionController, Timeouts};
pub use error::{ApiError, ChatError, TransportError, UploadError};
pub use http::HttpBackend;
pub use upload::{UploadAck, UploadCandidate, UploadChannel, UploadReceipt, mime_type_for};
