//! The seam between the channels and the network.
//!
//! A [`Backend`] turns a request into either a raw HTTP response or a
//! [`TransportError`]. Status interpretation, body decoding and the bounded
//! wait all happen in the channels, so every implementation gets the same
//! error mapping.

use std::future::Future;

use serde::Serialize;

use crate::error::TransportError;

/// Multipart payload for `POST /upload-pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub session_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// JSON body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub session_id: String,
}

/// Transport for the two session-scoped exchanges.
pub trait Backend: Send + Sync {
    /// Send a document for the session.
    fn upload_pdf(
        &self,
        request: UploadRequest,
    ) -> impl Future<Output = Result<reqwest::Response, TransportError>> + Send;

    /// Send one question for the session.
    fn chat(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<reqwest::Response, TransportError>> + Send;
}
