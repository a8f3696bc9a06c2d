//! Channel error types.
//!
//! The `Display` text of every [`UploadError`] and [`ChatError`] variant is
//! the message shown to the user. Raw causes ride along in fields and only
//! reach the log.

use folio_core::ErrorKind;
use thiserror::Error;

use crate::http::Rejection;

/// Failure below the channel boundary: the request did not yield a usable
/// response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// No response was received (connection refused, DNS, reset, ...).
    #[error("no response: {0}")]
    NoResponse(String),

    /// A response arrived but its body could not be read.
    #[error("unreadable response body: {0}")]
    Body(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_builder() {
            Self::Request(error.to_string())
        } else if error.is_body() || error.is_decode() {
            Self::Body(error.to_string())
        } else {
            Self::NoResponse(error.to_string())
        }
    }
}

// ── Upload ─────────────────────────────────────────────────────────

/// Why an upload did not complete.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Please select a PDF file.")]
    InvalidFileType { mime_type: String },

    #[error("File too large. Maximum size is 10MB.")]
    FileTooLarge { size_bytes: u64 },

    #[error("An upload is already in progress. Please wait for it to finish.")]
    Busy,

    #[error("A PDF is already loaded for this session. Start a new document first.")]
    DocumentLoaded,

    #[error("Upload timeout. The file is too large or the server is taking too long to respond.")]
    Timeout,

    #[error("Request timeout. The PDF is too large or complex to process.")]
    ServerTimeout,

    #[error("File too large. Maximum size is 10MB.")]
    PayloadTooLarge,

    #[error("Server error while processing PDF. Please try again.")]
    Server { detail: Option<String> },

    /// A non-2xx status whose body carried a `detail` string.
    #[error("{detail}")]
    Detail { status: u16, detail: String },

    #[error("Network error. Please check your connection and try again.")]
    Network { cause: String },

    #[error("An error occurred while uploading the PDF. Please try again.")]
    Unknown { cause: String },
}

impl UploadError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFileType { .. } | Self::FileTooLarge { .. } => ErrorKind::ClientValidation,
            Self::Busy | Self::DocumentLoaded => ErrorKind::Rejected,
            Self::Timeout => ErrorKind::Timeout,
            Self::ServerTimeout => ErrorKind::ServerTimeout,
            Self::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            Self::Server { .. } | Self::Detail { .. } => ErrorKind::Server,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub(crate) fn from_rejection(rejection: Rejection) -> Self {
        match rejection.status {
            408 => Self::ServerTimeout,
            413 => Self::PayloadTooLarge,
            500 => Self::Server {
                detail: rejection.detail,
            },
            status => match rejection.detail {
                Some(detail) => Self::Detail { status, detail },
                None => Self::Unknown {
                    cause: format!("unexpected status {status}"),
                },
            },
        }
    }
}

impl From<TransportError> for UploadError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout => Self::Timeout,
            TransportError::NoResponse(cause) => Self::Network { cause },
            TransportError::Body(cause) | TransportError::Request(cause) => Self::Unknown { cause },
        }
    }
}

// ── Chat ───────────────────────────────────────────────────────────

/// Why a question did not get an answer.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Please wait for the current answer before asking another question.")]
    Busy,

    #[error("Request timeout. The AI is taking too long to respond. Please try a simpler question.")]
    Timeout,

    #[error("Request timeout. The AI is taking too long to respond. Please try a simpler question.")]
    ServerTimeout,

    #[error("No PDF found for this session. Please upload a PDF first.")]
    NotFound,

    #[error("Server error. Please try again in a moment.")]
    Server { detail: Option<String> },

    /// A non-2xx status whose body carried a `detail` string.
    #[error("{detail}")]
    Detail { status: u16, detail: String },

    #[error("Network error. Please check your connection and try again.")]
    Network { cause: String },

    #[error("Sorry, I encountered an error while processing your question. Please try again.")]
    Unknown { cause: String },
}

impl ChatError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Busy => ErrorKind::Rejected,
            Self::Timeout => ErrorKind::Timeout,
            Self::ServerTimeout => ErrorKind::ServerTimeout,
            Self::NotFound => ErrorKind::NotFound,
            Self::Server { .. } | Self::Detail { .. } => ErrorKind::Server,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub(crate) fn from_rejection(rejection: Rejection) -> Self {
        match rejection.status {
            404 => Self::NotFound,
            408 => Self::ServerTimeout,
            500 => Self::Server {
                detail: rejection.detail,
            },
            status => match rejection.detail {
                Some(detail) => Self::Detail { status, detail },
                None => Self::Unknown {
                    cause: format!("unexpected status {status}"),
                },
            },
        }
    }
}

impl From<TransportError> for ChatError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout => Self::Timeout,
            TransportError::NoResponse(cause) => Self::Network { cause },
            TransportError::Body(cause) | TransportError::Request(cause) => Self::Unknown { cause },
        }
    }
}

// ── Admin ──────────────────────────────────────────────────────────

/// Errors from the backend's housekeeping endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// `detail` from the body, or the raw body.
        message: String,
    },

    /// A success response whose body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rejection(status: u16, detail: Option<&str>) -> Rejection {
        Rejection {
            status,
            detail: detail.map(str::to_string),
        }
    }

    #[rstest]
    #[case(408, None, ErrorKind::ServerTimeout)]
    #[case(413, None, ErrorKind::PayloadTooLarge)]
    #[case(500, None, ErrorKind::Server)]
    #[case(500, Some("Error processing PDF: boom"), ErrorKind::Server)]
    #[case(400, Some("Only PDF files are allowed"), ErrorKind::Server)]
    #[case(404, None, ErrorKind::Unknown)]
    #[case(502, None, ErrorKind::Unknown)]
    fn upload_status_mapping(
        #[case] status: u16,
        #[case] detail: Option<&str>,
        #[case] expected: ErrorKind,
    ) {
        assert_eq!(UploadError::from_rejection(rejection(status, detail)).kind(), expected);
    }

    #[rstest]
    #[case(404, None, ErrorKind::NotFound)]
    #[case(404, Some("No PDF uploaded for this session."), ErrorKind::NotFound)]
    #[case(408, None, ErrorKind::ServerTimeout)]
    #[case(500, None, ErrorKind::Server)]
    #[case(400, Some("Question cannot be empty."), ErrorKind::Server)]
    #[case(413, None, ErrorKind::Unknown)]
    #[case(503, None, ErrorKind::Unknown)]
    fn chat_status_mapping(
        #[case] status: u16,
        #[case] detail: Option<&str>,
        #[case] expected: ErrorKind,
    ) {
        assert_eq!(ChatError::from_rejection(rejection(status, detail)).kind(), expected);
    }

    #[test]
    fn fixed_messages_ignore_server_detail() {
        let err = UploadError::from_rejection(rejection(500, Some("Error processing PDF: boom")));
        assert_eq!(err.to_string(), "Server error while processing PDF. Please try again.");

        let err = ChatError::from_rejection(rejection(404, Some("something else")));
        assert_eq!(
            err.to_string(),
            "No PDF found for this session. Please upload a PDF first."
        );
    }

    #[test]
    fn detail_is_passed_through_verbatim() {
        let err = UploadError::from_rejection(rejection(400, Some("Only PDF files are allowed")));
        assert_eq!(err.to_string(), "Only PDF files are allowed");

        let err = ChatError::from_rejection(rejection(422, Some("Question cannot be empty.")));
        assert_eq!(err.to_string(), "Question cannot be empty.");
    }

    #[test]
    fn unknown_status_without_detail_uses_fallback() {
        let err = UploadError::from_rejection(rejection(418, None));
        assert_eq!(
            err.to_string(),
            "An error occurred while uploading the PDF. Please try again."
        );
        let err = ChatError::from_rejection(rejection(418, None));
        assert_eq!(
            err.to_string(),
            "Sorry, I encountered an error while processing your question. Please try again."
        );
    }

    #[test]
    fn transport_failures_map_to_taxonomy() {
        assert_eq!(UploadError::from(TransportError::Timeout).kind(), ErrorKind::Timeout);
        assert_eq!(
            UploadError::from(TransportError::NoResponse("refused".into())).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ChatError::from(TransportError::Body("truncated".into())).kind(),
            ErrorKind::Unknown
        );
        assert_eq!(
            ChatError::from(TransportError::Request("bad url".into())).kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn timeout_and_server_timeout_are_distinct_kinds() {
        assert_ne!(ChatError::Timeout.kind(), ChatError::ServerTimeout.kind());
        assert_eq!(ChatError::Timeout.to_string(), ChatError::ServerTimeout.to_string());
    }

    #[test]
    fn local_errors_are_flagged_local() {
        assert!(UploadError::InvalidFileType { mime_type: "text/plain".into() }.kind().is_local());
        assert!(UploadError::Busy.kind().is_local());
        assert!(ChatError::Busy.kind().is_local());
        assert!(!UploadError::PayloadTooLarge.kind().is_local());
    }
}
