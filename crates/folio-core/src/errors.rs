//! Failure taxonomy shared by the upload and chat channels.
//!
//! The channel error enums live in `folio-client`; each of their variants maps
//! onto exactly one [`ErrorKind`] so renderers and tests can branch on the
//! category without matching message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed upload or chat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Local file type or size check failed. Never reaches the network.
    ClientValidation,
    /// The call was refused because the channel already has one outstanding.
    /// Never reaches the network.
    Rejected,
    /// The bounded wait elapsed before any response arrived.
    Timeout,
    /// The server answered 408.
    ServerTimeout,
    /// The server answered 404: no document is associated with the session.
    NotFound,
    /// The server answered 413.
    PayloadTooLarge,
    /// The server answered 500, or another status with a `detail` string.
    Server,
    /// The request never produced a response.
    Network,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientValidation => "client_validation",
            Self::Rejected => "rejected",
            Self::Timeout => "timeout",
            Self::ServerTimeout => "server_timeout",
            Self::NotFound => "not_found",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Server => "server",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the failure was decided locally, before any request was sent.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::ClientValidation | Self::Rejected)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
