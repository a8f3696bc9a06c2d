//! # folio-core
//!
//! Core types for Folio, a client that uploads one PDF per session and then
//! holds a question/answer dialogue about it with a remote backend.
//!
//! This crate is pure state with no I/O:
//! - [`SessionContext`] owns the session identifier and the upload flag
//! - [`ChatTurn`] is one entry of the append-only transcript
//! - [`ErrorKind`] is the failure taxonomy shared by both channels
//! - Channel state enums and the upload limits

pub mod enums;
pub mod errors;
pub mod ids;
pub mod limits;
pub mod session;
pub mod turn;

pub use enums::{ChatState, Role, UploadState};
pub use errors::ErrorKind;
pub use session::{Session, SessionContext};
pub use turn::{ChatTurn, TurnStatus};
