//! Transcript entries.

use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::errors::ErrorKind;

/// Outcome tag of a turn. User turns and genuine answers are `Delivered`;
/// assistant turns that carry a mapped error message are `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnStatus {
    Delivered,
    Failed { kind: ErrorKind },
}

/// One message in the transcript. Appended in order, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    #[serde(flatten)]
    pub status: TurnStatus,
}

impl ChatTurn {
    #[must_use]
    pub fn user(question: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: question.into(),
            status: TurnStatus::Delivered,
        }
    }

    #[must_use]
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            status: TurnStatus::Delivered,
        }
    }

    /// Assistant turn rendering a failed exchange.
    #[must_use]
    pub fn failure(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            role: Role::Assistant,
            content: message.into(),
            status: TurnStatus::Failed { kind },
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.status, TurnStatus::Failed { .. })
    }

    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self.status {
            TurnStatus::Failed { kind } => Some(kind),
            TurnStatus::Delivered => None,
        }
    }
}
