//! Session identity and upload state.

use serde::{Deserialize, Serialize};

use crate::ids::new_session_id;

/// The binding between one uploaded document and one chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque correlation key sent with every upload and chat request.
    pub id: String,
    /// Whether a document has been uploaded for this session.
    pub upload_complete: bool,
    /// Name of the uploaded document, empty until an upload succeeds.
    pub document_label: String,
}

/// Single source of truth for session identity and upload state.
///
/// Created once per running client. The identifier never changes; only
/// [`mark_uploaded`](Self::mark_uploaded) and [`reset`](Self::reset) mutate
/// the upload flag and label. Neither channel writes here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    /// Start a session with a freshly generated identifier.
    #[must_use]
    pub fn create() -> Self {
        Self::with_id(new_session_id())
    }

    /// Start a session with a caller-chosen identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            session: Session {
                id: id.into(),
                upload_complete: false,
                document_label: String::new(),
            },
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.session.id
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn is_upload_complete(&self) -> bool {
        self.session.upload_complete
    }

    /// Label of the uploaded document, if any.
    #[must_use]
    pub fn document_label(&self) -> Option<&str> {
        if self.session.upload_complete {
            Some(&self.session.document_label)
        } else {
            None
        }
    }

    /// Record a successful upload. Unlocks chat.
    pub fn mark_uploaded(&mut self, document_label: impl Into<String>) {
        self.session.upload_complete = true;
        self.session.document_label = document_label.into();
        tracing::info!(
            session_id = %self.session.id,
            document = %self.session.document_label,
            "document associated with session"
        );
    }

    /// Drop the document association. Re-locks chat; idempotent.
    pub fn reset(&mut self) {
        if self.session.upload_complete {
            tracing::info!(session_id = %self.session.id, "session reset for a new document");
        }
        self.session.upload_complete = false;
        self.session.document_label.clear();
    }
}
