//! Wiring of one session to its two channels.

use std::sync::Arc;
use std::time::Duration;

use folio_core::SessionContext;
use folio_core::limits::{CHAT_TIMEOUT, UPLOAD_TIMEOUT};

use crate::backend::Backend;
use crate::chat::ChatChannel;
use crate::error::UploadError;
use crate::upload::{UploadAck, UploadCandidate, UploadChannel};

/// Bounded waits for the two exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub upload: Duration,
    pub chat: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            upload: UPLOAD_TIMEOUT,
            chat: CHAT_TIMEOUT,
        }
    }
}

/// Owns the session and decides which channel is reachable.
///
/// ```text
/// no document:  upload_channel() = Some, chat() = None
/// document:     upload_channel() = None, chat() = Some(fresh transcript)
/// ```
///
/// A successful upload builds a new [`ChatChannel`]; [`reset`](Self::reset)
/// drops it together with its transcript.
pub struct SessionController<B> {
    backend: Arc<B>,
    timeouts: Timeouts,
    session: SessionContext,
    upload: UploadChannel<B>,
    chat: Option<ChatChannel<B>>,
}

impl<B: Backend> SessionController<B> {
    /// Start a controller with a freshly generated session.
    #[must_use]
    pub fn new(backend: B, timeouts: Timeouts) -> Self {
        Self::with_session(backend, timeouts, SessionContext::create())
    }

    #[must_use]
    pub fn with_session(backend: B, timeouts: Timeouts, session: SessionContext) -> Self {
        let backend = Arc::new(backend);
        let upload = UploadChannel::new(backend.clone()).with_timeout(timeouts.upload);
        Self {
            backend,
            timeouts,
            session,
            upload,
            chat: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The upload channel, reachable only while no document is associated.
    #[must_use]
    pub const fn upload_channel(&self) -> Option<&UploadChannel<B>> {
        if self.session.is_upload_complete() {
            None
        } else {
            Some(&self.upload)
        }
    }

    /// The chat channel, reachable only after a successful upload.
    #[must_use]
    pub const fn chat(&self) -> Option<&ChatChannel<B>> {
        self.chat.as_ref()
    }

    /// Upload a document for this session and unlock chat on success.
    ///
    /// `None` (nothing picked) resolves to `Ok(None)` in every state.
    ///
    /// # Errors
    ///
    /// [`UploadError::DocumentLoaded`] if a document is already associated;
    /// call [`reset`](Self::reset) first. Otherwise whatever
    /// [`UploadChannel::submit`] reports.
    pub async fn upload(
        &mut self,
        candidate: Option<UploadCandidate>,
    ) -> Result<Option<UploadAck>, UploadError> {
        if candidate.is_none() {
            return Ok(None);
        }
        if self.session.is_upload_complete() {
            tracing::warn!(
                session_id = %self.session.id(),
                "upload refused: session already has a document"
            );
            return Err(UploadError::DocumentLoaded);
        }

        let ack = self.upload.submit(candidate, self.session.id()).await?;
        if let Some(ack) = &ack {
            self.session.mark_uploaded(ack.original_file_name.clone());
            let chat = ChatChannel::new(self.backend.clone()).with_timeout(self.timeouts.chat);
            self.chat = Some(chat);
        }
        Ok(ack)
    }

    /// Forget the current document and its transcript. Idempotent.
    pub fn reset(&mut self) {
        self.session.reset();
        self.chat = None;
    }
}
