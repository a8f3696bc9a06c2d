//! Chat channel: one question at a time, appended to an ordered transcript.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use folio_core::limits::CHAT_TIMEOUT;
use folio_core::{ChatState, ChatTurn};
use serde::Deserialize;

use crate::backend::{Backend, ChatRequest};
use crate::error::ChatError;
use crate::gate::Gate;
use crate::http::Rejection;

#[derive(Deserialize)]
struct ChatReply {
    answer: String,
}

fn lock(transcript: &Mutex<Vec<ChatTurn>>) -> MutexGuard<'_, Vec<ChatTurn>> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The user turn of an outstanding question.
///
/// Exactly one assistant turn follows it: the one passed to
/// [`settle`](Self::settle), or a failure turn written on drop when the
/// `ask` future is abandoned before the exchange resolves.
struct PendingReply<'a> {
    transcript: &'a Mutex<Vec<ChatTurn>>,
    settled: bool,
}

impl<'a> PendingReply<'a> {
    fn open(transcript: &'a Mutex<Vec<ChatTurn>>, question: &str) -> Self {
        lock(transcript).push(ChatTurn::user(question));
        Self {
            transcript,
            settled: false,
        }
    }

    fn settle(mut self, turn: ChatTurn) {
        lock(self.transcript).push(turn);
        self.settled = true;
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let error = ChatError::Unknown {
            cause: "question abandoned before the exchange resolved".to_string(),
        };
        tracing::warn!(kind = %error.kind(), cause = ?error, "question abandoned");
        lock(self.transcript).push(ChatTurn::failure(error.to_string(), error.kind()));
    }
}

/// Sends questions bound to a session and owns the resulting transcript.
///
/// At most one question is outstanding per instance. Failures are appended
/// as assistant turns tagged [`TurnStatus::Failed`](folio_core::TurnStatus)
/// and also returned to the caller.
pub struct ChatChannel<B> {
    backend: Arc<B>,
    timeout: Duration,
    gate: Gate,
    transcript: Mutex<Vec<ChatTurn>>,
}

impl<B: Backend> ChatChannel<B> {
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            timeout: CHAT_TIMEOUT,
            gate: Gate::default(),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Override the bounded wait.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn state(&self) -> ChatState {
        if self.gate.is_busy() {
            ChatState::WaitingForAnswer
        } else {
            ChatState::Idle
        }
    }

    /// Snapshot of the transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.turns().clone()
    }

    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns().len()
    }

    /// Ask `question` about the document of `session_id`.
    ///
    /// A blank question resolves to `Ok(None)` and changes nothing. Otherwise
    /// the user turn is appended before the request goes out, and exactly one
    /// assistant turn follows once the exchange resolves.
    ///
    /// # Errors
    ///
    /// [`ChatError::Busy`] if another question is outstanding (nothing is
    /// appended). Any other error has already been appended to the
    /// transcript as a failed assistant turn carrying the same message.
    pub async fn ask(
        &self,
        question: &str,
        session_id: &str,
    ) -> Result<Option<ChatTurn>, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        let Some(_pass) = self.gate.try_enter() else {
            tracing::debug!(session_id, "question rejected: answer still pending");
            return Err(ChatError::Busy);
        };

        // Declared after the pass so the reply turn lands before the gate reopens.
        let pending = PendingReply::open(&self.transcript, question);

        let request = ChatRequest {
            question: question.to_string(),
            session_id: session_id.to_string(),
        };
        let outcome = match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ChatError::Timeout),
        };

        match outcome {
            Ok(answer) => {
                tracing::debug!(session_id, chars = answer.len(), "answer received");
                let turn = ChatTurn::answer(answer);
                pending.settle(turn.clone());
                Ok(Some(turn))
            }
            Err(error) => {
                tracing::warn!(session_id, kind = %error.kind(), cause = ?error, "question failed");
                pending.settle(ChatTurn::failure(error.to_string(), error.kind()));
                Err(error)
            }
        }
    }

    async fn exchange(&self, request: ChatRequest) -> Result<String, ChatError> {
        let resp = self.backend.chat(request).await?;
        if !resp.status().is_success() {
            return Err(ChatError::from_rejection(Rejection::read(resp).await));
        }

        let body = resp.bytes().await.map_err(crate::error::TransportError::from)?;
        let reply: ChatReply = serde_json::from_slice(&body).map_err(|e| ChatError::Unknown {
            cause: format!("malformed chat reply: {e}"),
        })?;
        Ok(reply.answer)
    }

    fn turns(&self) -> MutexGuard<'_, Vec<ChatTurn>> {
        lock(&self.transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::testing::{FakeBackend, Step};
    use folio_core::{ErrorKind, Role, TurnStatus};
    use pretty_assertions::assert_eq;

    const NO_PDF: &str = "No PDF found for this session. Please upload a PDF first.";

    fn setup(steps: Vec<Step>) -> (Arc<FakeBackend>, ChatChannel<FakeBackend>) {
        let backend = Arc::new(FakeBackend::scripted(steps));
        (backend.clone(), ChatChannel::new(backend))
    }

    #[tokio::test]
    async fn answer_is_appended_after_question() {
        let (backend, channel) = setup(vec![Step::json(200, r#"{"answer":"X","session_id":"s1"}"#)]);

        let turn = channel.ask("  What is X?  ", "s1").await.unwrap().unwrap();

        assert_eq!(turn, ChatTurn::answer("X"));
        assert_eq!(
            channel.transcript(),
            vec![ChatTurn::user("What is X?"), ChatTurn::answer("X")]
        );
        let sent = backend.chats.lock().unwrap();
        assert_eq!(
            sent[0],
            ChatRequest {
                question: "What is X?".into(),
                session_id: "s1".into(),
            }
        );
    }

    #[tokio::test]
    async fn blank_question_is_a_no_op() {
        let (backend, channel) = setup(vec![]);
        for question in ["", "   ", "\n\t"] {
            assert_eq!(channel.ask(question, "s1").await.unwrap(), None);
        }
        assert_eq!(channel.turn_count(), 0);
        assert_eq!(backend.chat_count(), 0);
    }

    #[tokio::test]
    async fn not_found_becomes_a_failed_turn() {
        let (_, channel) = setup(vec![Step::json(
            404,
            r#"{"detail":"No PDF uploaded for this session. Please upload a PDF first."}"#,
        )]);

        let err = channel.ask("Q1", "s1").await.unwrap_err();

        assert!(matches!(err, ChatError::NotFound));
        let transcript = channel.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[1].content, NO_PDF);
        assert_eq!(
            transcript[1].status,
            TurnStatus::Failed {
                kind: ErrorKind::NotFound
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn user_turn_is_visible_while_waiting() {
        let (_, channel) = setup(vec![Step::Delayed {
            after: Duration::from_secs(3),
            status: 200,
            body: r#"{"answer":"A1"}"#.into(),
        }]);

        let (answered, snapshot) = tokio::join!(channel.ask("Q1", "s1"), async {
            tokio::task::yield_now().await;
            (channel.state(), channel.transcript())
        });

        assert!(answered.unwrap().is_some());
        assert_eq!(snapshot.0, ChatState::WaitingForAnswer);
        assert_eq!(snapshot.1, vec![ChatTurn::user("Q1")]);
        assert_eq!(channel.state(), ChatState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn second_question_is_rejected_while_first_is_pending() {
        let (backend, channel) = setup(vec![Step::Delayed {
            after: Duration::from_secs(10),
            status: 200,
            body: r#"{"answer":"A1"}"#.into(),
        }]);

        let (first, (second, during)) = tokio::join!(channel.ask("Q1", "s1"), async {
            tokio::task::yield_now().await;
            let second = channel.ask("Q2", "s1").await;
            (second, channel.transcript())
        });

        assert!(matches!(second, Err(ChatError::Busy)));
        assert_eq!(during, vec![ChatTurn::user("Q1")]);
        assert_eq!(first.unwrap(), Some(ChatTurn::answer("A1")));
        assert_eq!(
            channel.transcript(),
            vec![ChatTurn::user("Q1"), ChatTurn::answer("A1")]
        );
        assert_eq!(backend.chat_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_question_times_out_after_45_seconds() {
        let (_, channel) = setup(vec![Step::Hang, Step::json(200, r#"{"answer":"later"}"#)]);
        let started = tokio::time::Instant::now();

        let err = channel.ask("Q1", "s1").await.unwrap_err();

        assert!(matches!(err, ChatError::Timeout));
        assert!(started.elapsed() >= Duration::from_secs(45));
        assert!(started.elapsed() < Duration::from_secs(46));
        assert_eq!(
            channel.transcript()[1],
            ChatTurn::failure(
                "Request timeout. The AI is taking too long to respond. Please try a simpler question.",
                ErrorKind::Timeout
            )
        );

        // The guard reopens after a timeout.
        assert!(channel.ask("Q2", "s1").await.unwrap().is_some());
        assert_eq!(channel.turn_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_question_still_gets_a_reply_turn() {
        let (_, channel) = setup(vec![Step::Hang, Step::json(200, r#"{"answer":"A2"}"#)]);

        let abandoned =
            tokio::time::timeout(Duration::from_secs(1), channel.ask("Q1", "s1")).await;
        assert!(abandoned.is_err());
        assert_eq!(channel.state(), ChatState::Idle);

        assert!(channel.ask("Q2", "s1").await.unwrap().is_some());

        let transcript = channel.transcript();
        let roles: Vec<Role> = transcript.iter().map(|turn| turn.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(transcript[1].error_kind(), Some(ErrorKind::Unknown));
        assert_eq!(transcript[3], ChatTurn::answer("A2"));
    }

    #[tokio::test]
    async fn failures_keep_the_transcript_paired() {
        let (_, channel) = setup(vec![
            Step::json(500, r#"{"detail":"Error generating response: quota"}"#),
            Step::json(408, "{}"),
            Step::json(422, r#"{"detail":"Question cannot be empty."}"#),
            Step::Fail(TransportError::NoResponse("connection reset".into())),
            Step::json(200, r#"{"not_answer":true}"#),
            Step::json(200, r#"{"answer":"fine"}"#),
        ]);

        for i in 0..6 {
            let _ = channel.ask(&format!("Q{i}"), "s1").await;
        }

        let transcript = channel.transcript();
        assert_eq!(transcript.len(), 12);
        for pair in transcript.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
        }

        let kinds: Vec<Option<ErrorKind>> = transcript
            .iter()
            .skip(1)
            .step_by(2)
            .map(ChatTurn::error_kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(ErrorKind::Server),
                Some(ErrorKind::ServerTimeout),
                Some(ErrorKind::Server),
                Some(ErrorKind::Network),
                Some(ErrorKind::Unknown),
                None,
            ]
        );
        assert_eq!(transcript[1].content, "Server error. Please try again in a moment.");
        assert_eq!(transcript[5].content, "Question cannot be empty.");
        assert_eq!(transcript[11].content, "fine");
    }
}
