//! Scripted in-memory backend for channel tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::backend::{Backend, ChatRequest, UploadRequest};
use crate::error::TransportError;

/// One scripted reply, consumed in order by whichever call comes next.
pub(crate) enum Step {
    Respond { status: u16, body: String },
    Delayed { after: Duration, status: u16, body: String },
    Fail(TransportError),
    Hang,
}

impl Step {
    pub fn json(status: u16, body: &str) -> Self {
        Self::Respond {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    script: Mutex<VecDeque<Step>>,
    pub uploads: Mutex<Vec<UploadRequest>>,
    pub chats: Mutex<Vec<ChatRequest>>,
}

impl FakeBackend {
    pub fn scripted(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(steps.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn chat_count(&self) -> usize {
        self.chats.lock().unwrap().len()
    }

    async fn next(&self) -> Result<reqwest::Response, TransportError> {
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond { status, body }) => Ok(response(status, body)),
            Some(Step::Delayed { after, status, body }) => {
                tokio::time::sleep(after).await;
                Ok(response(status, body))
            }
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Hang) => std::future::pending().await,
            None => panic!("fake backend script exhausted"),
        }
    }
}

fn response(status: u16, body: String) -> reqwest::Response {
    reqwest::Response::from(
        ::http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .unwrap(),
    )
}

impl Backend for FakeBackend {
    async fn upload_pdf(
        &self,
        request: UploadRequest,
    ) -> Result<reqwest::Response, TransportError> {
        self.uploads.lock().unwrap().push(request);
        self.next().await
    }

    async fn chat(&self, request: ChatRequest) -> Result<reqwest::Response, TransportError> {
        self.chats.lock().unwrap().push(request);
        self.next().await
    }
}
