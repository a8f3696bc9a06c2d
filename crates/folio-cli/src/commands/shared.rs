use std::path::Path;

use anyhow::{Context, bail};
use folio_client::{Backend, SessionController, UploadAck, UploadCandidate};
use folio_core::ChatTurn;
use serde::Serialize;

use crate::output::format_turn;
use crate::progress::Progress;

/// Read `path` and upload it for the controller's session.
///
/// The error of a rejected upload carries the user-facing message only.
pub async fn upload<B: Backend>(
    ctl: &mut SessionController<B>,
    path: &Path,
) -> anyhow::Result<UploadAck> {
    let candidate = UploadCandidate::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let progress = Progress::spinner("Processing PDF... This may take a moment.");
    match ctl.upload(Some(candidate)).await {
        Ok(Some(ack)) => {
            progress.finish_clear();
            Ok(ack)
        }
        Ok(None) => {
            progress.finish_clear();
            bail!("no file selected")
        }
        Err(error) => {
            progress.finish_err("Upload failed");
            Err(anyhow::Error::new(error))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub file_name: String,
    pub size_bytes: u64,
    pub message: String,
}

impl From<&UploadAck> for UploadSummary {
    fn from(ack: &UploadAck) -> Self {
        Self {
            file_name: ack.original_file_name.clone(),
            size_bytes: ack.size_bytes,
            message: ack.success_message(),
        }
    }
}

/// What a session produced, printed at the end of `ask` and `chat`.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub session: String,
    pub upload: Option<UploadSummary>,
    pub transcript: Vec<ChatTurn>,
}

impl SessionReport {
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.transcript.len() + 2);
        if let Some(upload) = &self.upload {
            lines.push(format!("{} [{}]", upload.message, upload.file_name));
        }
        lines.extend(self.transcript.iter().map(format_turn));
        lines.join("\n")
    }
}
