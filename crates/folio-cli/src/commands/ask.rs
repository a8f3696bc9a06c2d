use anyhow::Context;
use folio_client::SessionController;
use folio_config::FolioConfig;

use crate::bootstrap;
use crate::cli::{AskArgs, GlobalFlags, OutputFormat};
use crate::commands::shared::{self, SessionReport, UploadSummary};
use crate::output;
use crate::progress::Progress;

/// Handle `folio ask`.
///
/// Questions are sent strictly one after another. A failed answer is kept in
/// the transcript and the next question still goes out; a failed upload
/// aborts the command.
pub async fn handle(
    args: &AskArgs,
    config: &FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut ctl = SessionController::new(bootstrap::backend(config)?, bootstrap::timeouts(config));
    let ack = shared::upload(&mut ctl, &args.pdf).await?;

    let session_id = ctl.session().id().to_string();
    let chat = ctl
        .chat()
        .context("chat is unavailable after a successful upload")?;

    for question in &args.questions {
        let progress = Progress::spinner("Thinking...");
        let outcome = chat.ask(question, &session_id).await;
        progress.finish_clear();
        if let Err(error) = outcome {
            tracing::debug!(%error, "question answered with an error turn");
        }
    }

    let report = SessionReport {
        session: session_id,
        upload: Some(UploadSummary::from(&ack)),
        transcript: chat.transcript(),
    };

    match flags.format {
        OutputFormat::Json => output::output(&report, OutputFormat::Json),
        OutputFormat::Text => {
            println!("{}", report.to_text());
            Ok(())
        }
    }
}
