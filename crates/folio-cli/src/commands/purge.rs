use anyhow::{Context, bail};
use folio_config::FolioConfig;
use folio_core::ids::is_session_id;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::{GlobalFlags, PurgeArgs};
use crate::output;

#[derive(Debug, Serialize)]
struct PurgeReport {
    scope: &'static str,
    session: Option<String>,
    message: String,
}

/// Handle `folio purge`.
pub async fn handle(
    args: &PurgeArgs,
    config: &FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(session_id) = &args.session {
        check_session_id(session_id)?;
    }
    let backend = bootstrap::backend(config)?;

    let report = match &args.session {
        Some(session_id) => PurgeReport {
            scope: "session",
            session: Some(session_id.clone()),
            message: backend
                .clear_session(session_id)
                .await
                .with_context(|| format!("failed to clear session {session_id}"))?,
        },
        None => PurgeReport {
            scope: "all",
            session: None,
            message: backend
                .clear_all_sessions()
                .await
                .context("failed to clear sessions")?,
        },
    };

    output::output(&report, flags.format)
}

fn check_session_id(session_id: &str) -> anyhow::Result<()> {
    if !is_session_id(session_id) {
        bail!("'{session_id}' is not a session id (9 lowercase letters or digits)");
    }
    Ok(())
}
