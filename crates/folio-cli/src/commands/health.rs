use anyhow::Context;
use folio_config::FolioConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output;

/// Handle `folio health`.
pub async fn handle(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let backend = bootstrap::backend(config)?;
    let health = backend
        .health()
        .await
        .with_context(|| format!("health check against {} failed", backend.origin()))?;
    output::output(&health, flags.format)
}
