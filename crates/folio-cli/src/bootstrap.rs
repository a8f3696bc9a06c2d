use anyhow::Context;
use folio_client::{HttpBackend, Timeouts};
use folio_config::FolioConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FolioConfig> {
    let mut config = FolioConfig::load_with_dotenv().context("failed to load configuration")?;

    if let Some(base_url) = &flags.base_url {
        config.backend.base_url.clone_from(base_url);
        config
            .backend
            .validate()
            .context("invalid --base-url")?;
    }

    tracing::debug!(origin = config.backend.origin(), "configuration loaded");
    Ok(config)
}

/// Build the HTTP transport described by `config`.
pub fn backend(config: &FolioConfig) -> anyhow::Result<HttpBackend> {
    HttpBackend::new(config.backend.origin(), &config.backend.user_agent)
        .context("failed to build HTTP client")
}

pub const fn timeouts(config: &FolioConfig) -> Timeouts {
    Timeouts {
        upload: config.backend.upload_timeout(),
        chat: config.backend.chat_timeout(),
    }
}
