use folio_config::FolioConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod ask;
pub mod chat;
pub mod health;
pub mod purge;
mod shared;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Chat(args) => chat::handle(&args, config, flags).await,
        Commands::Ask(args) => ask::handle(&args, config, flags).await,
        Commands::Health => health::handle(config, flags).await,
        Commands::Purge(args) => purge::handle(&args, config, flags).await,
    }
}
