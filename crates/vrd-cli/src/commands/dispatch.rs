use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Chat { action } => commands::chat::handle(&action, ctx, flags).await,
        Commands::Sessions => commands::sessions::handle(ctx, flags).await,
        Commands::Docs { action } => commands::docs::handle(&action, ctx, flags).await,
        Commands::Suite { action } => commands::suite::handle(&action, ctx, flags).await,
        Commands::Case { action } => commands::case::handle(&action, ctx, flags).await,
        Commands::Run { action } => commands::run::handle(&action, ctx, flags).await,
        Commands::Strategies => commands::strategies::handle(flags),
    }
}
