mod annotate;
mod execute;
mod list;
mod types;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RunCommands;
use crate::context::AppContext;

/// Handle `vrd run`.
pub async fn handle(action: &RunCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RunCommands::Start {
            suite,
            strategy,
            concurrency,
        } => execute::start(suite, strategy.as_deref(), *concurrency, ctx, flags).await,
        RunCommands::Rerun {
            run,
            strategy,
            concurrency,
        } => execute::rerun(run, strategy.as_deref(), *concurrency, ctx, flags).await,
        RunCommands::Resume { run, concurrency } => {
            execute::resume(run, *concurrency, ctx, flags).await
        }
        RunCommands::List { suite, favorites } => {
            list::run(suite.as_deref(), *favorites, ctx, flags).await
        }
        RunCommands::Show { run } => list::show(run, ctx, flags).await,
        RunCommands::Override {
            run,
            case,
            pass,
            fail: _,
        } => annotate::override_verdict(run, case, *pass, ctx, flags).await,
        RunCommands::Favorite { run } => annotate::favorite(run, ctx, flags).await,
        RunCommands::Comment { run, text } => annotate::comment(run, text, ctx, flags).await,
        RunCommands::Reorder { run, position } => {
            annotate::reorder(run, *position, ctx, flags).await
        }
        RunCommands::Delete { run } => annotate::delete(run, ctx, flags).await,
    }
}
