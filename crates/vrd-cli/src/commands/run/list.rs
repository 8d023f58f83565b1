use anyhow::Context;
use vrd_core::entities::TestRun;
use vrd_runner::RunBook;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::run::types::{ResultRow, RunSummary};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn require_run(ctx: &AppContext, run_id: &str) -> anyhow::Result<TestRun> {
    ctx.client
        .find_run(run_id)
        .await?
        .with_context(|| format!("test run '{run_id}' not found"))
}

pub async fn run(
    suite: Option<&str>,
    favorites: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let book = RunBook::load(&ctx.client).await?;
    let rows = if favorites {
        book.favorites()
            .into_iter()
            .filter(|run| suite.is_none_or(|suite| run.suite_id == suite))
            .map(RunSummary::from)
            .collect::<Vec<_>>()
    } else {
        let limit = effective_limit(flags.limit, ctx.config.general.recent_runs_limit);
        book.recent(suite, limit)
            .iter()
            .map(RunSummary::from)
            .collect::<Vec<_>>()
    };
    output(&rows, flags.format)
}

pub async fn show(run_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let run = require_run(ctx, run_id).await?;
    match flags.format {
        OutputFormat::Table => {
            let rows = run.results.iter().map(ResultRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&run, flags.format),
    }
}
