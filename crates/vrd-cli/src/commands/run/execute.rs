use anyhow::Context;
use vrd_core::entities::TestRun;
use vrd_runner::{RunExecutor, RunnerError};

use crate::cli::GlobalFlags;
use crate::commands::run::list::require_run;
use crate::commands::run::types::RunSummary;
use crate::commands::shared::strategy::resolve_strategy;
use crate::commands::suite::require_suite;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::RunProgressView;

fn concurrency(flag: Option<usize>, ctx: &AppContext) -> usize {
    flag.unwrap_or(ctx.config.runner.concurrency)
}

fn finish(result: Result<TestRun, RunnerError>, view: &RunProgressView, flags: &GlobalFlags) -> anyhow::Result<()> {
    match result {
        Ok(run) => output(&RunSummary::from(&run), flags.format),
        Err(error) => {
            view.fail("run aborted");
            Err(error).context("test run did not complete")
        }
    }
}

pub async fn start(
    suite_id: &str,
    strategy: Option<&str>,
    concurrency_flag: Option<usize>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let suite = require_suite(ctx, suite_id).await?;
    let strategy = resolve_strategy(strategy, ctx.config.runner.strategy());
    let view = RunProgressView::default();
    let result = RunExecutor::new(&ctx.client, concurrency(concurrency_flag, ctx))
        .with_observer(&view)
        .start(&suite, &strategy)
        .await;
    finish(result, &view, flags)
}

pub async fn rerun(
    run_id: &str,
    strategy: Option<&str>,
    concurrency_flag: Option<usize>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let previous = require_run(ctx, run_id).await?;
    let strategy = resolve_strategy(strategy, previous.strategy.clone());
    let view = RunProgressView::default();
    let result = RunExecutor::new(&ctx.client, concurrency(concurrency_flag, ctx))
        .with_observer(&view)
        .rerun(&previous, Some(&strategy))
        .await;
    finish(result, &view, flags)
}

pub async fn resume(
    run_id: &str,
    concurrency_flag: Option<usize>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let run = require_run(ctx, run_id).await?;
    if !run.status.is_resumable() {
        anyhow::bail!("run '{run_id}' is already completed; use `vrd run rerun {run_id}` for a new run");
    }
    let view = RunProgressView::default();
    let result = RunExecutor::new(&ctx.client, concurrency(concurrency_flag, ctx))
        .with_observer(&view)
        .resume(run)
        .await;
    finish(result, &view, flags)
}
