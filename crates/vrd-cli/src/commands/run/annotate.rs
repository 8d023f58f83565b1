use vrd_runner::RunBook;

use crate::cli::GlobalFlags;
use crate::commands::run::types::{FavoriteResponse, OverrideResponse, RunSummary};
use crate::context::AppContext;
use crate::output::output;

pub async fn override_verdict(
    run_id: &str,
    test_case_id: &str,
    passed: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut book = RunBook::load(&ctx.client).await?;
    let pass_rate = book.override_verdict(run_id, test_case_id, passed).await?;
    output(
        &OverrideResponse {
            run_id: run_id.to_string(),
            test_case_id: test_case_id.to_string(),
            passed,
            pass_rate,
        },
        flags.format,
    )
}

pub async fn favorite(run_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut book = RunBook::load(&ctx.client).await?;
    let is_favorite = book.toggle_favorite(run_id).await?;
    output(
        &FavoriteResponse {
            run_id: run_id.to_string(),
            is_favorite,
        },
        flags.format,
    )
}

pub async fn comment(run_id: &str, text: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut book = RunBook::load(&ctx.client).await?;
    let run = book.save_comment(run_id, text).await?;
    output(&RunSummary::from(run), flags.format)
}

pub async fn reorder(run_id: &str, position: usize, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut book = RunBook::load(&ctx.client).await?;
    book.move_favorite(run_id, position).await?;
    let rows = book
        .favorites()
        .into_iter()
        .map(RunSummary::from)
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}

pub async fn delete(run_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut book = RunBook::load(&ctx.client).await?;
    book.delete(run_id).await?;
    output(&serde_json::json!({ "deleted": run_id }), flags.format)
}
