use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vrd sessions`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut sessions = ctx.client.list_sessions().await?;
    if let Some(limit) = flags.limit {
        sessions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    output(&sessions, flags.format)
}
