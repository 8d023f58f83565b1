use anyhow::bail;
use serde::Serialize;
use vrd_chat::{Conversation, SendOutcome, SessionChange};
use vrd_core::entities::Source;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChatCommands;
use crate::commands::shared::strategy::resolve_strategy;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatReply {
    session_id: Option<String>,
    new_session: bool,
    answer: String,
    sources: Vec<Source>,
}

/// Handle `vrd chat`.
pub async fn handle(action: &ChatCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ChatCommands::Send {
            message,
            session,
            strategy,
        } => send(message, session.as_deref(), strategy.as_deref(), ctx, flags).await,
        ChatCommands::History { session } => history(session, ctx, flags).await,
    }
}

async fn send(
    message: &str,
    session: Option<&str>,
    strategy: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut conversation = Conversation::new(resolve_strategy(strategy, ctx.config.chat.strategy()));
    if session.is_some()
        && let SessionChange::LoadFailed(error) = conversation.select_session(&ctx.client, session).await
    {
        tracing::warn!(%error, "continuing without session history");
    }

    conversation.set_input(message);
    match conversation.send(&ctx.client).await {
        SendOutcome::Answered { created_session } => {
            let (answer, sources) = conversation
                .messages()
                .last()
                .map(|reply| (reply.content.clone(), reply.sources.clone()))
                .unwrap_or_default();
            output(
                &ChatReply {
                    session_id: conversation.session_id().map(str::to_string),
                    new_session: created_session.is_some(),
                    answer,
                    sources,
                },
                flags.format,
            )
        }
        SendOutcome::Failed(error) => bail!("{} ({error})", vrd_chat::conversation::SEND_ERROR),
        SendOutcome::Empty => bail!("message is empty"),
    }
}

async fn history(session: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut conversation = Conversation::new(ctx.config.chat.strategy());
    match conversation.select_session(&ctx.client, Some(session)).await {
        SessionChange::LoadFailed(error) => bail!("failed to load session '{session}': {error}"),
        _ => output(&conversation.messages(), flags.format),
    }
}
