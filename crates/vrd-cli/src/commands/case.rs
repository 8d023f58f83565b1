use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vrd case`.
pub async fn handle(action: &CaseCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CaseCommands::Add {
            suite,
            question,
            expected,
        } => {
            let case = ctx.client.create_case(suite, question, expected).await?;
            output(&case, flags.format)
        }
        CaseCommands::Update {
            id,
            question,
            expected,
        } => {
            let case = ctx.client.update_case(id, question, expected).await?;
            output(&case, flags.format)
        }
        CaseCommands::Delete { id } => {
            ctx.client.delete_case(id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
