use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocsCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `vrd docs`.
pub async fn handle(action: &DocsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DocsCommands::List => {
            let documents = ctx.client.list_documents().await?;
            output(&documents, flags.format)
        }
        DocsCommands::Upload { path } => {
            let spinner = Progress::spinner(&format!("uploading {}", path.display()));
            let uploaded = ctx
                .client
                .upload_document(path)
                .await
                .with_context(|| format!("failed to upload {}", path.display()));
            match uploaded {
                Ok(document) => {
                    spinner.finish_clear();
                    output(&document, flags.format)
                }
                Err(error) => {
                    spinner.finish_err("upload failed");
                    Err(error)
                }
            }
        }
    }
}
