use std::path::PathBuf;

use clap::Subcommand;

/// Knowledge-base document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocsCommands {
    /// List uploaded documents and their ingestion status.
    List,
    /// Upload a document.
    Upload {
        /// File to upload.
        path: PathBuf,
    },
}
