use clap::Subcommand;

use crate::cli::subcommands::{CaseCommands, ChatCommands, DocsCommands, RunCommands, SuiteCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Chat with the assistant.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
    /// List chat sessions.
    Sessions,
    /// Knowledge-base documents.
    Docs {
        #[command(subcommand)]
        action: DocsCommands,
    },
    /// Test suites.
    Suite {
        #[command(subcommand)]
        action: SuiteCommands,
    },
    /// Test cases inside a suite.
    Case {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Execute and annotate test runs.
    Run {
        #[command(subcommand)]
        action: RunCommands,
    },
    /// List the answer-generation strategies the backend ships with.
    Strategies,
}
