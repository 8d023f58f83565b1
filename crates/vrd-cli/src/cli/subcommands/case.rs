use clap::Subcommand;

/// Test case commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// Add a case to a suite.
    Add {
        /// Suite ID.
        suite: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        expected: String,
    },
    /// Replace a case's question and expected answer.
    Update {
        /// Case ID.
        id: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        expected: String,
    },
    /// Delete a case.
    Delete {
        /// Case ID.
        id: String,
    },
}
