use clap::Subcommand;

/// Test suite commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SuiteCommands {
    /// List suites.
    List,
    /// Show one suite with its cases.
    Show {
        /// Suite ID.
        id: String,
    },
    /// Create a suite.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update a suite's name or description.
    Update {
        /// Suite ID.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a suite and its cases.
    Delete {
        /// Suite ID.
        id: String,
    },
}
