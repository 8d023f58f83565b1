use clap::{ArgGroup, Subcommand};

/// Test run commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RunCommands {
    /// Start a new run of a suite.
    Start {
        /// Suite ID.
        suite: String,
        /// Answer-generation strategy (defaults to runner.default_strategy).
        #[arg(long)]
        strategy: Option<String>,
        /// Max concurrent test cases (defaults to runner.concurrency).
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Run a finished run's suite again as a new run.
    Rerun {
        /// Run ID.
        run: String,
        /// Strategy for the new run (defaults to the original run's).
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Execute every case of an unfinished run again.
    Resume {
        /// Run ID.
        run: String,
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// List runs, newest first.
    List {
        /// Only runs of this suite.
        #[arg(long)]
        suite: Option<String>,
        /// Only favorites, in favorite order.
        #[arg(long)]
        favorites: bool,
    },
    /// Show a run with all results.
    Show {
        /// Run ID.
        run: String,
    },
    /// Manually set a result's verdict.
    #[command(group(ArgGroup::new("verdict").required(true).args(["pass", "fail"])))]
    Override {
        /// Run ID.
        run: String,
        /// Test case ID.
        case: String,
        #[arg(long)]
        pass: bool,
        #[arg(long)]
        fail: bool,
    },
    /// Toggle a run's favorite flag.
    Favorite {
        /// Run ID.
        run: String,
    },
    /// Set a run's comment.
    Comment {
        /// Run ID.
        run: String,
        text: String,
    },
    /// Move a favorite to a new position (0-based).
    Reorder {
        /// Run ID.
        run: String,
        position: usize,
    },
    /// Delete a run.
    Delete {
        /// Run ID.
        run: String,
    },
}
