use clap::Subcommand;

/// Chat commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChatCommands {
    /// Send a message, continuing a session if given.
    Send {
        /// Message text.
        message: String,
        /// Session to continue (a new one is created otherwise).
        #[arg(long)]
        session: Option<String>,
        /// Answer-generation strategy (defaults to chat.default_strategy).
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Show the message history of a session.
    History {
        /// Session ID.
        session: String,
    },
}
