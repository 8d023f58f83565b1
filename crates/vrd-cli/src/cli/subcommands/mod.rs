mod case;
mod chat;
mod docs;
mod run;
mod suite;

pub use case::CaseCommands;
pub use chat::ChatCommands;
pub use docs::DocsCommands;
pub use run::RunCommands;
pub use suite::SuiteCommands;
