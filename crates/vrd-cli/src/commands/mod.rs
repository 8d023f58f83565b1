pub mod case;
pub mod chat;
pub mod dispatch;
pub mod docs;
pub mod run;
pub mod sessions;
pub mod shared;
pub mod strategies;
pub mod suite;
