//! Entity structs for the Verdict domain.
//!
//! Entities mirror the backend's JSON (`camelCase` keys) and derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for roundtrip and schema
//! validation. Timestamps go through [`crate::wire::timestamp`].

mod chat;
mod document;
mod evaluation;
mod run;
mod session;
mod suite;

pub use chat::{ChatResponse, Source};
pub use document::Document;
pub use evaluation::{Prediction, Validation};
pub use run::{TestCaseResult, TestRun};
pub use session::{HistoryMessage, Session, SessionHistory};
pub use suite::{TestCase, TestSuite};
