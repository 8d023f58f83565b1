//! # vrd-chat
//!
//! Conversation state for chatting with the Verdict assistant.
//!
//! [`Conversation`] owns the visible message list, the composition input,
//! the active session id, and the selected strategy. It talks to the backend
//! through [`ChatBackend`] and never surfaces backend failures as errors:
//! a failed history load shows an empty conversation and a failed send shows
//! an error bubble.

pub mod backend;
pub mod conversation;
pub mod marker;

pub use backend::ChatBackend;
pub use conversation::{ChatMessage, Conversation, SendOutcome, SessionChange};
pub use marker::IntentMarker;
