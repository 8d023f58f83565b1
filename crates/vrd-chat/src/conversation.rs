//! Conversation state machine.
//!
//! Selecting a session has three cases:
//! 1. the id is the session this conversation just created: keep the
//!    messages already shown and consume the marker;
//! 2. any other id: load its history, replacing the message list;
//! 3. no id: start a fresh conversation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vrd_core::entities::{HistoryMessage, Source};
use vrd_core::enums::{Role, Strategy};

use crate::backend::ChatBackend;
use crate::marker::IntentMarker;

/// Bubble text shown when a message could not be delivered.
pub const SEND_ERROR: &str = "Error: Could not connect to the backend.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            is_error: false,
        }
    }
}

impl From<HistoryMessage> for ChatMessage {
    fn from(message: HistoryMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
            timestamp: message.timestamp,
            sources: Vec::new(),
            is_error: false,
        }
    }
}

/// What [`Conversation::select_session`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// The session was just created here; messages were kept as they are.
    Kept,
    /// History loaded with this many messages.
    Loaded(usize),
    /// History could not be loaded; the message list was cleared.
    LoadFailed(String),
    /// Fresh conversation.
    Reset,
}

/// What [`Conversation::send`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank; nothing was sent.
    Empty,
    /// The assistant answered. `created_session` is set when the backend
    /// opened a session other than the active one.
    Answered { created_session: Option<String> },
    /// Delivery failed and an error bubble was appended.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: Option<String>,
    messages: Vec<ChatMessage>,
    input: String,
    strategy: Strategy,
    thinking: bool,
    just_created: IntentMarker,
}

impl Conversation {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            session_id: None,
            messages: Vec::new(),
            input: String::new(),
            strategy,
            thinking: false,
            just_created: IntentMarker::default(),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// True while a send is awaiting the assistant.
    #[must_use]
    pub const fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Switch to `session_id`, or to a new conversation when `None`.
    pub async fn select_session(
        &mut self,
        backend: &impl ChatBackend,
        session_id: Option<&str>,
    ) -> SessionChange {
        let Some(session_id) = session_id else {
            self.session_id = None;
            self.messages.clear();
            self.input.clear();
            self.thinking = false;
            self.just_created.clear();
            return SessionChange::Reset;
        };

        if self.just_created.consume(session_id) {
            self.session_id = Some(session_id.to_string());
            return SessionChange::Kept;
        }

        self.session_id = Some(session_id.to_string());
        self.input.clear();
        self.thinking = false;
        match backend.session_history(session_id).await {
            Ok(history) => {
                self.messages = history.messages.into_iter().map(ChatMessage::from).collect();
                tracing::debug!(session_id, messages = self.messages.len(), "loaded session history");
                SessionChange::Loaded(self.messages.len())
            }
            Err(err) => {
                tracing::warn!(session_id, error = %err, "failed to load session history");
                self.messages.clear();
                SessionChange::LoadFailed(err.to_string())
            }
        }
    }

    /// Send the current input as a user message.
    ///
    /// The user message is shown before the backend answers. A session id in
    /// the reply that differs from the active one becomes the active session
    /// and is marked as created here.
    pub async fn send(&mut self, backend: &impl ChatBackend) -> SendOutcome {
        if self.input.trim().is_empty() {
            return SendOutcome::Empty;
        }

        let message = std::mem::take(&mut self.input);
        self.thinking = true;
        self.messages.push(ChatMessage::new(Role::User, &message));

        let sent_in = self.session_id.clone();
        let outcome = match backend
            .send_chat(&message, &self.strategy, sent_in.as_deref())
            .await
        {
            Ok(response) => {
                let created_session = response
                    .session_id
                    .filter(|id| sent_in.as_deref() != Some(id.as_str()));
                if let Some(id) = &created_session {
                    self.just_created.set(id);
                    self.session_id = Some(id.clone());
                    tracing::debug!(session_id = %id, "backend opened a new session");
                }
                self.messages.push(ChatMessage {
                    sources: response.sources,
                    ..ChatMessage::new(Role::Assistant, &response.answer)
                });
                SendOutcome::Answered { created_session }
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat message failed");
                self.messages.push(ChatMessage {
                    is_error: true,
                    ..ChatMessage::new(Role::Assistant, SEND_ERROR)
                });
                SendOutcome::Failed(err.to_string())
            }
        };
        self.thinking = false;
        outcome
    }
}
