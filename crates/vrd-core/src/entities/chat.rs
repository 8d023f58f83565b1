use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Answer to a chat message.
///
/// `session_id` is set when the backend created or continued a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// A retrieved chunk the answer was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub document_id: String,
    pub chunk_id: String,
    pub score: f64,
    pub content: String,
}
