//! Chat messages and session history.

use vrd_core::entities::{ChatResponse, Session, SessionHistory};
use vrd_core::enums::Strategy;
use vrd_core::wire::ChatRequest;

use crate::http::{check_response, check_response_or, decode};
use crate::{ApiClient, ClientError, segment};

impl ApiClient {
    /// Send a chat message, continuing `session_id` if given.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn send_chat(
        &self,
        message: &str,
        strategy: &Strategy,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ClientError> {
        let body = ChatRequest {
            message,
            strategy,
            session_id,
        };
        let resp = self.http.post(self.url("/chat")).json(&body).send().await?;
        decode(check_response_or(resp, "Chat failed").await?).await
    }

    /// List chat sessions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ClientError> {
        let resp = self.http.get(self.url("/sessions")).send().await?;
        decode(check_response(resp).await?).await
    }

    /// Full message history of one session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn session_history(&self, session_id: &str) -> Result<SessionHistory, ClientError> {
        let url = self.url(&format!("/sessions/{}", segment(session_id)));
        let resp = self.http.get(url).send().await?;
        decode(check_response_or(resp, "Failed to load session history").await?).await
    }
}
