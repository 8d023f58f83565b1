use vrd_client::{ApiClient, ClientError};
use vrd_core::entities::{ChatResponse, SessionHistory};
use vrd_core::enums::Strategy;

/// Backend calls a conversation needs.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    async fn send_chat(
        &self,
        message: &str,
        strategy: &Strategy,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ClientError>;

    async fn session_history(&self, session_id: &str) -> Result<SessionHistory, ClientError>;
}

impl ChatBackend for ApiClient {
    async fn send_chat(
        &self,
        message: &str,
        strategy: &Strategy,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ClientError> {
        Self::send_chat(self, message, strategy, session_id).await
    }

    async fn session_history(&self, session_id: &str) -> Result<SessionHistory, ClientError> {
        Self::session_history(self, session_id).await
    }
}
