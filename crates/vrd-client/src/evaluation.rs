//! Answer generation and validation for test execution.

use vrd_core::entities::{Prediction, Validation};
use vrd_core::enums::Strategy;
use vrd_core::wire::{PredictRequest, ValidateRequest};

use crate::http::{check_response_or, decode};
use crate::{ApiClient, ClientError};

impl ApiClient {
    /// Ask the backend to answer `question` with `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] carrying the backend's `detail` (or
    /// "Prediction failed") on a non-success status, or any transport or
    /// parse error.
    pub async fn predict(&self, question: &str, strategy: &Strategy) -> Result<Prediction, ClientError> {
        let body = PredictRequest {
            message: question,
            strategy,
        };
        let resp = self.http.post(self.url("/predict")).json(&body).send().await?;
        decode(check_response_or(resp, "Prediction failed").await?).await
    }

    /// Ask the backend whether `actual_answer` matches `expected_answer`.
    ///
    /// A non-success status from the validator is not an error: it yields a
    /// failed [`Validation`] explaining that the server failed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unparseable body.
    pub async fn validate(
        &self,
        question: &str,
        expected_answer: &str,
        actual_answer: &str,
    ) -> Result<Validation, ClientError> {
        let body = ValidateRequest {
            question,
            expected_answer,
            actual_answer,
        };
        let resp = self.http.post(self.url("/validate")).json(&body).send().await?;
        if !resp.status().is_success() {
            tracing::warn!(status = resp.status().as_u16(), "validation endpoint failed");
            return Ok(Validation::server_error());
        }
        decode(resp).await
    }
}
