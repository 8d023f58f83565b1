//! Test runs and per-case results.

use vrd_core::entities::TestRun;
use vrd_core::enums::Strategy;
use vrd_core::wire::{CreateRunRequest, ResultUpdate, ResultUpdateAck, RunPatch};

use crate::http::{check_response, check_response_or, decode};
use crate::{ApiClient, ClientError, segment};

impl ApiClient {
    /// List every run across all suites.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn list_runs(&self) -> Result<Vec<TestRun>, ClientError> {
        let resp = self.http.get(self.url("/test-runs")).send().await?;
        decode(check_response(resp).await?).await
    }

    /// Look up one run by id. Returns `None` if the backend does not list it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if listing runs fails.
    pub async fn find_run(&self, run_id: &str) -> Result<Option<TestRun>, ClientError> {
        Ok(self
            .list_runs()
            .await?
            .into_iter()
            .find(|run| run.id == run_id))
    }

    /// Create a new run for `suite_id`. The backend seeds one unvalidated
    /// result per case.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn create_run(&self, suite_id: &str, strategy: &Strategy) -> Result<TestRun, ClientError> {
        let body = CreateRunRequest { suite_id, strategy };
        let resp = self.http.post(self.url("/test-runs")).json(&body).send().await?;
        decode(check_response(resp).await?).await
    }

    /// Apply a partial update (status, comment, favorite, order, pass rate).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn patch_run(&self, run_id: &str, patch: &RunPatch) -> Result<TestRun, ClientError> {
        let url = self.url(&format!("/test-runs/{}", segment(run_id)));
        let resp = self.http.patch(url).json(patch).send().await?;
        decode(check_response_or(resp, "Failed to update run").await?).await
    }

    /// Write one case's result. Returns the metrics the backend computed, or
    /// `None` if it answered without a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn update_result(
        &self,
        run_id: &str,
        test_case_id: &str,
        update: &ResultUpdate,
    ) -> Result<Option<ResultUpdateAck>, ClientError> {
        let url = self.url(&format!(
            "/test-runs/{}/results/{}",
            segment(run_id),
            segment(test_case_id)
        ));
        let resp = self.http.put(url).json(update).send().await?;
        let body = check_response(resp).await?.text().await?;
        Ok(parse_ack(&body))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn delete_run(&self, run_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/test-runs/{}", segment(run_id)));
        check_response_or(self.http.delete(url).send().await?, "Failed to delete test run").await?;
        Ok(())
    }
}

fn parse_ack(body: &str) -> Option<ResultUpdateAck> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
            .inspect_err(|e| tracing::debug!(%e, "ignoring malformed result acknowledgement"))
            .ok(),
        _ => None,
    }
}
