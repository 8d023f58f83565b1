//! Backend operations the runner depends on.

use vrd_client::{ApiClient, ClientError};
use vrd_core::entities::{Prediction, TestRun, Validation};
use vrd_core::enums::Strategy;
use vrd_core::wire::{ResultUpdate, ResultUpdateAck, RunPatch};

/// The subset of the backend API that run execution and annotation need.
///
/// Futures are not required to be `Send`: a whole batch runs on one task.
#[allow(async_fn_in_trait)]
pub trait RunBackend {
    async fn list_runs(&self) -> Result<Vec<TestRun>, ClientError>;

    async fn create_run(&self, suite_id: &str, strategy: &Strategy) -> Result<TestRun, ClientError>;

    async fn patch_run(&self, run_id: &str, patch: &RunPatch) -> Result<TestRun, ClientError>;

    async fn delete_run(&self, run_id: &str) -> Result<(), ClientError>;

    async fn predict(&self, question: &str, strategy: &Strategy) -> Result<Prediction, ClientError>;

    async fn validate(
        &self,
        question: &str,
        expected_answer: &str,
        actual_answer: &str,
    ) -> Result<Validation, ClientError>;

    async fn update_result(
        &self,
        run_id: &str,
        test_case_id: &str,
        update: &ResultUpdate,
    ) -> Result<Option<ResultUpdateAck>, ClientError>;
}

impl RunBackend for ApiClient {
    async fn list_runs(&self) -> Result<Vec<TestRun>, ClientError> {
        Self::list_runs(self).await
    }

    async fn create_run(&self, suite_id: &str, strategy: &Strategy) -> Result<TestRun, ClientError> {
        Self::create_run(self, suite_id, strategy).await
    }

    async fn patch_run(&self, run_id: &str, patch: &RunPatch) -> Result<TestRun, ClientError> {
        Self::patch_run(self, run_id, patch).await
    }

    async fn delete_run(&self, run_id: &str) -> Result<(), ClientError> {
        Self::delete_run(self, run_id).await
    }

    async fn predict(&self, question: &str, strategy: &Strategy) -> Result<Prediction, ClientError> {
        Self::predict(self, question, strategy).await
    }

    async fn validate(
        &self,
        question: &str,
        expected_answer: &str,
        actual_answer: &str,
    ) -> Result<Validation, ClientError> {
        Self::validate(self, question, expected_answer, actual_answer).await
    }

    async fn update_result(
        &self,
        run_id: &str,
        test_case_id: &str,
        update: &ResultUpdate,
    ) -> Result<Option<ResultUpdateAck>, ClientError> {
        Self::update_result(self, run_id, test_case_id, update).await
    }
}
