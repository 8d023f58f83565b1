//! Runner error types.

use thiserror::Error;
use vrd_client::ClientError;
use vrd_core::errors::CoreError;

/// Errors from run orchestration and run annotations.
///
/// Per-item execution failures never surface here; they are recorded as
/// failed results inside the run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A backend call outside the per-item path failed (run creation, status
    /// patches, annotation writes).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A lifecycle or verdict rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("test run not found: {0}")]
    RunNotFound(String),

    #[error("test case {test_case_id} has no result in run {run_id}")]
    UnknownTestCase { run_id: String, test_case_id: String },

    #[error("test run {0} is not a favorite")]
    FavoriteNotFound(String),
}
