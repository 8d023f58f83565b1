use chrono::{DateTime, Utc};
use serde::Serialize;
use vrd_core::entities::{TestCaseResult, TestRun};
use vrd_core::enums::RunStatus;
use vrd_core::scoring::RunProgress;

/// One line of run history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: String,
    pub suite: String,
    pub strategy: String,
    pub status: RunStatus,
    pub pass_rate: u32,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub favorite: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub comment: String,
}

impl From<&TestRun> for RunSummary {
    fn from(run: &TestRun) -> Self {
        let progress = RunProgress::of(&run.results);
        Self {
            id: run.id.clone(),
            suite: run.suite_name.clone(),
            strategy: run.strategy.to_string(),
            status: run.status,
            pass_rate: run.pass_rate,
            passed: progress.passed,
            failed: progress.failed,
            total: progress.total,
            favorite: run.is_favorite.then_some(run.favorite_order),
            started_at: run.started_at,
            comment: run.comment.clone(),
        }
    }
}

/// One result of `vrd run show --format table`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub test_case_id: String,
    pub verdict: String,
    pub similarity: Option<f64>,
    pub question: String,
    pub actual_answer: String,
}

impl From<&TestCaseResult> for ResultRow {
    fn from(result: &TestCaseResult) -> Self {
        Self {
            test_case_id: result.test_case_id.clone(),
            verdict: result.passed.to_string(),
            similarity: result.similarity,
            question: result.question.clone(),
            actual_answer: result.actual_answer.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideResponse {
    pub run_id: String,
    pub test_case_id: String,
    pub passed: bool,
    pub pass_rate: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub run_id: String,
    pub is_favorite: bool,
}
