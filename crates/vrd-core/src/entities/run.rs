use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Prediction, TestCase, Validation};
use crate::enums::{RunStatus, Strategy, Verdict};
use crate::errors::CoreError;
use crate::scoring;
use crate::wire::{ResultUpdate, ResultUpdateAck, null_as_default, percent, timestamp};

/// Outcome of one test case inside one run.
///
/// Question and expected answer are copied from the case when the run is
/// created, so history survives later edits to the case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub test_case_id: String,
    pub question: String,
    pub expected_answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub actual_answer: String,
    #[serde(default)]
    #[schemars(with = "Option<bool>")]
    pub passed: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<String>>")]
    pub retrieved_articles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<String>>")]
    pub expected_articles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<String>>")]
    pub llm_extracted_articles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_recall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_precision: Option<f64>,
}

impl TestCaseResult {
    /// Answer text recorded for an item whose execution failed.
    pub const ERROR_ANSWER: &'static str = "Error";

    /// Unvalidated slot for a case that has not executed yet.
    #[must_use]
    pub fn placeholder(case: &TestCase) -> Self {
        Self {
            test_case_id: case.id.clone(),
            question: case.question.clone(),
            expected_answer: case.expected_answer.clone(),
            ..Self::default()
        }
    }

    /// This slot after a successful prediction and validation.
    ///
    /// Recall and precision from an earlier attempt are dropped; the
    /// write-through ack supplies fresh ones.
    #[must_use]
    pub fn with_outcome(&self, prediction: Prediction, validation: Validation) -> Self {
        Self {
            actual_answer: prediction.answer,
            passed: Verdict::from_passed(validation.passed),
            similarity: Some(validation.similarity),
            explanation: Some(validation.explanation),
            retrieved_articles: prediction.retrieved_articles,
            llm_extracted_articles: prediction.llm_extracted_articles,
            retrieval_recall: None,
            answer_precision: None,
            ..self.clone()
        }
    }

    /// This slot after execution failed with `error`.
    ///
    /// Only the case identity and its expected articles survive; metrics from
    /// any earlier attempt are cleared.
    #[must_use]
    pub fn with_error(&self, error: &str) -> Self {
        Self {
            test_case_id: self.test_case_id.clone(),
            question: self.question.clone(),
            expected_answer: self.expected_answer.clone(),
            actual_answer: Self::ERROR_ANSWER.to_string(),
            passed: Verdict::Failed,
            explanation: Some(error.to_string()),
            expected_articles: self.expected_articles.clone(),
            ..Self::default()
        }
    }

    /// Write-through payload carrying this slot's answer, verdict, and metrics.
    #[must_use]
    pub fn to_update(&self) -> ResultUpdate {
        ResultUpdate {
            actual_answer: self.actual_answer.clone(),
            passed: self.passed == Verdict::Passed,
            explanation: self.explanation.clone(),
            similarity: self.similarity,
            retrieved_articles: Some(self.retrieved_articles.clone()),
            expected_articles: Some(self.expected_articles.clone()),
            llm_extracted_articles: Some(self.llm_extracted_articles.clone()),
        }
    }

    /// Write-through payload for a failed slot: answer, verdict, and error text.
    #[must_use]
    pub fn to_error_update(&self) -> ResultUpdate {
        ResultUpdate::error(
            &self.actual_answer,
            self.explanation.as_deref().unwrap_or_default(),
        )
    }

    /// Merge the metrics the backend computed when the result was written.
    pub fn merge_ack(&mut self, ack: ResultUpdateAck) {
        self.retrieval_recall = Some(ack.retrieval_recall.unwrap_or(0.0));
        self.answer_precision = Some(ack.answer_precision.unwrap_or(0.0));
        if let Some(articles) = ack.llm_extracted_articles {
            self.llm_extracted_articles = articles;
        }
    }
}

/// One execution of a suite under one strategy.
///
/// The result sequence length is fixed when the backend creates the run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: String,
    pub suite_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub suite_name: String,
    #[schemars(with = "String")]
    pub strategy: Strategy,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<TestCaseResult>>")]
    pub results: Vec<TestCaseResult>,
    pub status: RunStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<bool>")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<u32>")]
    pub favorite_order: u32,
    #[serde(with = "timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    pub started_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Whole percent. Fractional rates from the backend are rounded.
    #[serde(default, deserialize_with = "percent::deserialize")]
    #[schemars(with = "Option<f64>")]
    pub pass_rate: u32,
}

impl TestRun {
    /// Move the run to `next`, rejecting transitions the lifecycle forbids.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not reachable from
    /// the current status.
    pub fn transition(&mut self, next: RunStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "test_run".to_string(),
                id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Overwrite the slot at `index` with an execution outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `index` is outside the run's fixed
    /// result sequence.
    pub fn record_outcome(&mut self, index: usize, result: TestCaseResult) -> Result<(), CoreError> {
        let len = self.results.len();
        let slot = self.results.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!("result index {index} out of range for {len} results"))
        })?;
        *slot = result;
        Ok(())
    }

    /// Manually set the verdict of the result for `test_case_id` and recompute
    /// the pass rate from the current verdicts.
    ///
    /// Returns the index of the updated slot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no result carries `test_case_id`, or
    /// [`CoreError::InvalidTransition`] if the result was never validated.
    pub fn override_verdict(&mut self, test_case_id: &str, passed: bool) -> Result<usize, CoreError> {
        let index = self
            .results
            .iter()
            .position(|result| result.test_case_id == test_case_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "test_case_result".to_string(),
                id: test_case_id.to_string(),
            })?;

        let next = Verdict::from_passed(passed);
        let current = self.results[index].passed;
        if current == Verdict::Unvalidated || !current.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "test_case_result".to_string(),
                id: test_case_id.to_string(),
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        self.results[index].passed = next;
        self.pass_rate = scoring::pass_rate(&self.results);
        Ok(index)
    }

    #[must_use]
    pub fn result_index(&self, test_case_id: &str) -> Option<usize> {
        self.results
            .iter()
            .position(|result| result.test_case_id == test_case_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn result(id: &str, passed: Verdict) -> TestCaseResult {
        TestCaseResult {
            test_case_id: id.to_string(),
            question: format!("question {id}"),
            expected_answer: format!("answer {id}"),
            passed,
            ..TestCaseResult::default()
        }
    }

    fn run(results: Vec<TestCaseResult>) -> TestRun {
        TestRun {
            id: "run-1".into(),
            suite_id: "suite-1".into(),
            suite_name: "Suite".into(),
            strategy: Strategy::RuleBased,
            results,
            status: RunStatus::Completed,
            comment: String::new(),
            is_favorite: false,
            favorite_order: 0,
            started_at: Utc::now(),
            completed_at: None,
            pass_rate: 0,
        }
    }

    #[test]
    fn override_recomputes_pass_rate_and_touches_one_slot() {
        let mut run = run(vec![
            result("a", Verdict::Passed),
            result("b", Verdict::Failed),
            result("c", Verdict::Failed),
        ]);
        run.pass_rate = 33;

        let index = run.override_verdict("b", true).unwrap();
        assert_eq!(index, 1);
        assert_eq!(run.pass_rate, 67);
        assert_eq!(run.results.len(), 3);
        assert_eq!(run.results[0].passed, Verdict::Passed);
        assert_eq!(run.results[2].passed, Verdict::Failed);

        run.override_verdict("b", false).unwrap();
        assert_eq!(run.pass_rate, 33);
    }

    #[test]
    fn override_rejects_unknown_and_unvalidated_results() {
        let mut run = run(vec![result("a", Verdict::Unvalidated)]);
        assert!(matches!(
            run.override_verdict("zzz", true),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            run.override_verdict("a", true),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(run.results[0].passed, Verdict::Unvalidated);
    }

    #[test]
    fn record_outcome_keeps_length_fixed() {
        let mut run = run(vec![result("a", Verdict::Unvalidated)]);
        run.record_outcome(0, result("a", Verdict::Passed)).unwrap();
        assert_eq!(run.results[0].passed, Verdict::Passed);
        assert!(run.record_outcome(1, result("b", Verdict::Passed)).is_err());
        assert_eq!(run.results.len(), 1);
    }

    #[test]
    fn completed_run_cannot_restart() {
        let mut run = run(Vec::new());
        let err = run.transition(RunStatus::Running).unwrap_err();
        assert!(err.to_string().contains("from completed to running"));
    }

    #[test]
    fn error_outcome_is_failed_with_explanation() {
        let slot = result("a", Verdict::Unvalidated).with_error("connection refused");
        assert_eq!(slot.passed, Verdict::Failed);
        assert_eq!(slot.actual_answer, TestCaseResult::ERROR_ANSWER);
        assert_eq!(slot.explanation.as_deref(), Some("connection refused"));
        assert_eq!(slot.question, "question a");
    }

    #[test]
    fn write_through_payload_carries_outcome() {
        let slot = result("a", Verdict::Unvalidated).with_outcome(
            Prediction {
                answer: "42".into(),
                retrieved_articles: vec!["Art. 3".into()],
                llm_extracted_articles: Vec::new(),
            },
            Validation {
                passed: true,
                similarity: 0.9,
                explanation: "match".into(),
            },
        );
        let update = slot.to_update();
        assert!(update.passed);
        assert_eq!(update.actual_answer, "42");
        assert_eq!(update.similarity, Some(0.9));
        assert_eq!(update.retrieved_articles, Some(vec!["Art. 3".to_string()]));

        let failed = slot.with_error("timeout").to_error_update();
        assert!(!failed.passed);
        assert_eq!(failed.actual_answer, TestCaseResult::ERROR_ANSWER);
        assert_eq!(failed.explanation.as_deref(), Some("timeout"));
    }

    #[test]
    fn error_clears_metrics_of_an_earlier_attempt() {
        let mut earlier = result("a", Verdict::Passed);
        earlier.similarity = Some(0.9);
        earlier.retrieval_recall = Some(1.0);
        earlier.answer_precision = Some(0.5);
        earlier.retrieved_articles = vec!["Art. old".into()];
        earlier.llm_extracted_articles = vec!["Art. old".into()];
        earlier.expected_articles = vec!["Art. 7".into()];

        let failed = earlier.with_error("Prediction failed");
        assert_eq!(failed.passed, Verdict::Failed);
        assert_eq!(failed.similarity, None);
        assert_eq!(failed.retrieval_recall, None);
        assert_eq!(failed.answer_precision, None);
        assert!(failed.retrieved_articles.is_empty());
        assert!(failed.llm_extracted_articles.is_empty());
        assert_eq!(failed.expected_articles, vec!["Art. 7".to_string()]);

        let update = failed.to_error_update();
        assert_eq!(update, ResultUpdate::error(TestCaseResult::ERROR_ANSWER, "Prediction failed"));
        assert_eq!(update.similarity, None);
        assert_eq!(update.retrieved_articles, None);
    }

    #[test]
    fn new_outcome_drops_stale_recall_and_precision() {
        let mut earlier = result("a", Verdict::Passed);
        earlier.retrieval_recall = Some(1.0);
        earlier.answer_precision = Some(0.5);
        let next = earlier.with_outcome(
            Prediction {
                answer: "x".into(),
                ..Prediction::default()
            },
            Validation {
                passed: false,
                similarity: 0.1,
                explanation: "mismatch".into(),
            },
        );
        assert_eq!(next.retrieval_recall, None);
        assert_eq!(next.answer_precision, None);
    }

    #[test]
    fn decodes_null_fields_and_fractional_pass_rate() {
        let raw = r#"{
            "id": "run-3",
            "suiteId": "suite-1",
            "suiteName": null,
            "strategy": "rule-based",
            "status": "completed",
            "comment": null,
            "isFavorite": null,
            "favoriteOrder": null,
            "startedAt": "2025-03-01T10:00:00",
            "passRate": 66.6667,
            "results": [
                {
                    "testCaseId": "case-1",
                    "question": "q1",
                    "expectedAnswer": "a1",
                    "actualAnswer": null,
                    "passed": true,
                    "retrievedArticles": null,
                    "expectedArticles": null,
                    "llmExtractedArticles": null
                }
            ]
        }"#;
        let run: TestRun = serde_json::from_str(raw).unwrap();
        assert_eq!(run.pass_rate, 67);
        assert_eq!(run.comment, "");
        assert_eq!(run.suite_name, "");
        assert!(!run.is_favorite);
        assert_eq!(run.favorite_order, 0);
        assert_eq!(run.results[0].actual_answer, "");
        assert!(run.results[0].retrieved_articles.is_empty());
        assert!(run.results[0].expected_articles.is_empty());

        let raw = r#"{"id": "run-4", "suiteId": "s", "strategy": "fast-to-g",
            "status": "running", "startedAt": "2025-03-01T10:00:00", "results": null}"#;
        let run: TestRun = serde_json::from_str(raw).unwrap();
        assert!(run.results.is_empty());
        assert_eq!(run.pass_rate, 0);
    }

    #[test]
    fn ack_merge_defaults_missing_metrics_to_zero() {
        let mut slot = result("a", Verdict::Passed);
        slot.llm_extracted_articles = vec!["Art. 1".into()];
        slot.merge_ack(ResultUpdateAck {
            retrieval_recall: Some(0.5),
            answer_precision: None,
            llm_extracted_articles: None,
        });
        assert_eq!(slot.retrieval_recall, Some(0.5));
        assert_eq!(slot.answer_precision, Some(0.0));
        assert_eq!(slot.llm_extracted_articles, vec!["Art. 1".to_string()]);
    }
}
