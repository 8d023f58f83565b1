//! In-memory backend for runner tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use vrd_client::ClientError;
use vrd_core::entities::{Prediction, TestCase, TestRun, TestSuite, Validation};
use vrd_core::enums::{RunStatus, Strategy, Verdict};
use vrd_core::wire::{ResultUpdate, ResultUpdateAck, RunPatch};

use crate::backend::RunBackend;

pub fn boom(message: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        message: message.to_string(),
    }
}

/// Suite whose case `i` asks `q{i}` and expects `a{i}`.
pub fn suite(id: &str, cases: usize) -> TestSuite {
    let now = Utc::now();
    TestSuite {
        id: id.to_string(),
        name: format!("Suite {id}"),
        description: String::new(),
        test_cases: (0..cases)
            .map(|i| TestCase {
                id: format!("case-{i}"),
                question: format!("q{i}"),
                expected_answer: format!("a{i}"),
                created_at: now,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

/// Completed run with no results, started `age_minutes` ago.
pub fn run(id: &str, favorite: Option<u32>, age_minutes: i64) -> TestRun {
    TestRun {
        id: id.to_string(),
        suite_id: "suite-1".to_string(),
        suite_name: "Suite suite-1".to_string(),
        strategy: Strategy::RuleBased,
        results: Vec::new(),
        status: RunStatus::Completed,
        comment: String::new(),
        is_favorite: favorite.is_some(),
        favorite_order: favorite.unwrap_or(0),
        started_at: Utc::now() - Duration::minutes(age_minutes),
        completed_at: None,
        pass_rate: 0,
    }
}

/// Backend double keeping runs in memory.
///
/// Predictions answer `a{i}` for `q{i}` unless overridden in `answers`;
/// validation passes on exact match. Result writes land in the stored run. Every call suspends a few times so
/// concurrent items interleave.
#[derive(Default)]
pub struct FakeBackend {
    pub suites: RefCell<HashMap<String, TestSuite>>,
    pub runs: RefCell<Vec<TestRun>>,
    pub answers: RefCell<HashMap<String, String>>,
    pub failing_questions: RefCell<HashSet<String>>,
    pub failing_patches: RefCell<HashSet<String>>,
    pub fail_updates: Cell<bool>,
    pub patches: RefCell<Vec<(String, RunPatch)>>,
    pub updates: RefCell<Vec<(String, String, ResultUpdate)>>,
    pub predictions: RefCell<Vec<String>>,
    in_flight: Cell<usize>,
    pub peak_in_flight: Cell<usize>,
    next_id: Cell<u32>,
}

impl FakeBackend {
    pub fn with_suite(suite: TestSuite) -> Self {
        let backend = Self::default();
        backend.suites.borrow_mut().insert(suite.id.clone(), suite);
        backend
    }

    pub fn with_runs(runs: Vec<TestRun>) -> Self {
        let backend = Self::default();
        *backend.runs.borrow_mut() = runs;
        backend
    }

    pub fn stored_run(&self, run_id: &str) -> Option<TestRun> {
        self.runs.borrow().iter().find(|run| run.id == run_id).cloned()
    }

    async fn suspend(&self, times: usize) {
        for _ in 0..times {
            tokio::task::yield_now().await;
        }
    }
}

impl RunBackend for FakeBackend {
    async fn list_runs(&self) -> Result<Vec<TestRun>, ClientError> {
        self.suspend(1).await;
        Ok(self.runs.borrow().clone())
    }

    async fn create_run(&self, suite_id: &str, strategy: &Strategy) -> Result<TestRun, ClientError> {
        self.suspend(1).await;
        let suite = self
            .suites
            .borrow()
            .get(suite_id)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "Test suite not found".to_string(),
            })?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let run = TestRun {
            id: format!("run-{id}"),
            suite_id: suite.id.clone(),
            suite_name: suite.name.clone(),
            strategy: strategy.clone(),
            results: suite.placeholder_results(),
            status: RunStatus::Pending,
            comment: String::new(),
            is_favorite: false,
            favorite_order: 0,
            started_at: Utc::now(),
            completed_at: None,
            pass_rate: 0,
        };
        self.runs.borrow_mut().push(run.clone());
        Ok(run)
    }

    async fn patch_run(&self, run_id: &str, patch: &RunPatch) -> Result<TestRun, ClientError> {
        self.suspend(1).await;
        self.patches
            .borrow_mut()
            .push((run_id.to_string(), patch.clone()));
        if self.failing_patches.borrow().contains(run_id) {
            return Err(boom("Failed to update run"));
        }
        let mut runs = self.runs.borrow_mut();
        let run = runs
            .iter_mut()
            .find(|run| run.id == run_id)
            .ok_or_else(|| boom("Test run not found"))?;
        if let Some(status) = patch.status {
            run.status = status;
            if status == RunStatus::Completed {
                run.completed_at = Some(Utc::now());
            }
        }
        if let Some(comment) = &patch.comment {
            run.comment.clone_from(comment);
        }
        if let Some(is_favorite) = patch.is_favorite {
            run.is_favorite = is_favorite;
        }
        if let Some(order) = patch.favorite_order {
            run.favorite_order = order;
        }
        if let Some(pass_rate) = patch.pass_rate {
            run.pass_rate = pass_rate;
        }
        Ok(run.clone())
    }

    async fn delete_run(&self, run_id: &str) -> Result<(), ClientError> {
        self.suspend(1).await;
        self.runs.borrow_mut().retain(|run| run.id != run_id);
        Ok(())
    }

    async fn predict(&self, question: &str, _strategy: &Strategy) -> Result<Prediction, ClientError> {
        self.predictions.borrow_mut().push(question.to_string());
        self.in_flight.set(self.in_flight.get() + 1);
        self.peak_in_flight
            .set(self.peak_in_flight.get().max(self.in_flight.get()));
        // Later questions resolve sooner so completions arrive out of order.
        let delay = question
            .trim_start_matches('q')
            .parse::<usize>()
            .map_or(1, |i| 5 - i % 5);
        self.suspend(delay).await;
        self.in_flight.set(self.in_flight.get() - 1);

        if self.failing_questions.borrow().contains(question) {
            return Err(boom("Prediction failed"));
        }
        let answer = self
            .answers
            .borrow()
            .get(question)
            .cloned()
            .unwrap_or_else(|| question.replacen('q', "a", 1));
        Ok(Prediction {
            answer,
            retrieved_articles: vec![format!("Art. {question}")],
            llm_extracted_articles: Vec::new(),
        })
    }

    async fn validate(
        &self,
        _question: &str,
        expected_answer: &str,
        actual_answer: &str,
    ) -> Result<Validation, ClientError> {
        self.suspend(1).await;
        let passed = expected_answer == actual_answer;
        Ok(Validation {
            passed,
            similarity: if passed { 1.0 } else { 0.2 },
            explanation: if passed { "match" } else { "mismatch" }.to_string(),
        })
    }

    async fn update_result(
        &self,
        run_id: &str,
        test_case_id: &str,
        update: &ResultUpdate,
    ) -> Result<Option<ResultUpdateAck>, ClientError> {
        self.suspend(1).await;
        self.updates.borrow_mut().push((
            run_id.to_string(),
            test_case_id.to_string(),
            update.clone(),
        ));
        if self.fail_updates.get() {
            return Err(boom("Failed to update result"));
        }
        let mut runs = self.runs.borrow_mut();
        let stored = runs
            .iter_mut()
            .find(|run| run.id == run_id)
            .and_then(|run| {
                run.results
                    .iter_mut()
                    .find(|result| result.test_case_id == test_case_id)
            });
        if let Some(result) = stored {
            result.actual_answer.clone_from(&update.actual_answer);
            result.passed = Verdict::from_passed(update.passed);
            result.explanation.clone_from(&update.explanation);
            result.similarity = update.similarity;
            result.retrieved_articles = update.retrieved_articles.clone().unwrap_or_default();
            result.llm_extracted_articles = update.llm_extracted_articles.clone().unwrap_or_default();
        }
        Ok(Some(ResultUpdateAck {
            retrieval_recall: Some(if update.passed { 1.0 } else { 0.0 }),
            answer_precision: Some(0.5),
            llm_extracted_articles: None,
        }))
    }
}
