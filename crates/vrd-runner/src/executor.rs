//! Run lifecycle around the bounded pool.
//!
//! ```text
//! start:  create run (pending) ─┐
//! rerun:  create run (pending) ─┼─► running ─► [pool over every slot] ─► completed
//! resume: existing run (≠ completed) ─┘
//! ```
//!
//! Each slot goes through predict, validate, local write, and write-through.
//! A slot whose calls fail is recorded as a failed result and the batch goes
//! on. The pass rate is counted from the final verdicts once every worker
//! has stopped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use vrd_client::ClientError;
use vrd_core::entities::{TestCaseResult, TestRun, TestSuite};
use vrd_core::enums::{RunStatus, Strategy};
use vrd_core::scoring::{self, RunProgress};
use vrd_core::wire::RunPatch;

use crate::backend::RunBackend;
use crate::error::RunnerError;
use crate::observer::{NoopObserver, RunObserver};
use crate::pool::run_bounded;

static NOOP: NoopObserver = NoopObserver;

/// Executes test runs against a backend with bounded concurrency.
pub struct RunExecutor<'a, B> {
    backend: &'a B,
    observer: &'a dyn RunObserver,
    concurrency: usize,
}

impl<'a, B: RunBackend> RunExecutor<'a, B> {
    /// Executor running at most `concurrency` items at once (0 is treated as 1).
    pub fn new(backend: &'a B, concurrency: usize) -> Self {
        Self {
            backend,
            observer: &NOOP,
            concurrency,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn RunObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Create a new run of `suite` under `strategy` and execute it.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if creating the run or patching its
    /// status fails. Item failures are recorded in the returned run instead.
    pub async fn start(&self, suite: &TestSuite, strategy: &Strategy) -> Result<TestRun, RunnerError> {
        let mut run = self.backend.create_run(&suite.id, strategy).await?;
        if run.results.is_empty() {
            run.results = suite.placeholder_results();
        }
        if run.suite_name.is_empty() {
            run.suite_name.clone_from(&suite.name);
        }
        tracing::info!(run_id = %run.id, suite_id = %suite.id, strategy = %strategy, cases = run.results.len(), "created test run");
        self.execute(run).await
    }

    /// Execute `previous`'s suite again as a brand-new run.
    ///
    /// `previous` is left untouched; `strategy` defaults to the one it used.
    ///
    /// # Errors
    ///
    /// Same as [`RunExecutor::start`].
    pub async fn rerun(&self, previous: &TestRun, strategy: Option<&Strategy>) -> Result<TestRun, RunnerError> {
        let strategy = strategy.unwrap_or(&previous.strategy);
        let mut run = self.backend.create_run(&previous.suite_id, strategy).await?;
        if run.results.is_empty() {
            run.results = previous
                .results
                .iter()
                .map(|result| TestCaseResult {
                    test_case_id: result.test_case_id.clone(),
                    question: result.question.clone(),
                    expected_answer: result.expected_answer.clone(),
                    ..TestCaseResult::default()
                })
                .collect();
        }
        tracing::info!(run_id = %run.id, previous_run_id = %previous.id, strategy = %strategy, "re-running suite");
        self.execute(run).await
    }

    /// Drive every slot of an unfinished run through execution again,
    /// including slots that already carry a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Core`] if the run is already completed, or
    /// [`RunnerError::Client`] if a status patch fails.
    pub async fn resume(&self, run: TestRun) -> Result<TestRun, RunnerError> {
        tracing::info!(run_id = %run.id, status = %run.status, "resuming test run");
        self.execute(run).await
    }

    async fn execute(&self, mut run: TestRun) -> Result<TestRun, RunnerError> {
        run.transition(RunStatus::Running)?;
        self.backend
            .patch_run(&run.id, &RunPatch::status(RunStatus::Running))
            .await?;
        self.observer.run_started(&run);

        let items = run.results.clone();
        let run_id = run.id.clone();
        let strategy = run.strategy.clone();
        let shared = Mutex::new(run);

        run_bounded(items, self.concurrency, |slot, index| {
            let (run_id, strategy, shared) = (&run_id, &strategy, &shared);
            async move {
                self.observer.item_started(index, &slot);
                if let Err(err) = self.attempt(run_id, strategy, shared, &slot, index).await {
                    self.record_failure(run_id, shared, &slot, index, &err).await;
                }
                let (result, progress) = {
                    let run = lock(shared);
                    (run.results[index].clone(), RunProgress::of(&run.results))
                };
                tracing::debug!(%run_id, index, verdict = %result.passed, "item finished");
                self.observer.item_finished(index, &result, progress);
            }
        })
        .await;

        let mut run = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        let pass_rate = scoring::pass_rate(&run.results);
        run.transition(RunStatus::Completed)?;
        let persisted = self
            .backend
            .patch_run(&run.id, &RunPatch::completed(pass_rate))
            .await?;
        run.pass_rate = pass_rate;
        run.completed_at = persisted.completed_at.or_else(|| Some(Utc::now()));

        tracing::info!(run_id = %run.id, pass_rate, "test run completed");
        self.observer.run_finished(&run);
        Ok(run)
    }

    /// Predict, validate, and write one slot through.
    async fn attempt(
        &self,
        run_id: &str,
        strategy: &Strategy,
        shared: &Mutex<TestRun>,
        slot: &TestCaseResult,
        index: usize,
    ) -> Result<(), ClientError> {
        let prediction = self.backend.predict(&slot.question, strategy).await?;
        let validation = self
            .backend
            .validate(&slot.question, &slot.expected_answer, &prediction.answer)
            .await?;
        let result = slot.with_outcome(prediction, validation);
        let update = result.to_update();

        // Local state moves ahead of the write-through.
        store(shared, index, result);
        let ack = self
            .backend
            .update_result(run_id, &slot.test_case_id, &update)
            .await?;
        if let Some(ack) = ack {
            lock(shared).results[index].merge_ack(ack);
        }
        Ok(())
    }

    async fn record_failure(
        &self,
        run_id: &str,
        shared: &Mutex<TestRun>,
        slot: &TestCaseResult,
        index: usize,
        err: &ClientError,
    ) {
        tracing::warn!(%run_id, index, test_case_id = %slot.test_case_id, error = %err, "test case failed");
        let failed = slot.with_error(&err.to_string());
        let update = failed.to_error_update();
        store(shared, index, failed);
        if let Err(persist_err) = self
            .backend
            .update_result(run_id, &slot.test_case_id, &update)
            .await
        {
            tracing::warn!(%run_id, index, error = %persist_err, "could not persist failed result");
        }
    }
}

fn lock(shared: &Mutex<TestRun>) -> MutexGuard<'_, TestRun> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn store(shared: &Mutex<TestRun>, index: usize, result: TestCaseResult) {
    if let Err(err) = lock(shared).record_outcome(index, result) {
        tracing::error!(index, error = %err, "dropped result for missing slot");
    }
}
