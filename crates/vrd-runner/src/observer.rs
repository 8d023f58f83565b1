use vrd_core::entities::{TestCaseResult, TestRun};
use vrd_core::scoring::RunProgress;

/// Hooks for reporting run progress. Every method defaults to a no-op.
///
/// Callbacks run inline on the executing task and must not block.
pub trait RunObserver {
    /// The run is about to execute `run.results.len()` items.
    fn run_started(&self, _run: &TestRun) {}

    /// A worker dequeued the item at `index`.
    fn item_started(&self, _index: usize, _slot: &TestCaseResult) {}

    /// The item at `index` has its final local result.
    fn item_finished(&self, _index: usize, _result: &TestCaseResult, _progress: RunProgress) {}

    /// The run reached `completed`.
    fn run_finished(&self, _run: &TestRun) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
