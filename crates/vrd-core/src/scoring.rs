//! Pass-rate and progress arithmetic over a run's result sequence.
//!
//! Totals are always recomputed from the verdicts themselves, never from
//! counters accumulated while items complete.

use serde::Serialize;

use crate::entities::TestCaseResult;
use crate::enums::Verdict;

/// `round(100 × passed / total)`, rounding halves up. Zero results yield 0.
#[must_use]
pub fn pass_rate(results: &[TestCaseResult]) -> u32 {
    let total = results.len() as u64;
    if total == 0 {
        return 0;
    }
    let passed = count(results, Verdict::Passed) as u64;
    let rate = (200 * passed + total) / (2 * total);
    u32::try_from(rate).unwrap_or(100)
}

fn count(results: &[TestCaseResult], verdict: Verdict) -> usize {
    results.iter().filter(|result| result.passed == verdict).count()
}

/// Snapshot of how far a run has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunProgress {
    pub total: usize,
    /// Results with a verdict (passed or failed).
    pub completed: usize,
    pub passed: usize,
    pub failed: usize,
    /// Completed share in percent; 0 when there are no results.
    pub percent: f64,
}

impl RunProgress {
    #[must_use]
    pub fn of(results: &[TestCaseResult]) -> Self {
        let total = results.len();
        let passed = count(results, Verdict::Passed);
        let failed = count(results, Verdict::Failed);
        let completed = passed + failed;
        #[allow(clippy::cast_precision_loss)]
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            completed,
            passed,
            failed,
            percent,
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}
