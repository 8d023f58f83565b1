//! Local projection of run history plus the user-driven annotations.
//!
//! Every annotation edits the local projection first and then writes to the
//! backend. Failure handling differs per operation:
//!
//! | Operation         | On backend failure                         |
//! |-------------------|--------------------------------------------|
//! | favorite toggle   | revert to the last confirmed snapshot      |
//! | comment           | local state untouched until the server answers |
//! | verdict override  | reload the authoritative list              |
//! | favorite reorder  | reload the authoritative list              |

use futures::future::join_all;
use vrd_core::entities::TestRun;
use vrd_core::favorites;
use vrd_core::wire::{ResultUpdate, RunPatch};

use crate::backend::RunBackend;
use crate::error::RunnerError;
use crate::projection::Projection;

pub struct RunBook<'a, B> {
    backend: &'a B,
    runs: Projection<Vec<TestRun>>,
}

impl<'a, B: RunBackend> RunBook<'a, B> {
    /// Load every run from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if listing runs fails.
    pub async fn load(backend: &'a B) -> Result<Self, RunnerError> {
        let runs = backend.list_runs().await?;
        Ok(Self::from_runs(backend, runs))
    }

    pub fn from_runs(backend: &'a B, runs: Vec<TestRun>) -> Self {
        Self {
            backend,
            runs: Projection::new(runs),
        }
    }

    /// Replace the projection with the backend's current list.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if listing runs fails; the projection is
    /// left as it was.
    pub async fn reload(&mut self) -> Result<(), RunnerError> {
        let runs = self.backend.list_runs().await?;
        self.runs.reset(runs);
        Ok(())
    }

    /// Runs as currently shown, including unconfirmed edits.
    pub fn runs(&self) -> &[TestRun] {
        self.runs.local()
    }

    #[must_use]
    pub fn get(&self, run_id: &str) -> Option<&TestRun> {
        self.runs().iter().find(|run| run.id == run_id)
    }

    /// Runs of `suite_id` (or of every suite), newest first.
    #[must_use]
    pub fn history(&self, suite_id: Option<&str>) -> Vec<TestRun> {
        favorites::history(self.runs().to_vec(), suite_id)
    }

    /// The `limit` newest runs.
    #[must_use]
    pub fn recent(&self, suite_id: Option<&str>, limit: usize) -> Vec<TestRun> {
        let mut runs = self.history(suite_id);
        runs.truncate(limit);
        runs
    }

    /// Favorited runs in display order.
    #[must_use]
    pub fn favorites(&self) -> Vec<&TestRun> {
        favorites::favorites(self.runs())
    }

    /// Record a run confirmed by the backend, replacing any older copy.
    pub fn upsert(&mut self, run: TestRun) {
        self.runs.commit(|runs| {
            if let Some(existing) = runs.iter_mut().find(|existing| existing.id == run.id) {
                *existing = run.clone();
            } else {
                runs.push(run.clone());
            }
        });
    }

    fn require(&self, run_id: &str) -> Result<&TestRun, RunnerError> {
        self.get(run_id)
            .ok_or_else(|| RunnerError::RunNotFound(run_id.to_string()))
    }

    fn edit_local(&mut self, run_id: &str, edit: impl FnOnce(&mut TestRun)) {
        self.runs.apply(|runs| {
            if let Some(run) = runs.iter_mut().find(|run| run.id == run_id) {
                edit(run);
            }
        });
    }

    /// Flip the favorite flag. Returns the new flag.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::RunNotFound`] for an unknown run, or
    /// [`RunnerError::Client`] after reverting the optimistic flip.
    pub async fn toggle_favorite(&mut self, run_id: &str) -> Result<bool, RunnerError> {
        let favorite = !self.require(run_id)?.is_favorite;
        self.edit_local(run_id, |run| run.is_favorite = favorite);

        match self.backend.patch_run(run_id, &RunPatch::favorite(favorite)).await {
            Ok(updated) => {
                self.upsert(updated);
                self.runs.confirm();
                tracing::debug!(run_id, favorite, "favorite updated");
                Ok(favorite)
            }
            Err(err) => {
                tracing::warn!(run_id, error = %err, "favorite toggle failed, reverting");
                self.runs.revert();
                Err(err.into())
            }
        }
    }

    /// Save the run comment, adopting whatever the backend stored.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::RunNotFound`] for an unknown run, or
    /// [`RunnerError::Client`] if the backend rejects the update.
    pub async fn save_comment(&mut self, run_id: &str, comment: &str) -> Result<&TestRun, RunnerError> {
        self.require(run_id)?;
        let updated = self.backend.patch_run(run_id, &RunPatch::comment(comment)).await?;
        self.upsert(updated);
        self.require(run_id)
    }

    /// Manually set one result's verdict and persist the recomputed pass rate.
    ///
    /// Only that result and the run's pass rate change. Returns the new pass
    /// rate.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::UnknownTestCase`] if the run has no result for
    /// `test_case_id`, [`RunnerError::Core`] if the result was never
    /// validated, or [`RunnerError::Client`] after re-fetching the list when a
    /// write fails.
    pub async fn override_verdict(
        &mut self,
        run_id: &str,
        test_case_id: &str,
        passed: bool,
    ) -> Result<u32, RunnerError> {
        let run = self.require(run_id)?;
        if run.result_index(test_case_id).is_none() {
            return Err(RunnerError::UnknownTestCase {
                run_id: run_id.to_string(),
                test_case_id: test_case_id.to_string(),
            });
        }

        let mut updated = run.clone();
        let index = updated.override_verdict(test_case_id, passed)?;
        let actual_answer = updated.results[index].actual_answer.clone();
        let pass_rate = updated.pass_rate;
        self.edit_local(run_id, |run| *run = updated);

        let persisted = async {
            self.backend
                .update_result(run_id, test_case_id, &ResultUpdate::verdict_only(&actual_answer, passed))
                .await?;
            self.backend.patch_run(run_id, &RunPatch::pass_rate(pass_rate)).await
        }
        .await;

        match persisted {
            Ok(_) => {
                self.runs.confirm();
                tracing::debug!(run_id, test_case_id, passed, pass_rate, "verdict overridden");
                Ok(pass_rate)
            }
            Err(err) => {
                tracing::warn!(run_id, test_case_id, error = %err, "verdict override failed, reloading runs");
                if let Err(reload_err) = self.reload().await {
                    tracing::warn!(error = %reload_err, "reload after failed override also failed");
                    self.runs.revert();
                }
                Err(err.into())
            }
        }
    }

    /// Move the favorite at position `from` to position `to`, renumbering the
    /// whole favorited set `0..M`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Core`] for an out-of-range position, or
    /// [`RunnerError::Client`] after reloading the list when any write fails.
    pub async fn reorder_favorites(&mut self, from: usize, to: usize) -> Result<(), RunnerError> {
        let assignment = favorites::reorder(self.runs(), from, to)?;
        self.runs
            .apply(|runs| favorites::apply_order(runs, &assignment));

        let patches: Vec<(&str, RunPatch)> = assignment
            .iter()
            .map(|(run_id, order)| (run_id.as_str(), RunPatch::favorite_order(*order)))
            .collect();
        let writes = patches
            .iter()
            .map(|(run_id, patch)| self.backend.patch_run(run_id, patch));
        let failure = join_all(writes).await.into_iter().find_map(Result::err);

        if let Some(err) = failure {
            tracing::warn!(error = %err, "favorite reorder failed, reloading runs");
            if let Err(reload_err) = self.reload().await {
                tracing::warn!(error = %reload_err, "reload after failed reorder also failed");
                self.runs.revert();
            }
            return Err(err.into());
        }
        self.runs.confirm();
        Ok(())
    }

    /// Move favorite `run_id` to `position` in the favorites order.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::FavoriteNotFound`] if `run_id` is not a
    /// favorite, otherwise as [`RunBook::reorder_favorites`].
    pub async fn move_favorite(&mut self, run_id: &str, position: usize) -> Result<(), RunnerError> {
        let from = favorites::favorite_position(self.runs(), run_id)
            .ok_or_else(|| RunnerError::FavoriteNotFound(run_id.to_string()))?;
        self.reorder_favorites(from, position).await
    }

    /// Delete a run from the backend and from the projection.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if the backend rejects the delete.
    pub async fn delete(&mut self, run_id: &str) -> Result<(), RunnerError> {
        self.backend.delete_run(run_id).await?;
        self.runs.commit(|runs| runs.retain(|run| run.id != run_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vrd_core::entities::TestCaseResult;
    use vrd_core::enums::Verdict;

    use super::*;
    use crate::test_support::{FakeBackend, run};

    fn scored(id: &str, verdicts: &[Verdict]) -> TestRun {
        let mut scored = run(id, None, 1);
        scored.results = verdicts
            .iter()
            .enumerate()
            .map(|(i, verdict)| TestCaseResult {
                test_case_id: format!("case-{i}"),
                actual_answer: format!("answer {i}"),
                passed: *verdict,
                ..TestCaseResult::default()
            })
            .collect();
        scored.pass_rate = vrd_core::scoring::pass_rate(&scored.results);
        scored
    }

    #[tokio::test]
    async fn favorite_toggle_reverts_on_failure() {
        let backend = FakeBackend::with_runs(vec![run("a", None, 1)]);
        let mut book = RunBook::load(&backend).await.unwrap();

        assert!(book.toggle_favorite("a").await.unwrap());
        assert!(book.get("a").unwrap().is_favorite);

        backend.failing_patches.borrow_mut().insert("a".to_string());
        assert!(book.toggle_favorite("a").await.is_err());
        assert!(book.get("a").unwrap().is_favorite);
        assert!(backend.stored_run("a").unwrap().is_favorite);
    }

    #[tokio::test]
    async fn comment_adopts_server_copy() {
        let backend = FakeBackend::with_runs(vec![run("a", None, 1)]);
        let mut book = RunBook::load(&backend).await.unwrap();

        let updated = book.save_comment("a", "baseline").await.unwrap();
        assert_eq!(updated.comment, "baseline");

        assert!(matches!(
            book.save_comment("missing", "x").await,
            Err(RunnerError::RunNotFound(_))
        ));
    }

    #[tokio::test]
    async fn override_touches_one_result_and_persists_pass_rate() {
        let original = scored("a", &[Verdict::Passed, Verdict::Failed, Verdict::Failed]);
        let backend = FakeBackend::with_runs(vec![original.clone()]);
        let mut book = RunBook::load(&backend).await.unwrap();

        let rate = book.override_verdict("a", "case-1", true).await.unwrap();
        assert_eq!(rate, 67);

        let local = book.get("a").unwrap();
        assert_eq!(local.results.len(), 3);
        assert_eq!(local.results[1].passed, Verdict::Passed);
        assert_eq!(local.results[2].passed, Verdict::Failed);
        assert_eq!(local.pass_rate, 67);

        let updates = backend.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].2, ResultUpdate::verdict_only("answer 1", true));
        assert_eq!(backend.stored_run("a").unwrap().pass_rate, 67);
    }

    #[tokio::test]
    async fn failed_override_reloads_authoritative_state() {
        let original = scored("a", &[Verdict::Passed, Verdict::Failed]);
        let backend = FakeBackend::with_runs(vec![original.clone()]);
        backend.fail_updates.set(true);
        let mut book = RunBook::load(&backend).await.unwrap();

        assert!(book.override_verdict("a", "case-1", true).await.is_err());
        assert_eq!(book.get("a").unwrap(), &original);
    }

    #[tokio::test]
    async fn override_rejects_unknown_case() {
        let backend = FakeBackend::with_runs(vec![scored("a", &[Verdict::Passed])]);
        let mut book = RunBook::load(&backend).await.unwrap();
        assert!(matches!(
            book.override_verdict("a", "nope", false).await,
            Err(RunnerError::UnknownTestCase { .. })
        ));
        assert!(backend.updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn reorder_renumbers_favorites_contiguously() {
        let backend = FakeBackend::with_runs(vec![
            run("a", Some(0), 1),
            run("b", Some(1), 2),
            run("plain", None, 3),
            run("c", Some(2), 4),
        ]);
        let mut book = RunBook::load(&backend).await.unwrap();

        book.move_favorite("c", 0).await.unwrap();

        let order: Vec<(&str, u32)> = book
            .favorites()
            .iter()
            .map(|run| (run.id.as_str(), run.favorite_order))
            .collect();
        assert_eq!(order, vec![("c", 0), ("a", 1), ("b", 2)]);
        assert_eq!(backend.stored_run("b").unwrap().favorite_order, 2);
        assert_eq!(backend.patches.borrow().len(), 3);

        assert!(matches!(
            book.move_favorite("plain", 0).await,
            Err(RunnerError::FavoriteNotFound(_))
        ));
    }

    #[tokio::test]
    async fn failed_reorder_reloads_from_backend() {
        let backend = FakeBackend::with_runs(vec![run("a", Some(0), 1), run("b", Some(1), 2)]);
        backend.failing_patches.borrow_mut().insert("a".to_string());
        let mut book = RunBook::load(&backend).await.unwrap();

        assert!(book.reorder_favorites(0, 1).await.is_err());
        // "b" was written before the reload, "a" was not.
        assert_eq!(book.get("b").unwrap().favorite_order, 0);
        assert_eq!(book.get("a").unwrap().favorite_order, 0);
    }

    #[tokio::test]
    async fn history_views() {
        let backend = FakeBackend::with_runs(vec![run("old", None, 30), run("new", None, 1), run("mid", None, 10)]);
        let mut book = RunBook::load(&backend).await.unwrap();

        let ids: Vec<String> = book.recent(None, 2).into_iter().map(|run| run.id).collect();
        assert_eq!(ids, vec!["new", "mid"]);
        assert!(book.history(Some("other-suite")).is_empty());

        book.delete("mid").await.unwrap();
        assert!(book.get("mid").is_none());
        assert_eq!(backend.runs.borrow().len(), 2);
    }
}
