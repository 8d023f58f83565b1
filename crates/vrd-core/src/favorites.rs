//! Favorite ordering and run history views.
//!
//! Favorited runs carry a `favorite_order` index. After any reorder the
//! favorited set is renumbered `0..M` with no gaps or duplicates.

use crate::entities::TestRun;
use crate::errors::CoreError;

/// Favorited runs sorted by their current order index.
///
/// Ties (possible in data written by older clients) keep list order.
#[must_use]
pub fn favorites(runs: &[TestRun]) -> Vec<&TestRun> {
    let mut favorites: Vec<&TestRun> = runs.iter().filter(|run| run.is_favorite).collect();
    favorites.sort_by_key(|run| run.favorite_order);
    favorites
}

/// Move the favorite at position `from` to position `to` and return the new
/// `(run_id, order)` assignment for the whole favorited set.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if either position is outside the
/// favorited set.
pub fn reorder(runs: &[TestRun], from: usize, to: usize) -> Result<Vec<(String, u32)>, CoreError> {
    let mut ordered: Vec<String> = favorites(runs).into_iter().map(|run| run.id.clone()).collect();
    let len = ordered.len();
    if from >= len || to >= len {
        return Err(CoreError::Validation(format!(
            "favorite position out of range: from={from} to={to} favorites={len}"
        )));
    }

    let moved = ordered.remove(from);
    ordered.insert(to, moved);

    Ok(ordered
        .into_iter()
        .enumerate()
        .map(|(index, id)| (id, u32::try_from(index).unwrap_or(u32::MAX)))
        .collect())
}

/// Apply an order assignment produced by [`reorder`] to a local run list.
pub fn apply_order(runs: &mut [TestRun], assignment: &[(String, u32)]) {
    for run in runs.iter_mut() {
        if let Some((_, order)) = assignment.iter().find(|(id, _)| *id == run.id) {
            run.favorite_order = *order;
        }
    }
}

/// Position of `run_id` among the favorites, if it is one.
#[must_use]
pub fn favorite_position(runs: &[TestRun], run_id: &str) -> Option<usize> {
    favorites(runs).iter().position(|run| run.id == run_id)
}

/// Runs for one suite (or all suites), newest first.
#[must_use]
pub fn history(mut runs: Vec<TestRun>, suite_id: Option<&str>) -> Vec<TestRun> {
    if let Some(suite_id) = suite_id {
        runs.retain(|run| run.suite_id == suite_id);
    }
    runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    runs
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::{RunStatus, Strategy};

    fn run(id: &str, favorite: Option<u32>, age_minutes: i64) -> TestRun {
        TestRun {
            id: id.to_string(),
            suite_id: if id.starts_with('x') { "other" } else { "suite-1" }.to_string(),
            suite_name: String::new(),
            strategy: Strategy::FastToG,
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

    #[test]
    fn reorder_renumbers_contiguously() {
        let runs = vec![
            run("a", Some(0), 1),
            run("b", Some(1), 2),
            run("plain", None, 3),
            run("c", Some(2), 4),
            run("d", Some(3), 5),
        ];

        let assignment = reorder(&runs, 0, 2).unwrap();
        assert_eq!(
            assignment,
            vec![
                ("b".to_string(), 0),
                ("c".to_string(), 1),
                ("a".to_string(), 2),
                ("d".to_string(), 3),
            ]
        );
    }

    #[test]
    fn reorder_repairs_duplicate_indices() {
        let mut runs = vec![run("a", Some(5), 1), run("b", Some(5), 2), run("c", Some(9), 3)];
        let assignment = reorder(&runs, 2, 0).unwrap();
        apply_order(&mut runs, &assignment);

        let mut orders: Vec<u32> = favorites(&runs).iter().map(|r| r.favorite_order).collect();
        orders.sort_unstable();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(favorites(&runs)[0].id, "c");
    }

    #[test]
    fn reorder_rejects_out_of_range_positions() {
        let runs = vec![run("a", Some(0), 1), run("plain", None, 2)];
        assert!(reorder(&runs, 0, 1).is_err());
        assert!(reorder(&runs, 3, 0).is_err());
    }

    #[test]
    fn history_filters_by_suite_and_sorts_newest_first() {
        let runs = vec![run("old", None, 30), run("x-other", None, 1), run("new", None, 5)];
        let ids: Vec<String> = history(runs.clone(), Some("suite-1"))
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);

        assert_eq!(history(runs, None)[0].id, "x-other");
    }

    #[test]
    fn favorite_position_ignores_non_favorites() {
        let runs = vec![run("a", Some(1), 1), run("b", Some(0), 2), run("c", None, 3)];
        assert_eq!(favorite_position(&runs, "a"), Some(1));
        assert_eq!(favorite_position(&runs, "c"), None);
    }
}
