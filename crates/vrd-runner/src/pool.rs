//! Fixed-size worker pool over a shared FIFO queue.
//!
//! All workers run as futures on the caller's task: concurrency here means up
//! to `K` outstanding `per_item` futures, interleaved at their await points.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use futures::future::join_all;

/// Run `per_item(item, index)` for every item with at most `concurrency`
/// invocations pending at once.
///
/// `min(concurrency, items.len())` workers share one queue seeded in input
/// order. Each worker pops the front, awaits `per_item`, and repeats until
/// the queue is empty; the call returns once every worker has stopped. Each
/// index is handed to exactly one invocation and nothing is retried.
///
/// Items are dequeued in input order but may finish in any order, so
/// `per_item` must key its writes by `index`. A `concurrency` of zero is
/// treated as one.
pub async fn run_bounded<T, F, Fut>(items: Vec<T>, concurrency: usize, per_item: F)
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = ()>,
{
    let workers = concurrency.max(1).min(items.len());
    if workers == 0 {
        return;
    }

    let queue: Mutex<VecDeque<(usize, T)>> = Mutex::new(items.into_iter().enumerate().collect());
    let queue = &queue;
    let per_item = &per_item;

    join_all((0..workers).map(|worker| async move {
        loop {
            // The guard is a temporary of this statement; it is released before awaiting.
            let next = queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            let Some((index, item)) = next else {
                break;
            };
            tracing::trace!(worker, index, "dequeued item");
            per_item(item, index).await;
        }
        tracing::trace!(worker, "queue drained");
    }))
    .await;
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use futures::channel::oneshot;
    use pretty_assertions::assert_eq;

    use super::run_bounded;

    #[tokio::test]
    async fn every_index_runs_exactly_once() {
        for (n, k) in [(0, 1), (1, 1), (5, 2), (7, 3), (3, 10), (10, 10)] {
            let seen = RefCell::new(Vec::new());
            let items: Vec<String> = (0..n).map(|i| format!("item-{i}")).collect();

            run_bounded(items, k, |item, index| {
                let seen = &seen;
                async move {
                    tokio::task::yield_now().await;
                    assert_eq!(item, format!("item-{index}"));
                    seen.borrow_mut().push(index);
                }
            })
            .await;

            let mut seen = seen.into_inner();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>(), "n={n} k={k}");
        }
    }

    #[tokio::test]
    async fn in_flight_never_exceeds_limit() {
        for (n, k) in [(10, 3), (4, 8), (6, 1)] {
            let active = Cell::new(0usize);
            let peak = Cell::new(0usize);

            run_bounded(vec![(); n], k, |(), index| {
                let (active, peak) = (&active, &peak);
                async move {
                    active.set(active.get() + 1);
                    peak.set(peak.get().max(active.get()));
                    // Uneven suspension so completions interleave.
                    for _ in 0..(index % 3 + 1) {
                        tokio::task::yield_now().await;
                    }
                    active.set(active.get() - 1);
                }
            })
            .await;

            assert_eq!(peak.get(), k.min(n), "n={n} k={k}");
            assert_eq!(active.get(), 0);
        }
    }

    #[tokio::test]
    async fn third_item_waits_for_a_free_worker() {
        let starts = RefCell::new(Vec::new());
        let mut gates: HashMap<usize, oneshot::Receiver<()>> = HashMap::new();
        let mut releases = Vec::new();
        for index in 0..5 {
            let (tx, rx) = oneshot::channel();
            gates.insert(index, rx);
            releases.push(Some(tx));
        }
        let gates = RefCell::new(gates);

        let pool = run_bounded(vec![(); 5], 2, |(), index| {
            let starts = &starts;
            let gate = gates.borrow_mut().remove(&index);
            async move {
                starts.borrow_mut().push(index);
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            }
        });

        let driver = async {
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            assert_eq!(*starts.borrow(), vec![0, 1]);

            // Finishing item 1 first frees a worker for item 2.
            releases[1].take().map(|tx| tx.send(()));
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            assert_eq!(*starts.borrow(), vec![0, 1, 2]);

            for slot in [0, 2, 3, 4] {
                releases[slot].take().map(|tx| tx.send(()));
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
            }
        };

        futures::join!(pool, driver);
        assert_eq!(*starts.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn zero_concurrency_still_runs_serially() {
        let count = Cell::new(0);
        run_bounded(vec![1, 2, 3], 0, |_, _| {
            let count = &count;
            async move { count.set(count.get() + 1) }
        })
        .await;
        assert_eq!(count.get(), 3);
    }
}
