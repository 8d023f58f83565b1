//! # vrd-runner
//!
//! Execution engine for Verdict test runs.
//!
//! - [`pool::run_bounded`] drives a batch of items through at most `K`
//!   concurrent async invocations over one shared FIFO queue.
//! - [`RunExecutor`] wraps it with the run lifecycle: create or resume a run,
//!   predict and validate every case, write each result through, and finish
//!   with the pass rate computed from the verdicts.
//! - [`RunBook`] is the local projection of run history with the user-driven
//!   annotations (favorite, comment, reorder, manual verdict override).
//!
//! The backend is reached through [`RunBackend`], implemented for
//! [`vrd_client::ApiClient`] and for in-memory fakes in tests.

pub mod backend;
pub mod book;
pub mod executor;
pub mod observer;
pub mod pool;
pub mod projection;

mod error;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::RunBackend;
pub use book::RunBook;
pub use error::RunnerError;
pub use executor::RunExecutor;
pub use observer::{NoopObserver, RunObserver};
pub use projection::Projection;
