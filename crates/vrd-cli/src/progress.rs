use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vrd_core::entities::{TestCaseResult, TestRun};
use vrd_core::scoring::RunProgress;
use vrd_runner::RunObserver;

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn set_position(&self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Progress bar for one test run: items finished in this execution, the
/// pass/fail tally, and the indices currently in flight.
#[derive(Default)]
pub struct RunProgressView {
    progress: RefCell<Option<Progress>>,
    in_flight: RefCell<BTreeSet<usize>>,
    // Resumed runs start with verdicts already set, so position counts
    // this execution's finished items rather than validated slots.
    finished: Cell<u64>,
}

impl RunProgressView {
    fn with_progress(&self, f: impl FnOnce(&Progress)) {
        if let Some(progress) = self.progress.borrow().as_ref() {
            f(progress);
        }
    }

    /// Abandon the bar after the run itself failed.
    pub fn fail(&self, message: &str) {
        self.with_progress(|progress| progress.finish_err(message));
    }
}

fn status_line(progress: &RunProgress, in_flight: &BTreeSet<usize>) -> String {
    let running = in_flight
        .iter()
        .map(|index| format!("#{}", index + 1))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} passed, {} failed | running: {}",
        progress.passed,
        progress.failed,
        if running.is_empty() { "-" } else { running.as_str() }
    )
}

impl RunObserver for RunProgressView {
    fn run_started(&self, run: &TestRun) {
        let label = format!("{} ({})", run.suite_name, run.strategy.label());
        self.finished.set(0);
        self.in_flight.borrow_mut().clear();
        *self.progress.borrow_mut() = Some(Progress::bar(run.results.len() as u64, &label));
    }

    fn item_started(&self, index: usize, _slot: &TestCaseResult) {
        self.in_flight.borrow_mut().insert(index);
    }

    fn item_finished(&self, index: usize, _result: &TestCaseResult, progress: RunProgress) {
        let mut in_flight = self.in_flight.borrow_mut();
        in_flight.remove(&index);
        let line = status_line(&progress, &in_flight);
        let finished = self.finished.get() + 1;
        self.finished.set(finished);
        self.with_progress(|bar| {
            bar.set_position(finished);
            bar.set_message(&line);
        });
    }

    fn run_finished(&self, run: &TestRun) {
        let message = format!("done: {}% passed", run.pass_rate);
        self.with_progress(|progress| progress.finish_ok(&message));
    }
}
