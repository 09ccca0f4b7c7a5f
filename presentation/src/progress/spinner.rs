//! Spinner shown while a run is pending

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use nova_application::TurnProgressNotifier;
use nova_domain::{RunId, RunStatus};
use std::time::Duration;

/// Reports progress with an animated spinner on stderr
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::style());
        bar.set_prefix(crate::output::console::ASSISTANT_AVATAR);
        bar.set_message("Thinking...");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix} {spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for SpinnerProgress {
    fn on_run_created(&self, _run_id: &RunId) {
        self.bar.set_message("Thinking...");
    }

    fn on_poll(&self, attempt: u32, status: RunStatus) {
        self.bar
            .set_message(format!("Thinking... {}", format!("({status}, check {attempt})").dimmed()));
    }

    fn on_finished(&self, _success: bool) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
