//! Progress notification port
//!
//! Defines the interface for reporting progress while a turn is being
//! answered.

use nova_domain::{RunId, RunStatus};

/// Callback for progress updates while waiting on the assistant
///
/// Implementations live in the presentation layer (spinner, plain text, ...).
pub trait TurnProgressNotifier: Send + Sync {
    /// Called once the run has been created
    fn on_run_created(&self, _run_id: &RunId) {}

    /// Called after each status check
    fn on_poll(&self, _attempt: u32, _status: RunStatus) {}

    /// Called when the wait ends, successfully or not
    fn on_finished(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgressNotifier for NoProgress {}
