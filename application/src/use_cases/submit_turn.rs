//! Submit Turn use case.
//!
//! The backend answers asynchronously and only exposes a pull-based status
//! check, so every turn goes through the same fixed sequence:
//!
//! 1. Create the thread if the session has none yet (once per session)
//! 2. Append the user message to the thread
//! 3. Create exactly one run (never retried)
//! 4. Poll the run on a fixed interval until it settles or the attempt
//!    budget from [`PollingParams`] is spent
//! 5. On success, take the most recent thread message as the reply
//!
//! Status checks are read-only, so a failed check is logged and counted
//! against the budget instead of aborting the turn. A run still pending when
//! the budget is spent is a timeout, whatever the last check returned.

use crate::config::PollingParams;
use crate::ports::assistant_backend::{AssistantBackend, BackendError};
use crate::ports::progress::TurnProgressNotifier;
use nova_domain::util::preview;
use nova_domain::{Role, Run, RunId, ThreadId, Turn};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while submitting a turn.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(#[from] BackendError),

    #[error("Assistant run failed: {0}")]
    BackendFailed(String),

    #[error("Assistant run {run_id} did not finish after {attempts} status checks")]
    BackendTimeout { run_id: RunId, attempts: u32 },

    #[error("Operation cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Check if this error represents a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmitError::BackendTimeout { .. })
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitError::Cancelled)
    }
}

/// Drives one assistant conversation thread.
///
/// Holds no per-session state: the thread handle lives in the caller's
/// [`Session`](nova_domain::Session) and is passed in on every call.
pub struct AssistantSessionDriver {
    backend: Arc<dyn AssistantBackend>,
    assistant_id: String,
    polling: PollingParams,
    cancellation: Option<CancellationToken>,
}

impl AssistantSessionDriver {
    pub fn new(backend: Arc<dyn AssistantBackend>, assistant_id: impl Into<String>) -> Self {
        Self {
            backend,
            assistant_id: assistant_id.into(),
            polling: PollingParams::default(),
            cancellation: None,
        }
    }

    pub fn with_polling(mut self, polling: PollingParams) -> Self {
        self.polling = polling;
        self
    }

    /// Stop waiting on runs once `token` is cancelled (process shutdown).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Submit `text` to the thread in `thread`, creating the thread first if
    /// the slot is empty, and return the assistant reply.
    ///
    /// The reply text is returned exactly as the backend produced it.
    pub async fn submit(
        &self,
        thread: &mut Option<ThreadId>,
        text: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<Turn, SubmitError> {
        if self.is_cancelled() {
            return Err(SubmitError::Cancelled);
        }

        let thread_id = self.ensure_thread(thread).await?;

        debug!("Submitting to thread {}: {}", thread_id, preview(text, 80));
        self.backend
            .create_message(&thread_id, Role::User, text)
            .await?;

        let run = self
            .backend
            .create_run(&thread_id, &self.assistant_id)
            .await?;
        info!("Run {} created on thread {}", run.id, thread_id);
        progress.on_run_created(&run.id);

        let result = match self.wait_for_run(&thread_id, run, progress).await {
            Ok(_) => self.fetch_reply(&thread_id).await,
            Err(e) => Err(e),
        };

        progress.on_finished(result.is_ok());
        result
    }

    async fn ensure_thread(&self, slot: &mut Option<ThreadId>) -> Result<ThreadId, SubmitError> {
        if let Some(id) = slot {
            return Ok(id.clone());
        }

        let id = self.backend.create_thread().await?;
        info!("Created thread {}", id);
        *slot = Some(id.clone());
        Ok(id)
    }

    /// Poll until the run reaches a terminal status.
    ///
    /// Performs at most `max_attempts` status checks, each preceded by one
    /// `interval` pause. A run that is already terminal on creation is not
    /// polled at all.
    async fn wait_for_run(
        &self,
        thread: &ThreadId,
        mut run: Run,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<Run, SubmitError> {
        let mut attempts = 0u32;
        let mut last_error: Option<BackendError> = None;

        while !run.status.is_terminal() {
            if attempts >= self.polling.max_attempts {
                match &last_error {
                    Some(e) => warn!(
                        "Run {} still {} after {} status checks ({:?}), last check failed: {}",
                        run.id,
                        run.status,
                        attempts,
                        self.polling.budget(),
                        e
                    ),
                    None => warn!(
                        "Run {} still {} after {} status checks ({:?})",
                        run.id,
                        run.status,
                        attempts,
                        self.polling.budget()
                    ),
                }
                return Err(SubmitError::BackendTimeout {
                    run_id: run.id,
                    attempts,
                });
            }

            self.pause().await?;
            attempts += 1;

            match self.backend.get_run(thread, &run.id).await {
                Ok(next) => {
                    debug!("Run {} status check {}: {}", next.id, attempts, next.status);
                    progress.on_poll(attempts, next.status);
                    last_error = None;
                    run = next;
                }
                Err(e) => {
                    warn!("Status check {} for run {} failed: {}", attempts, run.id, e);
                    last_error = Some(e);
                }
            }
        }

        if run.status.is_failure() {
            warn!("Run {} ended with status {}", run.id, run.status);
            return Err(SubmitError::BackendFailed(describe_failure(&run)));
        }

        Ok(run)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    async fn pause(&self) -> Result<(), SubmitError> {
        let sleep = tokio::time::sleep(self.polling.interval);
        match &self.cancellation {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(SubmitError::Cancelled),
                _ = sleep => Ok(()),
            },
            None => {
                sleep.await;
                Ok(())
            }
        }
    }

    /// Take the most recent message of the thread as the reply.
    async fn fetch_reply(&self, thread: &ThreadId) -> Result<Turn, SubmitError> {
        let messages = self.backend.list_messages(thread).await?;

        let Some(latest) = messages.into_iter().next() else {
            return Err(SubmitError::BackendFailed(format!(
                "thread {} has no messages",
                thread
            )));
        };

        if latest.role != Role::Assistant {
            return Err(SubmitError::BackendFailed(format!(
                "latest message {} is from the {}, not the assistant",
                latest.id, latest.role
            )));
        }

        match latest.text {
            Some(text) => Ok(Turn::assistant(text)),
            None => Err(SubmitError::BackendFailed(format!(
                "latest message {} has no text content",
                latest.id
            ))),
        }
    }
}

fn describe_failure(run: &Run) -> String {
    match &run.last_error {
        Some(reason) => format!("run {} ended as {}: {}", run.id, run.status, reason),
        None => format!("run {} ended as {}", run.id, run.status),
    }
}
