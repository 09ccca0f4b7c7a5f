//! Assistant backend port
//!
//! Defines the interface to a stateful conversational backend where answers
//! are produced asynchronously: the client appends a message to a thread,
//! starts a run, and pulls the run status until it settles.

use async_trait::async_trait;
use nova_domain::{Role, Run, RunId, ThreadId, ThreadMessage};
use thiserror::Error;

/// Errors that can occur while talking to the assistant backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Gateway to the hosted assistant
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Create an empty conversation thread
    async fn create_thread(&self) -> Result<ThreadId, BackendError>;

    /// Append a message to a thread
    async fn create_message(
        &self,
        thread: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), BackendError>;

    /// Start a run of `assistant_id` over the current thread contents
    async fn create_run(&self, thread: &ThreadId, assistant_id: &str)
    -> Result<Run, BackendError>;

    /// Read the current state of a run
    async fn get_run(&self, thread: &ThreadId, run: &RunId) -> Result<Run, BackendError>;

    /// List thread messages, most recent first
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, BackendError>;
}
