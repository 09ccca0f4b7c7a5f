//! Backend thread and run value objects

use super::turn::Role;
use serde::{Deserialize, Serialize};

/// Opaque conversation handle issued by the assistant backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle of one backend computation on a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a run as reported by the backend.
///
/// Statuses the client does not recognize deserialize to [`RunStatus::Unknown`]
/// and are treated as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    /// The assistant wants tool outputs. This client never submits any, so
    /// the run cannot make progress.
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// The only successful terminal status.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// Terminal statuses that produce no answer.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::RequiresAction
                | RunStatus::Cancelled
                | RunStatus::Failed
                | RunStatus::Incomplete
                | RunStatus::Expired
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of a run as last reported by the backend (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub id: RunId,
    pub status: RunStatus,
    /// Backend-provided reason when the run failed.
    pub last_error: Option<String>,
}

impl Run {
    pub fn new(id: RunId, status: RunStatus) -> Self {
        Self {
            id,
            status,
            last_error: None,
        }
    }

    pub fn with_last_error(mut self, error: impl Into<String>) -> Self {
        self.last_error = Some(error.into());
        self
    }
}

/// A message as listed from a backend thread.
///
/// `text` is the first text block of the message; `None` when the message
/// carries no text (e.g. only an image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    pub text: Option<String>,
}
