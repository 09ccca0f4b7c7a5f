//! Port for the question/answer audit log.
//!
//! Defines the [`ConversationLog`] trait for recording each completed
//! exchange. This is separate from `tracing`-based operation logs: tracing
//! handles diagnostics for the operator, while this port keeps a durable
//! transcript of who asked what.

use chrono::{DateTime, Local};

/// One question/answer exchange. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub user: String,
    pub question: String,
    pub answer: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    pub fn new(
        user: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            user: user.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Port for appending exchanges to a durable store.
///
/// The `append` method is synchronous and non-fallible: a broken log must
/// never abort the user-facing interaction, so implementations report
/// failures through `tracing` and carry on.
pub trait ConversationLog: Send + Sync {
    /// Append one record.
    fn append(&self, record: &LogRecord);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLog;

impl ConversationLog for NoConversationLog {
    fn append(&self, _record: &LogRecord) {}
}
