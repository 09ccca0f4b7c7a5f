//! Application layer for nova-chat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PollingParams;
pub use ports::{
    assistant_backend::{AssistantBackend, BackendError},
    conversation_log::{ConversationLog, LogRecord, NoConversationLog},
    identity_source::{DirectoryEntry, IdentitySource, IdentitySourceError},
    progress::{NoProgress, TurnProgressNotifier},
};
pub use use_cases::chat::{ChatError, ChatUseCase};
pub use use_cases::identity_lookup::{AdminAccount, IdentityLookupUseCase, LookupError};
pub use use_cases::submit_turn::{AssistantSessionDriver, SubmitError};
