//! OpenAI assistants adapter
//!
//! Implements the [`AssistantBackend`](nova_application::AssistantBackend)
//! port over the threads/messages/runs REST endpoints.

pub mod backend;
pub mod error;
pub mod protocol;

pub use backend::OpenAiAssistantBackend;
pub use error::OpenAiError;
