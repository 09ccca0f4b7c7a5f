//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod assistant_backend;
pub mod conversation_log;
pub mod identity_source;
pub mod progress;
