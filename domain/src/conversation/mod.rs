//! Conversation domain.
//!
//! - [`turn::Turn`]: one user or assistant message
//! - [`thread::ThreadId`] / [`thread::RunId`]: backend handles
//! - [`thread::RunStatus`]: lifecycle of one backend computation
//! - [`session::Session`]: per-login conversation state

pub mod session;
pub mod thread;
pub mod turn;
