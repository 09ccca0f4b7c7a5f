//! Domain layer for nova-chat
//!
//! This crate contains the core entities and value objects of the student
//! chat: who is talking, what was said, and how assistant output is cleaned
//! before display. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] is created on login and torn down on logout. It owns the
//! authenticated [`UserIdentity`], the lazily created backend [`ThreadId`],
//! and the ordered list of [`Turn`]s.
//!
//! ## Run
//!
//! Each submitted user turn triggers one backend computation whose progress
//! is reported as a [`RunStatus`]. Runs are never persisted locally.

pub mod conversation;
pub mod core;
pub mod identity;
pub mod text;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    session::Session,
    thread::{Run, RunId, RunStatus, ThreadId, ThreadMessage},
    turn::{Role, Turn},
};
pub use core::error::DomainError;
pub use identity::{email::Email, user::UserIdentity};
pub use text::sanitize::sanitize;
