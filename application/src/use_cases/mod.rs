//! Use cases (application services)
//!
//! - [`identity_lookup`]: resolve a login email to a user
//! - [`submit_turn`]: drive one assistant run to completion
//! - [`chat`]: one question/answer exchange within a session

pub mod chat;
pub mod identity_lookup;
pub mod submit_turn;
