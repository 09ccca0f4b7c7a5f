//! Identity domain.
//!
//! - [`email::Email`]: a normalized email address used as the lookup key
//! - [`user::UserIdentity`]: the authenticated user shown in the shell

pub mod email;
pub mod user;
