//! Text cleanup for assistant output.

pub mod sanitize;
