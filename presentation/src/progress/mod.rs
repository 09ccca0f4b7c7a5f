//! Progress reporting while the assistant is working

pub mod spinner;
