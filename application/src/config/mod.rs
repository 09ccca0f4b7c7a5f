//! Application-level configuration.
//!
//! - [`PollingParams`]: assistant run wait loop control (interval, attempt budget)

pub mod polling_params;

pub use polling_params::PollingParams;
