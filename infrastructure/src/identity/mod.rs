//! Identity directory adapters

mod sheet;

pub use sheet::{SheetIdentitySource, parse_directory};
