//! Configuration types
//!
//! Board-agnostic configuration structures and the `controller.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
