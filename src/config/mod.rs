//! Configuration management
//!
//! Static configuration is loaded once at startup from an optional TOML file
//! and `LM__*` environment variables, then passed down to whatever needs it.

pub mod args;
mod structs;
pub mod validators;

pub use args::Args;
pub use structs::*;
