//! Console handlers module
//!
//! Command handlers for every subcommand plus the plain-text renderers
//! they share.

pub mod commands;
pub mod render;

pub use commands::{handle_command, Cli, Command};
