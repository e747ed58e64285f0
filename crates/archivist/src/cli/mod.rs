//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the archivist binary.

mod commands;
mod connect;
mod generate;
mod settings;

pub use commands::{Cli, Commands};
pub use connect::connect;
pub use generate::generate;
pub use settings::{disconnect, print_sql, show_settings};
