//! CLI module
//!
//! Command definitions and handlers for the scripting surface. Running
//! the binary without a subcommand launches the TUI instead.

pub mod commands;
pub mod config;
pub mod rooms;
