//! Core functionality module
//!
//! Configuration and the pure room view pipeline shared by the CLI and
//! the TUI.

pub mod config;
pub mod view;

pub use config::Config;
pub use view::{visible_rooms, AvailabilityFilter, SortKey};
