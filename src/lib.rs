//! concierge-rs - A TUI client for browsing and booking hotel rooms
//!
//! This library provides both CLI and TUI interfaces for a hotel
//! room-booking backend: listing rooms, booking and releasing them, and
//! filtering/sorting/searching the room list client-side.

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{ConciergeError, Result};
