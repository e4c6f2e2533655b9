//! CLI command definitions using clap
//!
//! Defines the command structure for the `rb` CLI tool.

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::view::{AvailabilityFilter, SortKey};

/// concierge-rs - Hotel Room Booking TUI
///
/// A terminal client for a room-booking backend.
/// Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "rb", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse and manage rooms
    Rooms(RoomsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Room Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Room commands
#[derive(Parser, Debug)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Subcommand, Debug)]
pub enum RoomsCommand {
    /// List rooms
    List {
        /// Filter by availability
        #[arg(long, value_enum, default_value_t = AvailabilityFilter::All)]
        filter: AvailabilityFilter,

        /// Sort order (price ascending or rating descending)
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Case-insensitive substring match on the room type
        #[arg(long, short)]
        search: Option<String>,
    },

    /// View a single room's details
    View {
        /// Room ID
        id: i64,
    },

    /// Book a room
    Book {
        /// Room ID
        id: i64,
    },

    /// Release a previously booked room
    Release {
        /// Room ID
        id: i64,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,

        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Booking backend base URL
    BaseUrl,
    /// Default sort key for the room list
    SortBy,
}
