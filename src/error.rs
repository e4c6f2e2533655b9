//! Custom error types for concierge-rs
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the concierge-rs application
#[derive(Error, Debug)]
pub enum ConciergeError {
    /// Backend returned an error payload
    #[error("The booking service rejected the request: {0}")]
    Api(String),

    /// Room does not exist on the backend
    #[error("Room {0} does not exist.\n\n  → Run 'rb rooms list' to see available rooms.")]
    RoomNotFound(i64),

    /// Room cannot be booked because it is already taken
    #[error("Room {0} is already booked.\n\n  → Run 'rb rooms list --filter available' to find a free room.")]
    RoomUnavailable(i64),

    /// Base URL is not a valid URL
    #[error("'{0}' is not a valid base URL.\n\n  → Expected something like http://localhost:5000 or https://api.example.com")]
    InvalidBaseUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.\n  → Check that the booking service is reachable (rb config get base-url).")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl From<toml::de::Error> for ConciergeError {
    fn from(err: toml::de::Error) -> Self {
        ConciergeError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ConciergeError {
    fn from(err: toml::ser::Error) -> Self {
        ConciergeError::Toml(err.to_string())
    }
}

impl From<url::ParseError> for ConciergeError {
    fn from(err: url::ParseError) -> Self {
        ConciergeError::InvalidBaseUrl(err.to_string())
    }
}

/// Result type alias using ConciergeError
pub type Result<T> = std::result::Result<T, ConciergeError>;
