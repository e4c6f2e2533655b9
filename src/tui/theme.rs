//! TUI theme and styles
//!
//! The single source of colors for the whole interface, shared by every
//! screen the way the original app shared its theme context.

use ratatui::style::{Color, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Color for rooms that can be booked
    pub const AVAILABLE: Color = Color::Green;

    /// Color for rooms that are taken
    pub const BOOKED: Color = Color::Red;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Warning color
    pub const WARNING: Color = Color::Yellow;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::Black)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Style for a room's availability marker
    pub fn availability(available: bool) -> Style {
        if available {
            Style::default().fg(Self::AVAILABLE)
        } else {
            Style::default().fg(Self::BOOKED)
        }
    }
}
