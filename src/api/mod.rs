//! Booking backend API module
//!
//! HTTP client and typed handlers for the room-booking REST backend.

pub mod client;
pub mod rooms;

pub use client::ApiClient;
pub use rooms::{ActionKind, Room, RoomsApi};
