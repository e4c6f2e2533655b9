//! Room operations
//!
//! Typed handler over [`ApiClient`] for the room endpoints: listing,
//! viewing, booking, and releasing rooms.

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::{ConciergeError, Result};

/// A bookable room as served by the backend
///
/// Server-owned and read-mostly; the client only flips `available`
/// locally after the backend confirms a book/release call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier
    pub id: i64,
    /// Room category (e.g., "Single", "Double", "Suite")
    pub room_type: String,
    /// Price per night
    pub price: f64,
    /// Whether the room can currently be booked
    pub available: bool,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional guest rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Room {
    /// Rating with missing values treated as zero (used for sorting)
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}

/// A book or release action on a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Book,
    Release,
}

impl ActionKind {
    /// Endpoint segment for this action
    pub fn path_segment(&self) -> &'static str {
        match self {
            ActionKind::Book => "book",
            ActionKind::Release => "release",
        }
    }

    /// The availability value a room takes after this action succeeds
    pub fn resulting_availability(&self) -> bool {
        match self {
            ActionKind::Book => false,
            ActionKind::Release => true,
        }
    }

    /// Human-readable label (used as button text and in messages)
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Book => "Book",
            ActionKind::Release => "Release",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Confirmation envelope the backend returns for book/release
#[derive(Debug, Deserialize)]
pub struct ActionReceipt {
    /// Server confirmation message
    pub message: String,
}

/// Handler for room endpoints
pub struct RoomsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RoomsApi<'a> {
    /// Create a handler over an existing client
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the full room list
    pub async fn list(&self) -> Result<Vec<Room>> {
        self.client.get("/rooms").await
    }

    /// Fetch a single room's details
    pub async fn view(&self, id: i64) -> Result<Room> {
        self.client
            .get(&format!("/rooms/{}", id))
            .await
            .map_err(|e| classify_room_error(id, e))
    }

    /// Book a room; the caller flips availability only on success
    pub async fn book(&self, id: i64) -> Result<ActionReceipt> {
        self.act(ActionKind::Book, id).await
    }

    /// Release a previously booked room
    pub async fn release(&self, id: i64) -> Result<ActionReceipt> {
        self.act(ActionKind::Release, id).await
    }

    /// Perform a book/release action on a room
    pub async fn act(&self, action: ActionKind, id: i64) -> Result<ActionReceipt> {
        self.client
            .post(&format!("/rooms/{}/{}", id, action.path_segment()))
            .await
            .map_err(|e| classify_room_error(id, e))
    }
}

/// Map backend error payloads onto room-specific error variants where the
/// message makes the cause unambiguous
fn classify_room_error(id: i64, err: ConciergeError) -> ConciergeError {
    let ConciergeError::Api(msg) = &err else {
        return err;
    };

    let lowered = msg.to_lowercase();
    if lowered.contains("not found") {
        ConciergeError::RoomNotFound(id)
    } else if lowered.contains("already booked") {
        ConciergeError::RoomUnavailable(id)
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_json() -> &'static str {
        r#"{
            "id": 3,
            "room_type": "Suite",
            "price": 300.0,
            "available": true,
            "description": "Corner suite with a sea view",
            "rating": 4.5
        }"#
    }

    #[test]
    fn test_room_deserializes_full_payload() {
        let room: Room = serde_json::from_str(room_json()).unwrap();
        assert_eq!(room.id, 3);
        assert_eq!(room.room_type, "Suite");
        assert!(room.available);
        assert_eq!(room.rating, Some(4.5));
        assert!(room.description.is_some());
    }

    #[test]
    fn test_room_optional_fields_default() {
        let room: Room = serde_json::from_str(
            r#"{"id": 1, "room_type": "Single", "price": 100.0, "available": false}"#,
        )
        .unwrap();
        assert_eq!(room.description, None);
        assert_eq!(room.rating, None);
        assert_eq!(room.rating_or_zero(), 0.0);
    }

    #[test]
    fn test_action_kind_paths_and_availability() {
        assert_eq!(ActionKind::Book.path_segment(), "book");
        assert_eq!(ActionKind::Release.path_segment(), "release");
        assert!(!ActionKind::Book.resulting_availability());
        assert!(ActionKind::Release.resulting_availability());
    }

    #[test]
    fn test_classify_room_error() {
        let not_found = classify_room_error(
            7,
            ConciergeError::Api("Room with ID 7 not found".to_string()),
        );
        assert!(matches!(not_found, ConciergeError::RoomNotFound(7)));

        let taken = classify_room_error(
            3,
            ConciergeError::Api("Room 103 is already booked".to_string()),
        );
        assert!(matches!(taken, ConciergeError::RoomUnavailable(3)));

        let other = classify_room_error(1, ConciergeError::Api("boom".to_string()));
        assert!(matches!(other, ConciergeError::Api(_)));
    }
}
