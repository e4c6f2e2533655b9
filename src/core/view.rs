//! Room view pipeline
//!
//! The displayed room list is a pure function of
//! `(rooms, filter, sort key, search query)`. The pipeline always runs in
//! the same order: filter by availability, sort, then match the search
//! query against the room type.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::api::rooms::Room;

/// Availability filter applied before sorting and searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityFilter {
    /// Show every room
    #[default]
    All,
    /// Show only rooms that can be booked right now
    Available,
}

impl AvailabilityFilter {
    /// Whether a room passes this filter
    pub fn matches(&self, room: &Room) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => room.available,
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AvailabilityFilter::All => "All",
            AvailabilityFilter::Available => "Available",
        }
    }

    /// The other filter (used for toggling in the TUI)
    pub fn toggled(&self) -> Self {
        match self {
            AvailabilityFilter::All => AvailabilityFilter::Available,
            AvailabilityFilter::Available => AvailabilityFilter::All,
        }
    }
}

/// Sort key applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Cheapest first
    #[default]
    Price,
    /// Best rated first; rooms without a rating sort as zero
    Rating,
}

impl SortKey {
    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Price => "Price ↑",
            SortKey::Rating => "Rating ↓",
        }
    }

    /// The other sort key (used for toggling in the TUI)
    pub fn toggled(&self) -> Self {
        match self {
            SortKey::Price => SortKey::Rating,
            SortKey::Rating => SortKey::Price,
        }
    }

    fn compare(&self, a: &Room, b: &Room) -> Ordering {
        match self {
            SortKey::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortKey::Rating => b
                .rating_or_zero()
                .partial_cmp(&a.rating_or_zero())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Derive the visible room list: filter, then sort, then search
///
/// The search query is a case-insensitive substring match on the room
/// type; an empty query matches everything. Ties keep the backend's
/// order (stable sort).
pub fn visible_rooms<'a>(
    rooms: &'a [Room],
    filter: AvailabilityFilter,
    sort_by: SortKey,
    query: &str,
) -> Vec<&'a Room> {
    let mut visible: Vec<&Room> = rooms.iter().filter(|r| filter.matches(r)).collect();

    visible.sort_by(|a, b| sort_by.compare(a, b));

    let needle = query.trim().to_lowercase();
    if !needle.is_empty() {
        visible.retain(|r| r.room_type.to_lowercase().contains(&needle));
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: i64, room_type: &str, price: f64, available: bool, rating: Option<f32>) -> Room {
        Room {
            id,
            room_type: room_type.to_string(),
            price,
            available,
            description: None,
            rating,
        }
    }

    fn sample_rooms() -> Vec<Room> {
        vec![
            room(1, "Single", 100.0, true, Some(3.5)),
            room(2, "Double", 150.0, false, Some(4.8)),
            room(3, "Suite", 300.0, true, None),
            room(4, "Double", 140.0, true, Some(4.0)),
        ]
    }

    #[test]
    fn test_available_filter_keeps_only_available_rooms() {
        let rooms = sample_rooms();
        let visible = visible_rooms(&rooms, AvailabilityFilter::Available, SortKey::Price, "");
        assert!(visible.iter().all(|r| r.available));
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn test_sort_by_price_is_non_decreasing() {
        let rooms = sample_rooms();
        let visible = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Price, "");
        assert!(visible.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_sort_by_rating_is_non_increasing_with_missing_as_zero() {
        let rooms = sample_rooms();
        let visible = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Rating, "");
        assert!(visible
            .windows(2)
            .all(|w| w[0].rating_or_zero() >= w[1].rating_or_zero()));
        // The unrated suite sorts last
        assert_eq!(visible.last().unwrap().id, 3);
    }

    #[test]
    fn test_empty_query_returns_full_filtered_sorted_list() {
        let rooms = sample_rooms();
        let all = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Price, "");
        let blank = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Price, "   ");
        assert_eq!(all.len(), rooms.len());
        assert_eq!(
            all.iter().map(|r| r.id).collect::<Vec<_>>(),
            blank.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring_on_room_type() {
        let rooms = sample_rooms();
        let visible = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Price, "dOuB");
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.room_type == "Double"));
    }

    #[test]
    fn test_non_matching_query_yields_empty_list() {
        let rooms = sample_rooms();
        let visible = visible_rooms(&rooms, AvailabilityFilter::All, SortKey::Price, "penthouse");
        assert!(visible.is_empty());
    }

    #[test]
    fn test_filter_runs_before_search() {
        // A query matching only unavailable rooms yields nothing under
        // the available filter
        let rooms = vec![room(2, "Double", 150.0, false, Some(4.8))];
        let visible = visible_rooms(&rooms, AvailabilityFilter::Available, SortKey::Price, "double");
        assert!(visible.is_empty());
    }
}
