//! Room CLI command handlers

use crate::api::rooms::{ActionKind, Room, RoomsApi};
use crate::api::ApiClient;
use crate::cli::commands::RoomsCommand;
use crate::core::config::Config;
use crate::core::view::{visible_rooms, AvailabilityFilter, SortKey};
use crate::error::Result;

/// Handle room commands
pub async fn handle_rooms(command: RoomsCommand) -> Result<()> {
    match command {
        RoomsCommand::List {
            filter,
            sort,
            search,
        } => handle_list(filter, sort, search).await,
        RoomsCommand::View { id } => handle_view(id).await,
        RoomsCommand::Book { id } => handle_action(ActionKind::Book, id).await,
        RoomsCommand::Release { id } => handle_action(ActionKind::Release, id).await,
    }
}

async fn handle_list(
    filter: AvailabilityFilter,
    sort: Option<SortKey>,
    search: Option<String>,
) -> Result<()> {
    let client = ApiClient::new()?;
    let rooms = RoomsApi::new(&client).list().await?;

    // CLI default sort comes from the config file unless overridden
    let sort_by = match sort {
        Some(key) => key,
        None => Config::load().map(|c| c.sort_by).unwrap_or_default(),
    };

    let query = search.as_deref().unwrap_or("");
    let visible = visible_rooms(&rooms, filter, sort_by, query);

    if visible.is_empty() {
        println!("No rooms match the current filter and search.");
        return Ok(());
    }

    println!("Rooms at {}:\n", client.base_url());

    for room in visible {
        print_room_line(room);
    }

    Ok(())
}

async fn handle_view(id: i64) -> Result<()> {
    let client = ApiClient::new()?;
    let room = RoomsApi::new(&client).view(id).await?;

    println!("Room #{}", room.id);
    println!("  Type:      {}", room.room_type);
    println!("  Price:     ${:.2}/night", room.price);
    println!(
        "  Status:    {}",
        if room.available { "Available" } else { "Booked" }
    );
    if let Some(rating) = room.rating {
        println!("  Rating:    {:.1}/5", rating);
    }
    if let Some(description) = &room.description {
        println!("  About:     {}", description);
    }

    Ok(())
}

async fn handle_action(action: ActionKind, id: i64) -> Result<()> {
    let client = ApiClient::new()?;
    let receipt = RoomsApi::new(&client).act(action, id).await?;

    println!("✓ {}", receipt.message);
    Ok(())
}

fn print_room_line(room: &Room) {
    let marker = if room.available { "●" } else { "○" };
    let status = if room.available { "available" } else { "booked" };
    let rating = room
        .rating
        .map(|r| format!(" • {:.1}/5", r))
        .unwrap_or_default();

    println!(
        "{} #{:<4} {:<10} ${:>8.2}/night • {}{}",
        marker, room.id, room.room_type, room.price, status, rating
    );
}
