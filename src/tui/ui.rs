//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::api::rooms::Room;
use crate::tui::app::{App, Screen};
use crate::tui::theme::Theme;

/// Spinner frames for in-flight requests
const SPINNER: &[&str] = &["\u{25d0}", "\u{25d3}", "\u{25d1}", "\u{25d2}"]; // ◐ ◓ ◑ ◒

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Render help overlay on top if active
    if app.show_help {
        render_help_overlay(frame, app);
    }

    // Error popup goes above everything
    if let Some(popup) = &app.error_popup {
        render_error_popup(frame, &popup.title, &popup.message);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let screen_name = match app.current_screen {
        Screen::Rooms => "Rooms".to_string(),
        Screen::RoomDetail(id) => format!("Room #{}", id),
    };

    // Brand plus the static route labels of the original navbar
    let title = Line::from(vec![
        Span::styled(" Hotel Booking ", Theme::header()),
        Span::styled("│ ", Theme::muted()),
        Span::styled("Home  Rooms  About Us  Contact", Theme::muted()),
        Span::styled("  │ ", Theme::muted()),
        Span::raw(screen_name),
        Span::styled(format!("  ({})", app.base_url()), Theme::muted()),
    ]);

    let header = Paragraph::new(title)
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.current_screen {
        Screen::Rooms => render_rooms(frame, area, app),
        Screen::RoomDetail(_) => render_room_detail(frame, area, app),
    }
}

/// Render the room list screen
fn render_rooms(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter/sort/search line
            Constraint::Min(0),    // Room list
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_pipeline_line(frame, chunks[0], app);

    if app.rooms_loading {
        let spinner = SPINNER[app.tick_counter as usize % SPINNER.len()];
        let loading = Paragraph::new(format!("\n  {} Loading rooms...", spinner))
            .style(Theme::muted());
        frame.render_widget(loading, chunks[1]);
    } else if let Some(err) = &app.rooms_error {
        // Failed state: persistent error, no cards, remount to recover
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Could not load rooms",
                Style::default().fg(Theme::ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!("  {}", err), Style::default().fg(Theme::ERROR))),
            Line::from(""),
            Line::from(Span::styled("  Press [r] to reload", Theme::muted())),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), chunks[1]);
    } else {
        let visible = app.visible();

        if visible.is_empty() {
            let message = if app.rooms.is_empty() {
                "  No rooms found"
            } else {
                "  No rooms match the current filter and search"
            };
            let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
                .style(Theme::muted());
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(i, room)| room_card(room, i == app.rooms_selection.selected))
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .title(format!(" Rooms ({}) ", visible.len()))
                    .borders(Borders::ALL)
                    .border_style(Theme::normal()),
            );
            frame.render_widget(list, chunks[1]);
        }
    }

    let hints = if app.search_input_mode {
        " [Enter] Apply  [Esc] Clear search"
    } else {
        " [j/k] Navigate  [Enter] Details  [b] Book/Release  [f] Filter  [s] Sort  [/] Search  [r] Reload"
    };
    frame.render_widget(Paragraph::new(hints).style(Theme::muted()), chunks[2]);
}

/// One room rendered as a two-line card
fn room_card(room: &Room, selected: bool) -> ListItem<'static> {
    let marker = if room.available { "●" } else { "○" };
    let status = if room.available { "Available" } else { "Booked" };
    let rating = room
        .rating
        .map(|r| format!("  ★ {:.1}", r))
        .unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled(format!("  {} ", marker), Theme::availability(room.available)),
        Span::styled(
            format!("{:<10}", room.room_type),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ${:.2}/night", room.price)),
        Span::styled(rating, Style::default().fg(Theme::WARNING)),
    ]);

    let mut detail = format!("      {} • #{}", status, room.id);
    if let Some(description) = &room.description {
        detail.push_str(&format!(" • {}", truncate(description, 48)));
    }
    let detail_line = Line::from(Span::styled(detail, Theme::muted()));

    let item = ListItem::new(vec![title_line, detail_line]);
    if selected {
        item.style(Theme::selected())
    } else {
        item.style(Theme::normal())
    }
}

/// Current filter/sort/search settings above the list
fn render_pipeline_line(frame: &mut Frame, area: Rect, app: &App) {
    let search_span = if app.search_input_mode {
        Span::styled(
            format!("/{}\u{2588}", app.search_query),
            Style::default().fg(Theme::PRIMARY),
        )
    } else if app.search_query.is_empty() {
        Span::styled("(no search)", Theme::muted())
    } else {
        Span::raw(format!("/{}", app.search_query))
    };

    let line = Line::from(vec![
        Span::styled(" Filter: ", Theme::muted()),
        Span::raw(app.filter.display_name()),
        Span::styled("  Sort: ", Theme::muted()),
        Span::raw(app.sort_by.display_name()),
        Span::styled("  Search: ", Theme::muted()),
        search_span,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the room detail screen
fn render_room_detail(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Room Details ")
        .borders(Borders::ALL)
        .border_style(Theme::normal());

    let text: Vec<Line> = if app.room_detail_loading {
        let spinner = SPINNER[app.tick_counter as usize % SPINNER.len()];
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {} Loading room...", spinner),
                Theme::muted(),
            )),
        ]
    } else if let Some(room) = &app.selected_room {
        let status = if room.available { "Available" } else { "Booked" };
        let action = if room.available { "book" } else { "release" };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Type:    ", Theme::muted()),
                Span::styled(
                    room.room_type.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Price:   ", Theme::muted()),
                Span::raw(format!("${:.2}/night", room.price)),
            ]),
            Line::from(vec![
                Span::styled("  Status:  ", Theme::muted()),
                Span::styled(status, Theme::availability(room.available)),
            ]),
        ];

        if let Some(rating) = room.rating {
            lines.push(Line::from(vec![
                Span::styled("  Rating:  ", Theme::muted()),
                Span::styled(format!("{:.1}/5", rating), Style::default().fg(Theme::WARNING)),
            ]));
        }

        if let Some(description) = &room.description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::raw(format!("  {}", description))));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  [b] {} this room  [Esc] Back", action),
            Theme::muted(),
        )));

        lines
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled("  Room not loaded", Theme::muted())),
            Line::from(Span::styled("  Press [r] to retry", Theme::muted())),
        ]
    };

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status_text = if let Some(msg) = &app.status_message {
        format!(" {}", msg)
    } else {
        " [q] Quit │ [?] Help ".to_string()
    };

    let status = Paragraph::new(status_text)
        .style(Theme::status_bar())
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Calculate centered popup area (60% width, 70% height)
    let popup_width = (area.width * 60 / 100).min(60);
    let popup_height = (area.height * 70 / 100).min(18);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let (title, help_lines) = help_content(app.current_screen);

    let text: Vec<Line> = help_lines
        .into_iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Theme::PRIMARY)),
                Span::raw(desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::WARNING)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help, popup_area);
}

/// Help entries per screen
fn help_content(screen: Screen) -> (&'static str, Vec<(&'static str, &'static str)>) {
    match screen {
        Screen::Rooms => (
            "Room List Help",
            vec![
                ("j / ↓", "Next room"),
                ("k / ↑", "Previous room"),
                ("Enter", "View room details"),
                ("b / Space", "Book or release the selected room"),
                ("f", "Toggle availability filter"),
                ("s", "Toggle sort (price / rating)"),
                ("/", "Search by room type"),
                ("r", "Reload the room list"),
                ("q", "Quit"),
            ],
        ),
        Screen::RoomDetail(_) => (
            "Room Details Help",
            vec![
                ("b / Space", "Book or release this room"),
                ("r", "Reload room details"),
                ("Esc", "Back to the room list"),
                ("q", "Quit"),
            ],
        ),
    }
}

fn render_error_popup(frame: &mut Frame, title: &str, message: &str) {
    let area = frame.area();

    let popup_width = (area.width * 60 / 100).min(64);
    let popup_height = 8.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {}", message))),
        Line::from(""),
        Line::from(Span::styled("  [Enter] Dismiss", Theme::muted())),
    ];

    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ERROR)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

/// Truncate a string to max length with ellipsis
///
/// The cut never lands inside a multi-byte character, so descriptions
/// with accented text render instead of panicking.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_is_unchanged() {
        assert_eq!(truncate("Cozy single room", 48), "Cozy single room");
    }

    #[test]
    fn test_truncate_long_string_adds_ellipsis() {
        let long = "a".repeat(60);
        let cut = truncate(&long, 48);
        assert_eq!(cut.len(), 48);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_multibyte_boundaries() {
        // Accented copy longer than the cut point must not split a
        // character mid-sequence
        let description = "é".repeat(30);
        let cut = truncate(&description, 48);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 48);
        assert!(cut.trim_end_matches("...").chars().all(|c| c == 'é'));

        let mixed = "Suite côté mer avec vue panoramique et baignoire à remous";
        let cut = truncate(mixed, 48);
        assert!(cut.ends_with("..."));
    }
}
