//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::rooms::{ActionKind, Room, RoomsApi};
use crate::api::ApiClient;
use crate::core::config::Config;
use crate::core::view::{visible_rooms, AvailabilityFilter, SortKey};
use crate::error::{ConciergeError, Result};
use crate::tui::event::{is_back_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Room list loaded successfully
    RoomsLoaded(Vec<Room>),
    /// Room list load failed
    RoomsError(String),
    /// Single room loaded for the detail screen
    RoomLoaded(Box<Room>),
    /// Room detail load failed
    RoomError(String),
    /// A book/release action succeeded
    ActionCompleted {
        action: ActionKind,
        room_id: i64,
        message: String,
    },
    /// A book/release action failed
    ActionFailed {
        action: ActionKind,
        room_id: i64,
        error: String,
    },
}

/// Current screen in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Rooms,
    RoomDetail(i64),
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }
}

/// Error popup for displaying important errors that require user acknowledgment
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    /// Title of the error popup (e.g., "Booking Failed")
    pub title: String,
    /// The full error message to display
    pub message: String,
}

/// Main TUI application
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current screen
    pub current_screen: Screen,
    /// Navigation history for back navigation
    pub navigation_stack: Vec<Screen>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Tick counter for spinner animation
    pub tick_counter: u64,

    /// API client shared with background tasks (cheap to clone)
    client: ApiClient,
    /// Configured default sort key, restored on remount
    default_sort: SortKey,

    // ─────────────────────────────────────────────────────────────────────────
    // Async communication
    // ─────────────────────────────────────────────────────────────────────────
    /// Sender for async messages (cloned into tasks)
    pub async_tx: mpsc::Sender<AsyncMessage>,
    /// Receiver for async messages
    pub async_rx: mpsc::Receiver<AsyncMessage>,

    // ─────────────────────────────────────────────────────────────────────────
    // Room list view-state
    // ─────────────────────────────────────────────────────────────────────────
    /// The room list as last fetched, with optimistic availability flips
    pub rooms: Vec<Room>,
    /// Whether the room list is currently loading
    pub rooms_loading: bool,
    /// Whether we've attempted to fetch the room list
    pub rooms_fetched: bool,
    /// Error message if the room list failed to load
    pub rooms_error: Option<String>,
    /// Availability filter
    pub filter: AvailabilityFilter,
    /// Sort key
    pub sort_by: SortKey,
    /// Case-insensitive room-type search query
    pub search_query: String,
    /// Whether keystrokes currently edit the search query
    pub search_input_mode: bool,
    /// Room list selection
    pub rooms_selection: ListState,

    // ─────────────────────────────────────────────────────────────────────────
    // Room detail data
    // ─────────────────────────────────────────────────────────────────────────
    /// Currently viewed room details
    pub selected_room: Option<Room>,
    /// Whether room detail is loading
    pub room_detail_loading: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Error popup
    // ─────────────────────────────────────────────────────────────────────────
    /// Error popup to display (requires user dismissal)
    pub error_popup: Option<ErrorPopup>,
}

impl App {
    /// Create a new app instance
    pub fn new() -> Result<Self> {
        let (async_tx, async_rx) = mpsc::channel(32);

        let client = ApiClient::new()?;
        let sort_by = Config::load().map(|c| c.sort_by).unwrap_or_default();

        Ok(Self {
            running: true,
            current_screen: Screen::Rooms,
            navigation_stack: Vec::new(),
            status_message: None,
            show_help: false,
            tick_counter: 0,

            client,
            default_sort: sort_by,

            // Async
            async_tx,
            async_rx,

            // Room list
            rooms: Vec::new(),
            rooms_loading: false,
            rooms_fetched: false,
            rooms_error: None,
            filter: AvailabilityFilter::All,
            sort_by,
            search_query: String::new(),
            search_input_mode: false,
            rooms_selection: ListState::default(),

            // Room detail
            selected_room: None,
            room_detail_loading: false,

            // Error popup
            error_popup: None,
        })
    }

    /// The base URL the app talks to (shown in the header)
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// The derived room list: filter, then sort, then search
    pub fn visible(&self) -> Vec<&Room> {
        visible_rooms(&self.rooms, self.filter, self.sort_by, &self.search_query)
    }

    /// Whether the list view is in its terminal failed state
    pub fn is_failed(&self) -> bool {
        self.rooms_error.is_some()
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| ConciergeError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        // Initial mount of the room list
        self.mount_rooms();

        // Main event loop
        while self.running {
            // Draw the UI
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| ConciergeError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            // Handle events
            if let Some(event) = events.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Resize(_, _) => {
                        // Terminal resize is handled automatically by ratatui
                    }
                    AppEvent::Tick => {
                        self.tick_counter = self.tick_counter.wrapping_add(1);
                    }
                }
            }
        }

        Self::restore_terminal(&mut terminal)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mounting and background fetches
    // ─────────────────────────────────────────────────────────────────────────

    /// (Re)mount the room list view: reset its state and start the fetch
    ///
    /// This is the only way out of a failed load, matching a page reload
    /// in the original UI.
    pub fn mount_rooms(&mut self) {
        self.rooms = Vec::new();
        self.rooms_loading = true;
        self.rooms_fetched = false;
        self.rooms_error = None;
        self.filter = AvailabilityFilter::All;
        self.sort_by = self.default_sort;
        self.search_query.clear();
        self.search_input_mode = false;
        self.rooms_selection = ListState::default();

        let tx = self.async_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = RoomsApi::new(&client).list().await;
            let msg = match result {
                Ok(rooms) => AsyncMessage::RoomsLoaded(rooms),
                Err(e) => AsyncMessage::RoomsError(e.to_string()),
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Fetch a single room for the detail screen
    fn fetch_room_detail(&mut self, room_id: i64) {
        self.selected_room = None;
        self.room_detail_loading = true;

        let tx = self.async_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = RoomsApi::new(&client).view(room_id).await;
            let msg = match result {
                Ok(room) => AsyncMessage::RoomLoaded(Box::new(room)),
                Err(e) => AsyncMessage::RoomError(e.to_string()),
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Fire a book/release action for a room
    ///
    /// Requests on different rooms may overlap freely; there is no
    /// de-duplication or cancellation. The backend is the authority on
    /// whether an action is allowed.
    pub fn handle_room_action(&mut self, action: ActionKind, room_id: i64) {
        self.status_message = Some(format!("{}ing room {}...", action.label(), room_id));

        let tx = self.async_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = RoomsApi::new(&client).act(action, room_id).await;
            let msg = match result {
                Ok(receipt) => AsyncMessage::ActionCompleted {
                    action,
                    room_id,
                    message: receipt.message,
                },
                Err(e) => AsyncMessage::ActionFailed {
                    action,
                    room_id,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg).await;
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Async message handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle async message from background tasks
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::RoomsLoaded(rooms) => {
                self.rooms = rooms;
                self.rooms_loading = false;
                self.rooms_fetched = true;
                self.rooms_error = None;
                self.sync_selection();
                if self.rooms.is_empty() {
                    self.status_message = Some("No rooms found".to_string());
                } else {
                    self.status_message = Some(format!("Loaded {} rooms", self.rooms.len()));
                }
            }
            AsyncMessage::RoomsError(err) => {
                self.rooms_loading = false;
                self.rooms_fetched = true;
                self.rooms_error = Some(err.clone());
                self.status_message = Some(format!("Error: {}", err));
            }
            AsyncMessage::RoomLoaded(room) => {
                self.selected_room = Some(*room);
                self.room_detail_loading = false;
            }
            AsyncMessage::RoomError(err) => {
                self.room_detail_loading = false;
                self.status_message = Some(format!("Error: {}", err));
            }
            AsyncMessage::ActionCompleted {
                action,
                room_id,
                message,
            } => {
                // Optimistic local flip, only for the acted-on room
                if let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) {
                    room.available = action.resulting_availability();
                }
                if let Some(room) = self.selected_room.as_mut().filter(|r| r.id == room_id) {
                    room.available = action.resulting_availability();
                }
                self.sync_selection();
                self.status_message = Some(format!("✓ {}", message));
            }
            AsyncMessage::ActionFailed {
                action,
                room_id,
                error,
            } => {
                // The room list stays untouched; the popup blocks until
                // dismissed, like the original's alert
                self.error_popup = Some(ErrorPopup {
                    title: format!("{} Failed", action.label()),
                    message: format!("Room {}: {}", room_id, error),
                });
            }
        }
    }

    /// Clamp the list selection to the currently visible rooms
    fn sync_selection(&mut self) {
        let total = self.visible().len();
        self.rooms_selection.total = total;
        if total == 0 {
            self.rooms_selection.selected = 0;
        } else {
            self.rooms_selection.selected = self.rooms_selection.selected.min(total - 1);
        }
    }

    /// The room currently under the cursor, if any
    pub fn selected_visible_room(&self) -> Option<&Room> {
        self.visible()
            .get(self.rooms_selection.selected)
            .copied()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // The error popup blocks everything until dismissed
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.error_popup = None;
            }
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.search_input_mode {
            self.handle_search_input(key);
            return;
        }

        if is_quit_key(&key) {
            self.running = false;
            return;
        }

        match self.current_screen {
            Screen::Rooms => self.handle_rooms_keys(key),
            Screen::RoomDetail(id) => self.handle_detail_keys(key, id),
        }
    }

    /// Keys while editing the search query; every change re-derives the list
    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.search_input_mode = false;
            }
            KeyCode::Esc => {
                self.search_input_mode = false;
                self.search_query.clear();
            }
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
            }
            _ => {}
        }
        self.sync_selection();
    }

    /// Keys on the room list screen
    fn handle_rooms_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => {
                // Remount: full reset plus refetch
                self.mount_rooms();
                self.status_message = Some("Reloading rooms...".to_string());
            }
            _ if self.is_failed() || self.rooms_loading => {
                // Failed is terminal until remount; loading accepts no input
            }
            _ => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.rooms_selection.next();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.rooms_selection.previous();
                }
                KeyCode::Char('f') => {
                    self.filter = self.filter.toggled();
                    self.sync_selection();
                }
                KeyCode::Char('s') => {
                    self.sort_by = self.sort_by.toggled();
                    self.sync_selection();
                }
                KeyCode::Char('/') => {
                    self.search_input_mode = true;
                }
                KeyCode::Char('b') | KeyCode::Char(' ') => {
                    // Book when available, release when booked
                    if let Some(room) = self.selected_visible_room() {
                        let action = if room.available {
                            ActionKind::Book
                        } else {
                            ActionKind::Release
                        };
                        let id = room.id;
                        self.handle_room_action(action, id);
                    }
                }
                KeyCode::Enter => {
                    if let Some(room) = self.selected_visible_room() {
                        let id = room.id;
                        self.navigation_stack.push(self.current_screen);
                        self.current_screen = Screen::RoomDetail(id);
                        self.fetch_room_detail(id);
                    }
                }
                _ => {}
            },
        }
    }

    /// Keys on the room detail screen
    fn handle_detail_keys(&mut self, key: KeyEvent, room_id: i64) {
        if is_back_key(&key) {
            self.current_screen = self.navigation_stack.pop().unwrap_or(Screen::Rooms);
            self.selected_room = None;
            return;
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('b') | KeyCode::Char(' ') => {
                if let Some(room) = &self.selected_room {
                    let action = if room.available {
                        ActionKind::Book
                    } else {
                        ActionKind::Release
                    };
                    self.handle_room_action(action, room_id);
                }
            }
            KeyCode::Char('r') => {
                self.fetch_room_detail(room_id);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        // Offline construction: the client never sends anything in these tests
        let (async_tx, async_rx) = mpsc::channel(32);
        App {
            running: true,
            current_screen: Screen::Rooms,
            navigation_stack: Vec::new(),
            status_message: None,
            show_help: false,
            tick_counter: 0,
            client: ApiClient::with_base_url("http://localhost:5000").unwrap(),
            default_sort: SortKey::Price,
            async_tx,
            async_rx,
            rooms: Vec::new(),
            rooms_loading: true,
            rooms_fetched: false,
            rooms_error: None,
            filter: AvailabilityFilter::All,
            sort_by: SortKey::Price,
            search_query: String::new(),
            search_input_mode: false,
            rooms_selection: ListState::default(),
            selected_room: None,
            room_detail_loading: false,
            error_popup: None,
        }
    }

    fn room(id: i64, room_type: &str, price: f64, available: bool) -> Room {
        Room {
            id,
            room_type: room_type.to_string(),
            price,
            available,
            description: None,
            rating: None,
        }
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        app.handle_async_message(AsyncMessage::RoomsLoaded(vec![
            room(1, "Single", 100.0, true),
            room(2, "Double", 150.0, false),
            room(3, "Suite", 300.0, true),
        ]));
        app
    }

    #[test]
    fn test_rooms_loaded_clears_loading_and_error() {
        let app = loaded_app();
        assert!(!app.rooms_loading);
        assert!(app.rooms_fetched);
        assert!(app.rooms_error.is_none());
        assert_eq!(app.rooms.len(), 3);
        assert_eq!(app.rooms_selection.total, 3);
    }

    #[test]
    fn test_load_failure_is_terminal_and_shows_no_rooms() {
        let mut app = test_app();
        app.handle_async_message(AsyncMessage::RoomsError("connection refused".to_string()));

        assert!(app.is_failed());
        assert!(app.visible().is_empty());

        // Non-remount keys are ignored in the failed state
        app.handle_key_event(KeyEvent::from(KeyCode::Char('f')));
        app.handle_key_event(KeyEvent::from(KeyCode::Char('/')));
        assert!(app.is_failed());
        assert!(!app.search_input_mode);
    }

    #[test]
    fn test_successful_book_flips_only_that_room() {
        let mut app = loaded_app();
        app.handle_async_message(AsyncMessage::ActionCompleted {
            action: ActionKind::Book,
            room_id: 3,
            message: "Room 3 booked successfully".to_string(),
        });

        let booked = app.rooms.iter().find(|r| r.id == 3).unwrap();
        assert!(!booked.available);
        assert!(app.rooms.iter().find(|r| r.id == 1).unwrap().available);
        assert!(!app.rooms.iter().find(|r| r.id == 2).unwrap().available);
        assert!(app.error_popup.is_none());
    }

    #[test]
    fn test_successful_release_flips_room_back() {
        let mut app = loaded_app();
        app.handle_async_message(AsyncMessage::ActionCompleted {
            action: ActionKind::Release,
            room_id: 2,
            message: "Room 2 released".to_string(),
        });
        assert!(app.rooms.iter().find(|r| r.id == 2).unwrap().available);
    }

    #[test]
    fn test_failed_action_leaves_rooms_unchanged_and_pops_alert() {
        let mut app = loaded_app();
        let before = app.rooms.clone();

        app.handle_async_message(AsyncMessage::ActionFailed {
            action: ActionKind::Book,
            room_id: 1,
            error: "Room 1 is already booked".to_string(),
        });

        assert_eq!(app.rooms, before);
        let popup = app.error_popup.as_ref().unwrap();
        assert_eq!(popup.title, "Book Failed");

        // Popup blocks other input until dismissed
        app.handle_key_event(KeyEvent::from(KeyCode::Char('f')));
        assert_eq!(app.filter, AvailabilityFilter::All);
        assert!(app.error_popup.is_some());

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert!(app.error_popup.is_none());
    }

    #[test]
    fn test_filter_sort_search_rederive_visible_list() {
        let mut app = loaded_app();

        app.handle_key_event(KeyEvent::from(KeyCode::Char('f')));
        assert_eq!(app.filter, AvailabilityFilter::Available);
        assert!(app.visible().iter().all(|r| r.available));

        app.handle_key_event(KeyEvent::from(KeyCode::Char('s')));
        assert_eq!(app.sort_by, SortKey::Rating);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('/')));
        assert!(app.search_input_mode);
        for c in "suite".chars() {
            app.handle_key_event(KeyEvent::from(KeyCode::Char(c)));
        }
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert!(!app.search_input_mode);

        let visible = app.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn test_search_with_no_match_empties_visible_list() {
        let mut app = loaded_app();
        app.search_query = "penthouse".to_string();
        app.sync_selection();
        assert!(app.visible().is_empty());
        assert_eq!(app.rooms_selection.total, 0);
    }

    #[test]
    fn test_selection_clamps_when_filter_shrinks_list() {
        let mut app = loaded_app();
        app.rooms_selection.selected = 2;
        app.handle_key_event(KeyEvent::from(KeyCode::Char('f')));
        assert!(app.rooms_selection.selected < app.visible().len());
    }

    #[test]
    fn test_list_selection_wraps() {
        let mut state = ListState::new(3);
        state.previous();
        assert_eq!(state.selected, 2);
        state.next();
        assert_eq!(state.selected, 0);
    }
}
