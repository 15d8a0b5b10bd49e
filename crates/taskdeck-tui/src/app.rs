use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use taskdeck_core::modal::{ModalKind, ModalPayload, ModalStore, OpenWatch};
use taskdeck_core::scroll::{Driver, WrapJump};
use taskdeck_core::tooltip::{self, TooltipContent, TooltipSlot};
use taskdeck_core::AppConfig;
use tracing::{debug, info};

use crate::scroll::DeckScroller;
use crate::theme::Theme;

const DEFAULT_AVATAR: &str = "default-avatar.jpg";

/// A user shown as a card in the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

/// A task attached to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub summary: String,
}

/// Text fields of the form in an open add-user or add-task modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: Vec<(&'static str, String)>,
    pub focused: usize,
    pub error: Option<String>,
}

impl FormState {
    pub fn for_modal(kind: ModalKind) -> Self {
        let labels: &[&'static str] = match kind {
            ModalKind::AddUser => &["Name"],
            ModalKind::AddTask => &["Title", "Summary"],
            ModalKind::ImagePreview => &[],
        };
        Self {
            fields: labels.iter().map(|label| (*label, String::new())).collect(),
            focused: 0,
            error: None,
        }
    }

    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn push_char(&mut self, c: char) {
        if let Some((_, value)) = self.fields.get_mut(self.focused) {
            value.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some((_, value)) = self.fields.get_mut(self.focused) {
            value.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }
}

fn seed_users() -> Vec<User> {
    [
        ("u1", "Jasmine Washington"),
        ("u2", "Emily Thompson"),
        ("u3", "Marcus Johnson"),
        ("u4", "David Miller"),
        ("u5", "Priya Patel"),
        ("u6", "Arjun Singh"),
    ]
    .into_iter()
    .map(|(id, name)| User {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("user-{id}.jpg"),
    })
    .collect()
}

/// Main application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub modals: ModalStore,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub deck: DeckScroller,
    pub hovered: Option<usize>,
    pub tooltip: TooltipSlot,
    pub user_form: FormState,
    pub task_form: FormState,
    pub status_message: Option<String>,
    pub should_quit: bool,
    add_user_watch: OpenWatch,
    add_task_watch: OpenWatch,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let users = seed_users();
        let modals = ModalStore::new();
        let deck = DeckScroller::new(&config, users.len());
        Self {
            add_user_watch: modals.watch_open(ModalKind::AddUser),
            add_task_watch: modals.watch_open(ModalKind::AddTask),
            config,
            theme: Theme::default(),
            modals,
            users,
            tasks: Vec::new(),
            deck,
            hovered: None,
            tooltip: TooltipSlot::new(),
            user_form: FormState::for_modal(ModalKind::AddUser),
            task_form: FormState::for_modal(ModalKind::AddTask),
            status_message: None,
            should_quit: false,
        }
    }

    /// Split the screen into deck, task panel and status bar
    pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(7),
                Constraint::Length(1),
            ])
            .split(area);
        (chunks[0], chunks[1], chunks[2])
    }

    /// Keep the deck sized to the current terminal
    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        let (deck_area, _, _) = Self::layout(Rect::new(0, 0, width, height));
        self.deck.set_area(deck_area, now);
        self.tooltip.hide();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// The most recently opened modal, if any
    pub fn top_modal(&self) -> Option<ModalKind> {
        self.modals
            .open_modals()
            .last()
            .and_then(|name| name.parse().ok())
    }

    /// Whether keystrokes go to a form instead of the deck
    pub fn is_input_mode(&self) -> bool {
        matches!(
            self.top_modal(),
            Some(ModalKind::AddUser) | Some(ModalKind::AddTask)
        )
    }

    pub fn active_form_mut(&mut self) -> Option<&mut FormState> {
        match self.top_modal()? {
            ModalKind::AddUser => Some(&mut self.user_form),
            ModalKind::AddTask => Some(&mut self.task_form),
            ModalKind::ImagePreview => None,
        }
    }

    /// The user the task panel and add-task refer to
    pub fn focused_user(&self) -> Option<&User> {
        self.hovered
            .and_then(|i| self.users.get(i))
            .or_else(|| self.users.first())
    }

    pub fn tasks_for(&self, user_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.user_id == user_id).collect()
    }

    /// Open a modal over the deck; the deck stops receiving the pointer
    fn show_modal(&mut self, kind: ModalKind, payload: ModalPayload) {
        // The release may never reach the deck once a modal covers it
        self.deck.detach();
        self.tooltip.hide();
        self.modals.open(kind, Some(payload));
    }

    pub fn open_add_user(&mut self) {
        self.show_modal(ModalKind::AddUser, ModalPayload::AddUser);
    }

    pub fn open_add_task(&mut self) {
        let user_id = self.focused_user().map(|u| u.id.clone());
        self.show_modal(ModalKind::AddTask, ModalPayload::AddTask { user_id });
    }

    pub fn open_image_preview(&mut self) {
        let Some(user) = self.focused_user() else {
            return;
        };
        let payload = ModalPayload::ImagePreview {
            image_url: user.avatar.clone(),
            caption: Some(user.name.clone()),
        };
        self.show_modal(ModalKind::ImagePreview, payload);
    }

    /// Close the most recently opened modal
    pub fn close_top_modal(&mut self) {
        if let Some(kind) = self.top_modal() {
            self.modals.close(kind.as_str());
        }
    }

    /// Reset forms whose modal just opened
    pub fn sync_modals(&mut self) {
        if self.add_user_watch.poll() == Some(true) {
            self.user_form = FormState::for_modal(ModalKind::AddUser);
        }
        if self.add_task_watch.poll() == Some(true) {
            self.task_form = FormState::for_modal(ModalKind::AddTask);
        }
    }

    /// Append a user with the next sequential id
    pub fn add_user(&mut self, name: &str, avatar: Option<String>) -> &User {
        let user = User {
            id: format!("u{}", self.users.len() + 1),
            name: name.to_string(),
            avatar: avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        };
        info!(id = %user.id, name = %user.name, "user added");
        self.users.push(user);
        self.deck.set_item_count(self.users.len());
        &self.users[self.users.len() - 1]
    }

    /// Submit the form of the topmost modal
    pub fn submit_form(&mut self) {
        match self.top_modal() {
            Some(ModalKind::AddUser) => {
                let name = self.user_form.value("Name").trim().to_string();
                if name.is_empty() {
                    self.user_form.error = Some("Name is required".to_string());
                    return;
                }
                let id = self.add_user(&name, None).id.clone();
                self.modals.close(ModalKind::AddUser.as_str());
                self.set_status(format!("Added {name} ({id})"));
            }
            Some(ModalKind::AddTask) => {
                let title = self.task_form.value("Title").trim().to_string();
                if title.is_empty() {
                    self.task_form.error = Some("Title is required".to_string());
                    return;
                }
                let user_id = match self.modals.data(ModalKind::AddTask.as_str()) {
                    Some(ModalPayload::AddTask { user_id: Some(id) }) => id,
                    _ => {
                        self.task_form.error = Some("No user selected".to_string());
                        return;
                    }
                };
                let task = Task {
                    id: format!("t{}", self.tasks.len() + 1),
                    user_id,
                    title,
                    summary: self.task_form.value("Summary").trim().to_string(),
                };
                debug!(id = %task.id, user = %task.user_id, "task added");
                self.set_status(format!("Added task \"{}\"", task.title));
                self.tasks.push(task);
                self.modals.close(ModalKind::AddTask.as_str());
            }
            _ => {}
        }
    }

    /// Route a mouse event to the deck and update hover state
    pub fn on_mouse(&mut self, event: MouseEvent, now: Instant) {
        if self.modals.open_modals().is_empty() {
            if let Some(outcome) = self.deck.handle_mouse(event, now) {
                self.report_wrap(outcome.wrapped);
            }
        }

        match event.kind {
            MouseEventKind::Moved if !self.deck.is_dragging() => {
                self.update_hover(event.column, event.row);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(index) = self.deck.card_at(event.column, event.row) {
                    self.hovered = Some(index);
                    self.open_image_preview();
                }
            }
            MouseEventKind::Down(_) | MouseEventKind::Drag(_) => self.tooltip.hide(),
            _ => {}
        }
    }

    /// Keyboard scrolling of the deck
    pub fn scroll_by(&mut self, delta_y: f64, now: Instant) {
        let outcome = self.deck.wheel(delta_y, now);
        self.report_wrap(outcome.wrapped);
        self.tooltip.hide();
    }

    /// Advance animations and pick up modal changes
    pub fn tick(&mut self, now: Instant) {
        let outcome = self.deck.tick(now);
        self.report_wrap(outcome.wrapped);
        if self.deck.driver(now) != Driver::Idle {
            self.tooltip.hide();
        }
        self.sync_modals();
    }

    fn report_wrap(&mut self, wrapped: Option<WrapJump>) {
        if let Some(jump) = wrapped {
            let message = match jump {
                WrapJump::ToEnd => "Wrapped to the last card",
                WrapJump::ToStart => "Wrapped to the first card",
            };
            self.set_status(message);
        }
    }

    fn update_hover(&mut self, column: u16, row: u16) {
        let hovered = self.deck.card_at(column, row);
        if hovered == self.hovered && self.tooltip.current().is_some() == hovered.is_some() {
            return;
        }
        self.hovered = hovered.or(self.hovered);

        let Some(index) = hovered else {
            self.tooltip.hide();
            return;
        };
        let Some(card) = self
            .deck
            .visible_cards()
            .into_iter()
            .find(|card| card.index == index)
        else {
            return;
        };
        let Some(user) = self.users.get(index) else {
            return;
        };

        // Placement runs in surface units so offsets and margins keep their size
        let metrics = self.deck.metrics();
        let to_units = |r: Rect| {
            tooltip::Rect::new(
                r.x as f64 * metrics.cell_width,
                r.y as f64 * metrics.cell_height,
                r.width as f64 * metrics.cell_width,
                r.height as f64 * metrics.cell_height,
            )
        };
        let label_width = unicode_width::UnicodeWidthStr::width(user.name.as_str()).max(user.id.len()) + 4;
        let size = (
            label_width as f64 * metrics.cell_width,
            4.0 * metrics.cell_height,
        );
        self.tooltip.show(
            TooltipContent::User {
                id: user.id.clone(),
                name: user.name.clone(),
            },
            to_units(card.rect),
            size,
            to_units(self.deck.area()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()));
        app.resize(60, 30, Instant::now());
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            if let Some(form) = app.active_form_mut() {
                form.push_char(c);
            }
        }
    }

    #[test]
    fn test_add_user_assigns_sequential_id() {
        let mut app = app();
        let user = app.add_user("Grace Hopper", None);
        assert_eq!(user.id, "u7");
        assert_eq!(user.avatar, "default-avatar.jpg");
        assert_eq!(app.deck.item_count(), 7);
    }

    #[test]
    fn test_add_user_modal_flow() {
        let mut app = app();
        app.open_add_user();
        app.sync_modals();
        assert!(app.is_input_mode());

        // Empty name is rejected and the modal stays open
        app.submit_form();
        assert!(app.modals.is_open("add-user"));
        assert!(app.user_form.error.is_some());

        type_text(&mut app, "Linus");
        app.submit_form();
        assert!(!app.modals.is_open("add-user"));
        assert_eq!(app.users.last().map(|u| u.name.as_str()), Some("Linus"));
    }

    #[test]
    fn test_form_resets_when_modal_reopens() {
        let mut app = app();
        app.open_add_user();
        app.sync_modals();
        type_text(&mut app, "draft");
        app.close_top_modal();
        app.sync_modals();

        app.open_add_user();
        app.sync_modals();
        assert_eq!(app.user_form.value("Name"), "");
    }

    #[test]
    fn test_add_task_uses_payload_user() {
        let mut app = app();
        app.hovered = Some(2);
        app.open_add_task();
        app.sync_modals();
        assert_eq!(
            app.modals.data("add-task"),
            Some(ModalPayload::AddTask {
                user_id: Some("u3".to_string())
            })
        );

        type_text(&mut app, "Write report");
        app.submit_form();
        assert_eq!(app.tasks_for("u3").len(), 1);
        assert!(app.modals.open_modals().is_empty());
    }

    #[test]
    fn test_stacked_modals_close_topmost_first() {
        let mut app = app();
        app.open_add_task();
        app.open_image_preview();
        assert_eq!(app.top_modal(), Some(ModalKind::ImagePreview));
        assert!(!app.is_input_mode());

        app.close_top_modal();
        assert_eq!(app.top_modal(), Some(ModalKind::AddTask));
        assert!(app.is_input_mode());
    }

    #[test]
    fn test_hover_shows_user_tooltip() {
        let mut app = app();
        let now = Instant::now();
        app.on_mouse(
            MouseEvent {
                kind: MouseEventKind::Moved,
                column: 2,
                row: 2,
                modifiers: KeyModifiers::NONE,
            },
            now,
        );
        assert_eq!(app.hovered, Some(0));
        assert!(matches!(
            app.tooltip.current().map(|t| &t.content),
            Some(TooltipContent::User { id, .. }) if id == "u1"
        ));
    }

    #[test]
    fn test_opening_modal_mid_drag_ends_the_drag() {
        let mut app = app();
        let now = Instant::now();
        let press = |kind: MouseEventKind| MouseEvent {
            kind,
            column: 5,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        app.on_mouse(press(MouseEventKind::Down(MouseButton::Left)), now);
        assert!(app.deck.is_dragging());

        app.open_add_user();
        assert!(!app.deck.is_dragging());
        // The release lands on the modal, not the deck
        app.on_mouse(press(MouseEventKind::Up(MouseButton::Left)), now);
        app.close_top_modal();

        assert!(!app.deck.is_dragging());
        app.scroll_by(100.0, now);
        assert_eq!(app.deck.offset(), 50.0);
    }

    #[test]
    fn test_deck_ignores_mouse_while_modal_open() {
        let mut app = app();
        let now = Instant::now();
        app.open_add_user();
        app.on_mouse(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 5,
                row: 2,
                modifiers: KeyModifiers::NONE,
            },
            now,
        );
        assert!(!app.deck.is_dragging());
    }
}
