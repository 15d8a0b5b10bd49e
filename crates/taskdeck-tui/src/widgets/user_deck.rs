use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use taskdeck_core::scroll::{Axis, CursorState};

use super::modal::truncate_str;
use crate::app::App;

pub struct UserDeckWidget;

impl UserDeckWidget {
    /// Render the visible user cards in the deck area
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let area = app.deck.area();
        let grabbing = app.deck.cursor() == CursorState::Grabbing;

        if app.users.is_empty() {
            let empty = Paragraph::new("No users yet. Press 'a' to add one.")
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        for card in app.deck.visible_cards() {
            let Some(user) = app.users.get(card.index) else {
                continue;
            };
            let border = if grabbing {
                theme.card_grabbing
            } else if app.hovered == Some(card.index) {
                theme.hovered
            } else {
                theme.card_border
            };

            let inner_width = card.rect.width.saturating_sub(2) as usize;
            let task_count = app.tasks_for(&user.id).len();
            let lines = vec![
                Line::from(Span::styled(
                    truncate_str(&user.name, inner_width.max(1)),
                    Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_str(&user.avatar, inner_width.max(1)),
                    Style::default().fg(theme.grey1),
                )),
                Line::from(Span::styled(
                    format!("{} task(s)", task_count),
                    Style::default().fg(theme.info),
                )),
            ];

            let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .title(format!(" {} ", user.id))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .style(Style::default().bg(theme.bg0)),
            );
            frame.render_widget(paragraph, card.rect);
        }
    }
}

pub struct TaskPanelWidget;

impl TaskPanelWidget {
    /// Render the tasks of the focused user
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let (title, lines) = match app.focused_user() {
            Some(user) => {
                let tasks = app.tasks_for(&user.id);
                let lines: Vec<Line> = if tasks.is_empty() {
                    vec![Line::from(Span::styled(
                        "No tasks. Press 't' to add one.",
                        Style::default().fg(theme.grey1),
                    ))]
                } else {
                    tasks
                        .iter()
                        .map(|task| {
                            Line::from(vec![
                                Span::styled(
                                    task.title.clone(),
                                    Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                                ),
                                Span::styled(
                                    format!("  {}", task.summary),
                                    Style::default().fg(theme.grey1),
                                ),
                            ])
                        })
                        .collect()
                };
                (format!(" Tasks: {} ", user.name), lines)
            }
            None => (" Tasks ".to_string(), Vec::new()),
        };

        let hint = match app.deck.axis() {
            Axis::Horizontal => " drag left/right ",
            Axis::Vertical => " drag up/down ",
        };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(title)
                .title_bottom(Line::from(hint).right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey0))
                .style(Style::default().bg(theme.bg0)),
        );
        frame.render_widget(paragraph, area);
    }
}
