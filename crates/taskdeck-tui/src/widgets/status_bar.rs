use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use taskdeck_core::scroll::{Axis, Driver};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;

        let axis_str = match app.deck.axis() {
            Axis::Horizontal => "HORIZONTAL",
            Axis::Vertical => "VERTICAL",
        };
        let driver_str = match app.deck.driver(now) {
            Driver::Idle => "idle",
            Driver::Drag => "drag",
            Driver::Momentum => "momentum",
            Driver::Wheel => "wheel",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let open = app.modals.open_modals();
            let modals = if open.is_empty() {
                "none".to_string()
            } else {
                open.join(",")
            };
            format!(
                " {} | {} | offset {:.0} | users {} | modals {}",
                axis_str,
                driver_str,
                app.deck.offset(),
                app.users.len(),
                modals
            )
        };

        let help_hint = " q:quit a:user t:task p:preview esc:close ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
