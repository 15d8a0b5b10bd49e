use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use taskdeck_core::modal::{ModalKind, ModalPayload};

use crate::app::{App, FormState};
use crate::theme::Theme;

pub struct ModalWidget;

impl ModalWidget {
    /// Render every open modal, oldest first so the newest sits on top
    pub fn render(frame: &mut Frame, app: &App) {
        let open = app.modals.open_modals();
        for (depth, name) in open.iter().enumerate() {
            let Ok(kind) = name.parse::<ModalKind>() else {
                continue;
            };
            // Stacked modals shift down-right so the ones below stay visible
            let shift = depth as u16 * 2;
            match kind {
                ModalKind::AddUser => {
                    Self::render_form(frame, &app.theme, "Add User", &app.user_form, shift)
                }
                ModalKind::AddTask => {
                    let owner = match app.modals.data(name) {
                        Some(ModalPayload::AddTask { user_id: Some(id) }) => app
                            .users
                            .iter()
                            .find(|u| u.id == id)
                            .map(|u| u.name.clone())
                            .unwrap_or(id),
                        _ => "nobody".to_string(),
                    };
                    let title = format!("Add Task for {}", truncate_str(&owner, 24));
                    Self::render_form(frame, &app.theme, &title, &app.task_form, shift)
                }
                ModalKind::ImagePreview => {
                    Self::render_preview(frame, &app.theme, app.modals.data(name), shift)
                }
            }
        }
    }

    fn render_form(frame: &mut Frame, theme: &Theme, title: &str, form: &FormState, shift: u16) {
        let height = form.fields.len() as u16 * 3 + 4;
        let popup_area = popup_rect(frame.area(), 50, height, shift);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.modal_border))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut constraints: Vec<Constraint> =
            form.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner_area);

        for (i, (label, value)) in form.fields.iter().enumerate() {
            let focused = i == form.focused;
            let border = if focused { theme.accent } else { theme.grey0 };
            let cursor = if focused { "_" } else { "" };
            let field = Paragraph::new(format!("{}{}", value, cursor))
                .style(Style::default().fg(theme.fg0))
                .block(
                    Block::default()
                        .title(format!(" {} ", label))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(field, chunks[i]);
        }

        let hint = match &form.error {
            Some(error) => Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                "Enter:save  Tab:next field  Esc:cancel",
                Style::default().fg(theme.grey1),
            )),
        };
        frame.render_widget(
            Paragraph::new(hint).alignment(Alignment::Center),
            chunks[form.fields.len()],
        );
    }

    fn render_preview(frame: &mut Frame, theme: &Theme, payload: Option<ModalPayload>, shift: u16) {
        let popup_area = popup_rect(frame.area(), 44, 9, shift);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Image Preview ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));

        let lines = match payload {
            Some(ModalPayload::ImagePreview { image_url, caption }) => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        truncate_str(&image_url, 38),
                        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                    )),
                ];
                if let Some(caption) = caption {
                    lines.push(Line::from(Span::styled(
                        truncate_str(&caption, 38),
                        Style::default().fg(theme.grey1),
                    )));
                }
                lines
            }
            _ => vec![Line::from(""), Line::from("No image selected")],
        };

        let mut lines = lines;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Esc:close",
            Style::default().fg(theme.grey1),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

/// Centered popup, shifted for stacking and kept inside `area`
fn popup_rect(area: Rect, width: u16, height: u16, shift: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let rect = centered_rect(width, height, area);
    let x = (rect.x + shift).min(area.right().saturating_sub(width));
    let y = (rect.y + shift / 2).min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a rather long name", 10), "a rathe...");
    }

    #[test]
    fn test_popup_rect_stays_inside() {
        let area = Rect::new(0, 0, 40, 12);
        let rect = popup_rect(area, 50, 10, 6);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
