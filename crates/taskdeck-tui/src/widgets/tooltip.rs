use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use taskdeck_core::tooltip::TooltipContent;

use crate::app::App;

pub struct TooltipWidget;

impl TooltipWidget {
    /// Render the visible tooltip, converting its placement back to cells
    pub fn render(frame: &mut Frame, app: &App) {
        let Some(tooltip) = app.tooltip.current() else {
            return;
        };
        let metrics = app.deck.metrics();
        let screen = frame.area();

        let x = (tooltip.rect.x / metrics.cell_width).round().max(0.0) as u16;
        let y = (tooltip.rect.y / metrics.cell_height).round().max(0.0) as u16;
        let width = (tooltip.rect.width / metrics.cell_width).round() as u16;
        let height = (tooltip.rect.height / metrics.cell_height).round() as u16;
        let area = Rect::new(x, y, width, height).intersection(screen);
        if area.width < 3 || area.height < 3 {
            return;
        }

        let theme = &app.theme;
        let lines = match &tooltip.content {
            TooltipContent::User { id, name } => vec![
                Line::from(Span::styled(
                    name.as_str(),
                    Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(id.as_str(), Style::default().fg(theme.grey1))),
            ],
            TooltipContent::Text(text) => vec![Line::from(text.as_str())],
        };

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.tooltip))
                .style(Style::default().bg(theme.bg2)),
        );
        frame.render_widget(paragraph, area);
    }
}
