//! Translation of crossterm mouse events into scroll engine events

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use taskdeck_core::scroll::ScrollEvent;

/// Wheel delta reported for one notch, matching a typical browser line delta
pub const WHEEL_NOTCH: f64 = 100.0;

/// Maps terminal cells to surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellMetrics {
    pub fn new(cell_width: u16, cell_height: u16) -> Self {
        Self {
            cell_width: cell_width.max(1) as f64,
            cell_height: cell_height.max(1) as f64,
        }
    }

    /// Position of a cell relative to `area`, in surface units
    pub fn to_units(&self, area: Rect, column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 - area.x as f64) * self.cell_width,
            (row as f64 - area.y as f64) * self.cell_height,
        )
    }

    /// Size of `area` in surface units
    pub fn area_units(&self, area: Rect) -> (f64, f64) {
        (
            area.width as f64 * self.cell_width,
            area.height as f64 * self.cell_height,
        )
    }

    /// Convert a unit span along x into a column span
    pub fn columns(&self, units: f64) -> f64 {
        units / self.cell_width
    }

    /// Convert a unit span along y into a row span
    pub fn rows(&self, units: f64) -> f64 {
        units / self.cell_height
    }
}

fn inside(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Translate a mouse event over `area`
///
/// Presses and wheel notches only count inside the area. Dragging outside it
/// ends the gesture, as leaving the surface does with a mouse.
pub fn translate_mouse(
    event: MouseEvent,
    area: Rect,
    metrics: CellMetrics,
    dragging: bool,
) -> Option<ScrollEvent> {
    let within = inside(area, event.column, event.row);
    let (x, y) = metrics.to_units(area, event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) if within => Some(ScrollEvent::PointerDown { x, y }),
        MouseEventKind::Drag(MouseButton::Left) if dragging => {
            if within {
                Some(ScrollEvent::PointerMove { x, y })
            } else {
                Some(ScrollEvent::PointerCancel)
            }
        }
        MouseEventKind::Up(MouseButton::Left) if dragging => Some(ScrollEvent::PointerUp),
        MouseEventKind::Moved if dragging && !within => Some(ScrollEvent::PointerCancel),
        MouseEventKind::ScrollDown if within => Some(ScrollEvent::Wheel { delta_y: WHEEL_NOTCH }),
        MouseEventKind::ScrollUp if within => Some(ScrollEvent::Wheel { delta_y: -WHEEL_NOTCH }),
        _ => None,
    }
}
