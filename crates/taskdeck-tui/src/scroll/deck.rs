use std::time::Instant;

use crossterm::event::MouseEvent;
use ratatui::layout::Rect;
use taskdeck_core::config::AppConfig;
use taskdeck_core::scroll::{
    Axis, CursorState, Driver, EventOutcome, ItemStrip, ScrollEngine, ScrollEvent, ScrollSurface,
    VirtualSurface,
};
use tracing::debug;

use super::binding::{translate_mouse, CellMetrics};

/// A card currently on screen, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCard {
    pub index: usize,
    pub rect: Rect,
}

/// The scrollable strip of user cards
///
/// Owns the scroll engine and a virtual surface sized in surface units.
/// Terminal cells are converted through [`CellMetrics`].
#[derive(Debug, Clone)]
pub struct DeckScroller {
    engine: ScrollEngine,
    surface: VirtualSurface,
    strip: ItemStrip,
    metrics: CellMetrics,
    area: Rect,
}

impl DeckScroller {
    pub fn new(config: &AppConfig, item_count: usize) -> Self {
        let strip = ItemStrip {
            count: item_count,
            item_width: config.ui.item_width as f64,
            item_height: config.ui.item_height as f64,
            gap: config.ui.item_gap as f64,
        };
        let mut engine = ScrollEngine::new(&config.scroll, 0.0);
        engine.set_item_strip(Some(strip));

        let mut deck = Self {
            engine,
            surface: VirtualSurface::default(),
            strip,
            metrics: CellMetrics::new(config.ui.cell_width, config.ui.cell_height),
            area: Rect::default(),
        };
        deck.update_content();
        deck
    }

    pub fn axis(&self) -> Axis {
        self.engine.axis()
    }

    pub fn offset(&self) -> f64 {
        self.surface.scroll_offset(self.axis())
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn cursor(&self) -> CursorState {
        self.engine.cursor()
    }

    pub fn driver(&self, now: Instant) -> Driver {
        self.engine.driver(now)
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// Whether frame ticks are needed to keep momentum running
    pub fn needs_update(&self) -> bool {
        self.engine.needs_update()
    }

    pub fn item_count(&self) -> usize {
        self.strip.count
    }

    /// Place the deck in `area`; a width change may switch the axis
    pub fn set_area(&mut self, area: Rect, now: Instant) {
        if area == self.area {
            return;
        }
        self.area = area;
        let (width, height) = self.metrics.area_units(area);
        self.surface.set_viewport(width, height);
        self.engine
            .handle(ScrollEvent::Resize { width, height }, &mut self.surface, now);
        self.update_content();
    }

    /// Track a change in the number of cards
    pub fn set_item_count(&mut self, count: usize) {
        if count == self.strip.count {
            return;
        }
        debug!(count, "deck item count changed");
        self.strip.count = count;
        self.engine.set_item_strip(Some(self.strip));
        self.update_content();
    }

    /// Feed a terminal mouse event; `None` when it does not concern the deck
    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> Option<EventOutcome> {
        let scroll_event = translate_mouse(event, self.area, self.metrics, self.engine.is_dragging())?;
        Some(self.engine.handle(scroll_event, &mut self.surface, now))
    }

    /// Keyboard scrolling goes through the wheel path
    pub fn wheel(&mut self, delta_y: f64, now: Instant) -> EventOutcome {
        self.engine
            .handle(ScrollEvent::Wheel { delta_y }, &mut self.surface, now)
    }

    /// Advance one animation frame
    pub fn tick(&mut self, now: Instant) -> EventOutcome {
        self.engine.handle(ScrollEvent::Tick, &mut self.surface, now)
    }

    /// Stop any drag or momentum, as when the deck is hidden
    pub fn detach(&mut self) {
        self.engine.detach();
    }

    /// Cards intersecting the deck area, clipped to it
    pub fn visible_cards(&self) -> Vec<VisibleCard> {
        let axis = self.axis();
        let offset = self.offset();
        let pitch = self.pitch(axis);
        if pitch <= 0.0 || self.area.width == 0 || self.area.height == 0 {
            return Vec::new();
        }

        let viewport = self.surface.viewport_extent(axis);
        let first = (offset / pitch).floor().max(0.0) as usize;
        let mut cards = Vec::new();

        for index in first..self.strip.count {
            let start = index as f64 * pitch - offset;
            if start >= viewport {
                break;
            }
            if let Some(rect) = self.card_cells(axis, start) {
                cards.push(VisibleCard { index, rect });
            }
        }
        cards
    }

    /// Index of the card under a terminal cell
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.visible_cards()
            .into_iter()
            .find(|card| {
                column >= card.rect.x
                    && column < card.rect.right()
                    && row >= card.rect.y
                    && row < card.rect.bottom()
            })
            .map(|card| card.index)
    }

    fn pitch(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.strip.item_width + self.strip.gap,
            Axis::Vertical => self.strip.item_height + self.strip.gap,
        }
    }

    /// Convert a card starting `start` units into the viewport into cells
    fn card_cells(&self, axis: Axis, start: f64) -> Option<Rect> {
        let (main_len, cross_len) = match axis {
            Axis::Horizontal => (
                self.metrics.columns(self.strip.item_width),
                self.metrics.rows(self.strip.item_height),
            ),
            Axis::Vertical => (
                self.metrics.rows(self.strip.item_height),
                self.metrics.columns(self.strip.item_width),
            ),
        };
        let (main_start, main_limit, cross_limit) = match axis {
            Axis::Horizontal => (self.metrics.columns(start), self.area.width, self.area.height),
            Axis::Vertical => (self.metrics.rows(start), self.area.height, self.area.width),
        };

        let lo = main_start.max(0.0).round() as u16;
        let hi = ((main_start + main_len).round().max(0.0) as u16).min(main_limit);
        if hi <= lo {
            return None;
        }
        let cross = (cross_len.round() as u16).min(cross_limit).max(1);

        Some(match axis {
            Axis::Horizontal => Rect::new(self.area.x + lo, self.area.y, hi - lo, cross),
            Axis::Vertical => Rect::new(self.area.x, self.area.y + lo, cross, hi - lo),
        })
    }

    fn update_content(&mut self) {
        let axis = self.axis();
        let (viewport_width, viewport_height) = self.metrics.area_units(self.area);
        let main = self.strip.extent(axis);
        let (width, height) = match axis {
            Axis::Horizontal => (main, viewport_height.min(self.strip.item_height)),
            Axis::Vertical => (viewport_width.min(self.strip.item_width), main),
        };
        self.surface.set_content(width, height);
    }
}
