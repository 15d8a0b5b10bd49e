use std::cell::Cell;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Ticks arrive every `tick_rate` while idle and every `frame_interval`
/// while an animation is running.
pub struct EventHandler {
    tick_rate: Duration,
    frame_interval: Duration,
    last_tick: Cell<Instant>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, frame_interval: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_interval,
            last_tick: Cell::new(Instant::now()),
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let period = if animating {
            self.frame_interval
        } else {
            self.tick_rate
        };
        let timeout = period.saturating_sub(self.last_tick.get().elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            self.last_tick.set(Instant::now());
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse moved, clicked, dragged or scrolled
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates and animation frames
    Tick,
}
