//! Event-driven scroll state machine
//!
//! [`ScrollEngine::handle`] takes one input event, updates drag/momentum/wheel
//! state and writes offsets to the surface. Only one driver moves the offset
//! at a time: a drag start cancels momentum, wheel input is ignored while
//! dragging, and wheel input cancels momentum.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::ScrollConfig;

use super::axis::{Axis, AxisPolicy};
use super::momentum::{MomentumAnimator, MomentumToken, StepOutcome};
use super::surface::{apply_wrap, ItemStrip, ScrollSurface, WrapJump};
use super::tracker::{CursorState, PointerTracker};
use super::wheel::WheelGate;

/// One contact point of a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// Input delivered by the host, in surface units
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Pointer left the surface or the platform cancelled the gesture
    PointerCancel,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
    Wheel { delta_y: f64 },
    /// Viewport size changed
    Resize { width: f64, height: f64 },
    /// The offset changed outside the engine
    Scrolled,
    /// Native drag-and-drop of an element inside the surface
    NativeDragStart,
    /// Animation frame
    Tick,
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    /// Suppress the host's own handling of the event
    pub prevent_default: bool,
    pub cursor: CursorState,
    pub wrapped: Option<WrapJump>,
}

/// Who is currently moving the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Idle,
    Drag,
    Momentum,
    Wheel,
}

/// Drag, momentum and wheel handling for one surface
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    policy: AxisPolicy,
    circular: bool,
    tracker: PointerTracker,
    momentum: MomentumAnimator,
    wheel: WheelGate,
    strip: Option<ItemStrip>,
}

impl ScrollEngine {
    /// Create an engine for a viewport of the given width
    pub fn new(config: &ScrollConfig, viewport_width: f64) -> Self {
        let policy = config.axis_policy();
        let axis = policy.resolve(viewport_width);
        Self {
            policy,
            circular: config.circular,
            tracker: PointerTracker::new(axis, config.drag_gain, config.velocity_smoothing),
            momentum: MomentumAnimator::new(
                config.friction,
                config.velocity_threshold,
                config.frame_interval_ms as f64,
            ),
            wheel: WheelGate::new(config.wheel_speed, config.wheel_debounce()),
            strip: None,
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.tracker.axis()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_active()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.momentum.is_running()
    }

    /// Velocity of the running momentum, zero when idle
    pub fn momentum_velocity(&self) -> f64 {
        self.momentum.velocity()
    }

    pub fn is_wheeling(&self, now: Instant) -> bool {
        self.wheel.is_wheeling(now)
    }

    /// Whether the host should keep delivering frame ticks
    pub fn needs_update(&self) -> bool {
        self.momentum.is_running()
    }

    pub fn cursor(&self) -> CursorState {
        self.tracker.cursor()
    }

    pub fn momentum_token(&self) -> Option<MomentumToken> {
        self.momentum.token()
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn driver(&self, now: Instant) -> Driver {
        if self.tracker.is_active() {
            Driver::Drag
        } else if self.momentum.is_running() {
            Driver::Momentum
        } else if self.wheel.is_wheeling(now) {
            Driver::Wheel
        } else {
            Driver::Idle
        }
    }

    /// Use a card strip's length as the wrap span instead of the content extent
    pub fn set_item_strip(&mut self, strip: Option<ItemStrip>) {
        self.strip = strip;
    }

    /// Process one input event
    pub fn handle<S: ScrollSurface + ?Sized>(
        &mut self,
        event: ScrollEvent,
        surface: &mut S,
        now: Instant,
    ) -> EventOutcome {
        let mut prevent_default = false;
        let mut wrapped = None;

        match event {
            ScrollEvent::PointerDown { x, y } => {
                self.begin_drag(x, y, surface, now);
            }
            ScrollEvent::TouchStart { touches } => {
                if let Some(first) = touches.first() {
                    self.begin_drag(first.x, first.y, surface, now);
                    prevent_default = surface.overflows(self.axis());
                }
            }
            ScrollEvent::PointerMove { x, y } => {
                prevent_default = self.drag_to(x, y, surface, now);
            }
            ScrollEvent::TouchMove { touches } => {
                if let Some(first) = touches.first() {
                    prevent_default = self.drag_to(first.x, first.y, surface, now);
                }
            }
            ScrollEvent::PointerUp | ScrollEvent::PointerCancel | ScrollEvent::TouchEnd => {
                self.release(surface, now);
            }
            ScrollEvent::Wheel { delta_y } => {
                let axis = self.axis();
                if !self.tracker.is_active() && surface.overflows(axis) {
                    self.momentum.cancel();
                    let delta = self.wheel.accept(delta_y, now);
                    let offset = surface.scroll_offset(axis);
                    surface.set_scroll_offset(axis, offset + delta);
                    wrapped = self.wrap(surface);
                    prevent_default = true;
                }
            }
            ScrollEvent::Resize { width, .. } => {
                self.resize(width);
            }
            ScrollEvent::Scrolled => {
                if !self.tracker.is_active() {
                    wrapped = self.wrap(surface);
                }
            }
            ScrollEvent::NativeDragStart => {
                prevent_default = true;
            }
            ScrollEvent::Tick => {
                if let Some(token) = self.momentum.token() {
                    if let StepOutcome::Moved { .. } = self.step_momentum(token, surface) {
                        wrapped = self.wrap(surface);
                    }
                }
            }
        }

        EventOutcome {
            prevent_default,
            cursor: self.tracker.cursor(),
            wrapped,
        }
    }

    /// Advance momentum for `token` by one frame
    ///
    /// A token from a cancelled or superseded run leaves the surface alone.
    pub fn step_momentum<S: ScrollSurface + ?Sized>(
        &mut self,
        token: MomentumToken,
        surface: &mut S,
    ) -> StepOutcome {
        let outcome = self.momentum.step(token);
        if let StepOutcome::Moved { delta } = outcome {
            let axis = self.axis();
            let offset = surface.scroll_offset(axis);
            surface.set_scroll_offset(axis, offset + delta);
        }
        outcome
    }

    /// Stop everything; used when the surface goes away
    pub fn detach(&mut self) {
        self.momentum.cancel();
        self.tracker.reset();
        self.wheel.reset();
    }

    fn begin_drag<S: ScrollSurface + ?Sized>(&mut self, x: f64, y: f64, surface: &S, now: Instant) {
        // Momentum must stop before the new origin is captured
        self.momentum.cancel();
        self.tracker.start(
            x,
            y,
            surface.scroll_offset(Axis::Horizontal),
            surface.scroll_offset(Axis::Vertical),
            now,
        );
        debug!(x, y, axis = ?self.axis(), "drag started");
    }

    fn drag_to<S: ScrollSurface + ?Sized>(&mut self, x: f64, y: f64, surface: &mut S, now: Instant) -> bool {
        let axis = self.axis();
        match self.tracker.move_to(x, y, now) {
            Some(offset) => {
                surface.set_scroll_offset(axis, offset);
                surface.overflows(axis)
            }
            None => false,
        }
    }

    fn release<S: ScrollSurface + ?Sized>(&mut self, surface: &S, now: Instant) {
        let Some(velocity) = self.tracker.end(now) else {
            return;
        };
        debug!(velocity, "drag ended");
        if surface.overflows(self.axis()) {
            self.momentum.start_if_significant(velocity);
        }
    }

    fn resize(&mut self, width: f64) {
        let axis = self.policy.resolve(width);
        if axis != self.axis() {
            info!(from = ?self.axis(), to = ?axis, width, "scroll axis changed");
            self.tracker.set_axis(axis);
            self.momentum.cancel();
            self.wheel.reset();
        }
    }

    fn wrap<S: ScrollSurface + ?Sized>(&self, surface: &mut S) -> Option<WrapJump> {
        if !self.circular {
            return None;
        }
        let axis = self.axis();
        let extent = match self.strip {
            Some(strip) if strip.is_empty() => return None,
            Some(strip) => strip.extent(axis),
            None => surface.content_extent(axis),
        };
        apply_wrap(surface, axis, extent)
    }
}
