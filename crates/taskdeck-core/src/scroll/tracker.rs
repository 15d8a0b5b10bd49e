//! Pointer tracking and per-sample velocity
//!
//! Converts pointer positions into absolute scroll offsets for the active
//! axis and keeps the most recent velocity for the momentum hand-off.

use std::time::Instant;

use tracing::trace;

use super::axis::Axis;

/// Advisory cursor shown over the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Grab,
    Grabbing,
}

/// State of one pointer-down .. pointer-up interval
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active: bool,
    /// Pointer position at drag start, viewport-relative
    pub origin_x: f64,
    pub origin_y: f64,
    /// Scroll offsets at drag start
    pub origin_scroll_x: f64,
    pub origin_scroll_y: f64,
    pub last_sample_time: Instant,
    pub last_sample_x: f64,
    pub last_sample_y: f64,
    /// Units per millisecond, positive when the pointer moves right/down
    pub velocity_x: f64,
    pub velocity_y: f64,
}

/// Tracks a single drag session on one surface
#[derive(Debug, Clone)]
pub struct PointerTracker {
    axis: Axis,
    drag_gain: f64,
    smoothing: Option<f64>,
    session: Option<DragSession>,
    cursor: CursorState,
}

impl PointerTracker {
    pub fn new(axis: Axis, drag_gain: f64, smoothing: Option<f64>) -> Self {
        Self {
            axis,
            drag_gain,
            smoothing,
            session: None,
            cursor: CursorState::Grab,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Switch axis; any session in flight is discarded
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
        self.reset();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begin a session at the given pointer position and scroll offsets
    pub fn start(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        origin_scroll_x: f64,
        origin_scroll_y: f64,
        now: Instant,
    ) {
        self.session = Some(DragSession {
            active: true,
            origin_x: pointer_x,
            origin_y: pointer_y,
            origin_scroll_x,
            origin_scroll_y,
            last_sample_time: now,
            last_sample_x: pointer_x,
            last_sample_y: pointer_y,
            velocity_x: 0.0,
            velocity_y: 0.0,
        });
        self.cursor = CursorState::Grabbing;
    }

    /// Feed a move sample; returns the offset to apply on the active axis
    ///
    /// Returns `None` when no session is active.
    pub fn move_to(&mut self, pointer_x: f64, pointer_y: f64, now: Instant) -> Option<f64> {
        let axis = self.axis;
        let gain = self.drag_gain;
        let smoothing = self.smoothing;
        let session = self.session.as_mut().filter(|s| s.active)?;

        let elapsed_ms = now
            .saturating_duration_since(session.last_sample_time)
            .as_secs_f64()
            * 1000.0;

        let sample_vx = sample_velocity(pointer_x - session.last_sample_x, elapsed_ms);
        let sample_vy = sample_velocity(pointer_y - session.last_sample_y, elapsed_ms);
        session.velocity_x = blend(session.velocity_x, sample_vx, smoothing);
        session.velocity_y = blend(session.velocity_y, sample_vy, smoothing);

        session.last_sample_time = now;
        session.last_sample_x = pointer_x;
        session.last_sample_y = pointer_y;

        let origin = axis.pick(session.origin_x, session.origin_y);
        let origin_scroll = axis.pick(session.origin_scroll_x, session.origin_scroll_y);
        let current = axis.pick(pointer_x, pointer_y);
        let walk = (current - origin) * gain;

        trace!(
            ?axis,
            walk,
            velocity = axis.pick(session.velocity_x, session.velocity_y),
            "drag sample"
        );

        Some(origin_scroll - walk)
    }

    /// Finish the session; returns the release velocity on the active axis
    ///
    /// Returns `None` when no session is active.
    pub fn end(&mut self, _now: Instant) -> Option<f64> {
        let axis = self.axis;
        let session = self.session.as_mut().filter(|s| s.active)?;
        session.active = false;
        self.cursor = CursorState::Grab;
        Some(axis.pick(session.velocity_x, session.velocity_y))
    }

    /// Velocity on the active axis from the latest sample
    pub fn velocity(&self) -> f64 {
        self.session
            .as_ref()
            .map(|s| self.axis.pick(s.velocity_x, s.velocity_y))
            .unwrap_or(0.0)
    }

    /// Drop all session state
    pub fn reset(&mut self) {
        self.session = None;
        self.cursor = CursorState::Grab;
    }
}

#[inline]
fn sample_velocity(delta: f64, elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 {
        delta / elapsed_ms
    } else {
        0.0
    }
}

#[inline]
fn blend(previous: f64, sample: f64, smoothing: Option<f64>) -> f64 {
    match smoothing {
        Some(alpha) => previous * (1.0 - alpha) + sample * alpha,
        None => sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(base: Instant, n: u64) -> Instant {
        base + Duration::from_millis(n)
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        let t0 = Instant::now();
        assert_eq!(tracker.move_to(10.0, 0.0, t0), None);
        assert_eq!(tracker.end(t0), None);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_drag_gain_doubles_travel() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        let t0 = Instant::now();
        tracker.start(100.0, 50.0, 300.0, 0.0, t0);
        assert_eq!(tracker.cursor(), CursorState::Grabbing);

        // Pointer moves 30 right: content follows twice as far, offset decreases
        assert_eq!(tracker.move_to(130.0, 50.0, ms(t0, 10)), Some(240.0));
        // Pointer back past origin
        assert_eq!(tracker.move_to(90.0, 50.0, ms(t0, 20)), Some(320.0));
    }

    #[test]
    fn test_vertical_axis_uses_y() {
        let mut tracker = PointerTracker::new(Axis::Vertical, 2.0, None);
        let t0 = Instant::now();
        tracker.start(0.0, 100.0, 10.0, 400.0, t0);
        assert_eq!(tracker.move_to(50.0, 80.0, ms(t0, 8)), Some(440.0));
    }

    #[test]
    fn test_velocity_is_delta_over_elapsed() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        let t0 = Instant::now();
        tracker.start(0.0, 0.0, 0.0, 0.0, t0);

        tracker.move_to(20.0, 0.0, ms(t0, 10));
        assert!((tracker.velocity() - 2.0).abs() < 1e-9);

        tracker.move_to(26.0, 0.0, ms(t0, 14));
        assert!((tracker.velocity() - 1.5).abs() < 1e-9);

        tracker.move_to(16.0, 0.0, ms(t0, 24));
        assert!((tracker.velocity() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_timestamp_gives_zero_velocity() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        let t0 = Instant::now();
        tracker.start(0.0, 0.0, 0.0, 0.0, t0);
        tracker.move_to(20.0, 0.0, ms(t0, 10));

        let offset = tracker.move_to(40.0, 0.0, ms(t0, 10));
        assert_eq!(offset, Some(-80.0));
        assert_eq!(tracker.velocity(), 0.0);
        assert!(tracker.velocity().is_finite());
    }

    #[test]
    fn test_end_hands_off_velocity() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        let t0 = Instant::now();
        tracker.start(0.0, 0.0, 0.0, 0.0, t0);
        tracker.move_to(-50.0, 0.0, ms(t0, 10));

        let released = tracker.end(ms(t0, 12)).unwrap();
        assert!((released + 5.0).abs() < 1e-9);
        assert!(!tracker.is_active());
        assert_eq!(tracker.cursor(), CursorState::Grab);
        // Velocity stays readable after release
        assert_eq!(tracker.velocity(), released);
        // Second end is a no-op
        assert_eq!(tracker.end(ms(t0, 13)), None);
    }

    #[test]
    fn test_smoothing_blends_samples() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, Some(0.5));
        let t0 = Instant::now();
        tracker.start(0.0, 0.0, 0.0, 0.0, t0);
        tracker.move_to(20.0, 0.0, ms(t0, 10));
        assert!((tracker.velocity() - 1.0).abs() < 1e-9);
        tracker.move_to(40.0, 0.0, ms(t0, 20));
        assert!((tracker.velocity() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_set_axis_discards_session() {
        let mut tracker = PointerTracker::new(Axis::Horizontal, 2.0, None);
        tracker.start(0.0, 0.0, 0.0, 0.0, Instant::now());
        tracker.set_axis(Axis::Vertical);
        assert!(!tracker.is_active());
        assert!(tracker.session().is_none());
    }
}
