//! Scrollable surface abstraction and the wrap-around rule

use tracing::debug;

use super::axis::Axis;

/// A viewport onto content that can be scrolled along either axis
pub trait ScrollSurface {
    fn scroll_offset(&self, axis: Axis) -> f64;

    fn set_scroll_offset(&mut self, axis: Axis, value: f64);

    fn viewport_extent(&self, axis: Axis) -> f64;

    fn content_extent(&self, axis: Axis) -> f64;

    /// Largest reachable offset
    fn max_scroll(&self, axis: Axis) -> f64 {
        (self.content_extent(axis) - self.viewport_extent(axis)).max(0.0)
    }

    /// Whether content is larger than the viewport
    fn overflows(&self, axis: Axis) -> bool {
        self.content_extent(axis) > self.viewport_extent(axis)
    }
}

/// In-memory surface that clamps offsets like a native scroll container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualSurface {
    viewport: (f64, f64),
    content: (f64, f64),
    offset: (f64, f64),
}

impl VirtualSurface {
    pub fn new(viewport_width: f64, viewport_height: f64, content_width: f64, content_height: f64) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
            content: (content_width, content_height),
            offset: (0.0, 0.0),
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        self.reclamp();
    }

    pub fn set_content(&mut self, width: f64, height: f64) {
        self.content = (width, height);
        self.reclamp();
    }

    fn reclamp(&mut self) {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let current = self.scroll_offset(axis);
            self.set_scroll_offset(axis, current);
        }
    }
}

impl ScrollSurface for VirtualSurface {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        axis.pick(self.offset.0, self.offset.1)
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f64) {
        let value = value.clamp(0.0, self.max_scroll(axis));
        match axis {
            Axis::Horizontal => self.offset.0 = value,
            Axis::Vertical => self.offset.1 = value,
        }
    }

    fn viewport_extent(&self, axis: Axis) -> f64 {
        axis.pick(self.viewport.0, self.viewport.1)
    }

    fn content_extent(&self, axis: Axis) -> f64 {
        axis.pick(self.content.0, self.content.1)
    }
}

/// A run of equally sized cards laid out along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStrip {
    pub count: usize,
    pub item_width: f64,
    pub item_height: f64,
    pub gap: f64,
}

impl ItemStrip {
    /// Total length of the strip along `axis`
    pub fn extent(&self, axis: Axis) -> f64 {
        let item = axis.pick(self.item_width, self.item_height);
        self.count as f64 * (item + self.gap)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Direction of a wrap-around jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapJump {
    /// Offset reached the start and was moved to the end
    ToEnd,
    /// Offset reached the end and was moved to the start
    ToStart,
}

/// Teleport the offset between extremes when it touches either one
///
/// `content_extent` is the length the loop spans, which may differ from the
/// surface's own content extent when the content is a card strip. Nothing
/// happens when the surface does not overflow.
pub fn apply_wrap<S: ScrollSurface + ?Sized>(
    surface: &mut S,
    axis: Axis,
    content_extent: f64,
) -> Option<WrapJump> {
    if !surface.overflows(axis) {
        return None;
    }

    let end = content_extent - surface.viewport_extent(axis);
    if end <= 0.0 {
        return None;
    }

    let offset = surface.scroll_offset(axis);
    let jump = if offset <= 0.0 {
        surface.set_scroll_offset(axis, end);
        WrapJump::ToEnd
    } else if offset >= end {
        surface.set_scroll_offset(axis, 0.0);
        WrapJump::ToStart
    } else {
        return None;
    };

    debug!(?axis, offset, end, ?jump, "wrap-around");
    Some(jump)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> VirtualSurface {
        VirtualSurface::new(300.0, 200.0, 1000.0, 200.0)
    }

    #[test]
    fn test_offsets_clamp_to_scroll_range() {
        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, -50.0);
        assert_eq!(s.scroll_offset(Axis::Horizontal), 0.0);
        s.set_scroll_offset(Axis::Horizontal, 5000.0);
        assert_eq!(s.scroll_offset(Axis::Horizontal), 700.0);
        // No vertical overflow: pinned at zero
        s.set_scroll_offset(Axis::Vertical, 40.0);
        assert_eq!(s.scroll_offset(Axis::Vertical), 0.0);
    }

    #[test]
    fn test_wrap_start_to_end() {
        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, 0.0);
        assert_eq!(apply_wrap(&mut s, Axis::Horizontal, 1000.0), Some(WrapJump::ToEnd));
        assert_eq!(s.scroll_offset(Axis::Horizontal), 700.0);
    }

    #[test]
    fn test_wrap_end_to_start() {
        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, 700.0);
        assert_eq!(apply_wrap(&mut s, Axis::Horizontal, 1000.0), Some(WrapJump::ToStart));
        assert_eq!(s.scroll_offset(Axis::Horizontal), 0.0);
    }

    #[test]
    fn test_middle_is_untouched() {
        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, 350.0);
        assert_eq!(apply_wrap(&mut s, Axis::Horizontal, 1000.0), None);
        assert_eq!(s.scroll_offset(Axis::Horizontal), 350.0);
    }

    #[test]
    fn test_no_wrap_without_overflow() {
        let mut s = VirtualSurface::new(300.0, 200.0, 300.0, 200.0);
        assert_eq!(apply_wrap(&mut s, Axis::Horizontal, 300.0), None);
        assert_eq!(apply_wrap(&mut s, Axis::Vertical, 200.0), None);
        assert_eq!(s.scroll_offset(Axis::Horizontal), 0.0);
    }

    #[test]
    fn test_strip_extent_drives_wrap_point() {
        let strip = ItemStrip {
            count: 5,
            item_width: 180.0,
            item_height: 120.0,
            gap: 1.0,
        };
        assert_eq!(strip.extent(Axis::Horizontal), 905.0);
        assert_eq!(strip.extent(Axis::Vertical), 605.0);

        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, 605.0);
        assert_eq!(
            apply_wrap(&mut s, Axis::Horizontal, strip.extent(Axis::Horizontal)),
            Some(WrapJump::ToStart)
        );
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut s = surface();
        s.set_scroll_offset(Axis::Horizontal, 600.0);
        s.set_viewport(800.0, 200.0);
        assert_eq!(s.scroll_offset(Axis::Horizontal), 200.0);
    }
}
