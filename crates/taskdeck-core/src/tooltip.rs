//! Single-slot tooltip overlay with fallback placement
//!
//! Only one tooltip is visible at a time. Placement tries the right side of
//! the anchor, then the left side, then below it, and keeps the first
//! candidate that fits inside the viewport minus a margin.

use tracing::trace;

/// Axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink on every side by `amount`
    pub fn inset(&self, amount: f64) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }
}

/// What a tooltip shows
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipContent {
    User { id: String, name: String },
    Text(String),
}

/// Side of the anchor the tooltip ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Right,
    Left,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTooltip {
    pub content: TooltipContent,
    pub placement: Placement,
    pub rect: Rect,
}

/// Default gap between anchor and tooltip
pub const ANCHOR_OFFSET: f64 = 8.0;
/// Default distance kept from viewport edges
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Compute where a tooltip of `size` goes next to `anchor`
pub fn place(
    anchor: Rect,
    size: (f64, f64),
    viewport: Rect,
    offset: f64,
    margin: f64,
) -> (Placement, Rect) {
    let bounds = viewport.inset(margin);
    // Flexible dimensions: never larger than the usable area
    let width = size.0.min(bounds.width);
    let height = size.1.min(bounds.height);

    let candidates = [
        (
            Placement::Right,
            Rect::new(anchor.right() + offset, anchor.center_y() - height / 2.0, width, height),
        ),
        (
            Placement::Left,
            Rect::new(anchor.x - offset - width, anchor.center_y() - height / 2.0, width, height),
        ),
        (
            Placement::Below,
            Rect::new(anchor.center_x() - width / 2.0, anchor.bottom() + offset, width, height),
        ),
    ];

    if let Some(&(placement, rect)) = candidates.iter().find(|(_, rect)| bounds.contains(rect)) {
        return (placement, rect);
    }

    // Nothing fits: push the last candidate inside the bounds
    let (placement, rect) = candidates[candidates.len() - 1];
    let x = rect.x.clamp(bounds.x, (bounds.right() - width).max(bounds.x));
    let y = rect.y.clamp(bounds.y, (bounds.bottom() - height).max(bounds.y));
    (placement, Rect::new(x, y, width, height))
}

/// Holds at most one visible tooltip
#[derive(Debug, Clone, Default)]
pub struct TooltipSlot {
    current: Option<PlacedTooltip>,
}

impl TooltipSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a tooltip, replacing any visible one
    pub fn show(
        &mut self,
        content: TooltipContent,
        anchor: Rect,
        size: (f64, f64),
        viewport: Rect,
    ) -> &PlacedTooltip {
        let (placement, rect) = place(anchor, size, viewport, ANCHOR_OFFSET, VIEWPORT_MARGIN);
        trace!(?placement, ?rect, "tooltip shown");
        self.current.insert(PlacedTooltip {
            content,
            placement,
            rect,
        })
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&PlacedTooltip> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_prefers_right_side() {
        let anchor = Rect::new(100.0, 100.0, 180.0, 120.0);
        let (placement, rect) = place(anchor, (200.0, 60.0), viewport(), 8.0, 8.0);
        assert_eq!(placement, Placement::Right);
        assert_eq!(rect, Rect::new(288.0, 130.0, 200.0, 60.0));
    }

    #[test]
    fn test_falls_back_to_left() {
        let anchor = Rect::new(500.0, 100.0, 180.0, 120.0);
        let (placement, rect) = place(anchor, (200.0, 60.0), viewport(), 8.0, 8.0);
        assert_eq!(placement, Placement::Left);
        assert_eq!(rect.x, 292.0);
    }

    #[test]
    fn test_falls_back_below_on_narrow_viewport() {
        let narrow = Rect::new(0.0, 0.0, 360.0, 600.0);
        let anchor = Rect::new(90.0, 100.0, 180.0, 120.0);
        let (placement, rect) = place(anchor, (150.0, 40.0), narrow, 8.0, 8.0);
        assert_eq!(placement, Placement::Below);
        assert_eq!(rect, Rect::new(105.0, 228.0, 150.0, 40.0));
    }

    #[test]
    fn test_pushes_inside_when_nothing_fits() {
        let small = Rect::new(0.0, 0.0, 300.0, 200.0);
        let anchor = Rect::new(20.0, 20.0, 260.0, 160.0);
        let (placement, rect) = place(anchor, (100.0, 50.0), small, 8.0, 8.0);
        assert_eq!(placement, Placement::Below);
        assert!(small.inset(8.0).contains(&rect));
    }

    #[test]
    fn test_slot_holds_one_tooltip() {
        let mut slot = TooltipSlot::new();
        let anchor = Rect::new(10.0, 10.0, 50.0, 20.0);
        slot.show(TooltipContent::Text("first".into()), anchor, (80.0, 20.0), viewport());
        slot.show(
            TooltipContent::User {
                id: "u1".into(),
                name: "Ada".into(),
            },
            anchor,
            (80.0, 20.0),
            viewport(),
        );
        assert!(matches!(
            slot.current().map(|t| &t.content),
            Some(TooltipContent::User { .. })
        ));
        slot.hide();
        assert!(slot.current().is_none());
    }
}
