//! Scroll axis selection
//!
//! A surface scrolls along exactly one axis at a time. The axis is either
//! fixed by configuration or derived from the viewport width.

/// One of the two scroll axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Pick the component of a 2D value that lies on this axis
    #[inline]
    pub fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }
}

/// How a surface decides its scroll axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisPolicy {
    /// Always scroll along the given axis
    Fixed(Axis),
    /// Vertical when the viewport is at least `min_width` wide, else horizontal
    Breakpoint { min_width: f64 },
}

impl AxisPolicy {
    pub fn resolve(self, viewport_width: f64) -> Axis {
        match self {
            AxisPolicy::Fixed(axis) => axis,
            AxisPolicy::Breakpoint { min_width } => {
                if viewport_width >= min_width {
                    Axis::Vertical
                } else {
                    Axis::Horizontal
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_resolution() {
        let policy = AxisPolicy::Breakpoint { min_width: 768.0 };
        assert_eq!(policy.resolve(1024.0), Axis::Vertical);
        assert_eq!(policy.resolve(768.0), Axis::Vertical);
        assert_eq!(policy.resolve(767.0), Axis::Horizontal);
    }

    #[test]
    fn test_fixed_ignores_width() {
        let policy = AxisPolicy::Fixed(Axis::Horizontal);
        assert_eq!(policy.resolve(2000.0), Axis::Horizontal);
    }

    #[test]
    fn test_pick() {
        assert_eq!(Axis::Horizontal.pick(1.0, 2.0), 1.0);
        assert_eq!(Axis::Vertical.pick(1.0, 2.0), 2.0);
    }
}
