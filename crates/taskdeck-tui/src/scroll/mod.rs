//! Terminal binding for the drag/momentum scroll engine
//!
//! - `binding` - crossterm mouse events to engine events, cells to units
//! - `deck` - the card strip: engine, virtual surface and card layout

pub mod binding;
pub mod deck;

pub use binding::{translate_mouse, CellMetrics, WHEEL_NOTCH};
pub use deck::{DeckScroller, VisibleCard};
