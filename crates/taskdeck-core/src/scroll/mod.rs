//! Drag and momentum scrolling for a single surface
//!
//! The engine is host-independent: the host translates its native input into
//! [`ScrollEvent`]s, passes an explicit timestamp, and implements
//! [`ScrollSurface`] for whatever it renders into. Momentum advances one step
//! per [`ScrollEvent::Tick`], so tests drive it with a simulated clock.
//!
//! # Layout
//!
//! - `axis` - axis selection (fixed or breakpoint-based)
//! - `tracker` - pointer tracking and per-sample velocity
//! - `momentum` - decaying-velocity animator with cancellation tokens
//! - `wheel` - wheel scaling and the "is wheeling" debounce
//! - `surface` - surface trait, in-memory surface, wrap-around rule
//! - `engine` - the state machine tying the above together
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use taskdeck_core::scroll::{ScrollEngine, ScrollEvent, VirtualSurface};
//!
//! let config = taskdeck_core::ScrollConfig::default();
//! let mut surface = VirtualSurface::new(300.0, 200.0, 1000.0, 200.0);
//! let mut engine = ScrollEngine::new(&config, 300.0);
//!
//! engine.handle(ScrollEvent::PointerDown { x: 10.0, y: 10.0 }, &mut surface, Instant::now());
//! // ... moves, release ...
//! while engine.needs_update() {
//!     engine.handle(ScrollEvent::Tick, &mut surface, Instant::now());
//! }
//! ```

pub mod axis;
pub mod engine;
pub mod momentum;
pub mod surface;
pub mod tracker;
pub mod wheel;

pub use axis::{Axis, AxisPolicy};
pub use engine::{Driver, EventOutcome, ScrollEngine, ScrollEvent, TouchPoint};
pub use momentum::{steps_to_settle, MomentumAnimator, MomentumToken, StepOutcome};
pub use surface::{apply_wrap, ItemStrip, ScrollSurface, VirtualSurface, WrapJump};
pub use tracker::{CursorState, DragSession, PointerTracker};
pub use wheel::WheelGate;
