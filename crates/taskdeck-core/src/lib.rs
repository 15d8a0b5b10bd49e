pub mod config;
pub mod error;
pub mod modal;
pub mod scroll;
pub mod tooltip;

pub use config::{AppConfig, AxisPreference, ScrollConfig};
pub use error::{Error, Result};
pub use modal::{ModalKind, ModalPayload, ModalStore};
pub use scroll::{ScrollEngine, ScrollEvent, ScrollSurface};
