//! Modal visibility store
//!
//! Tracks which named modals are open, in opening order, together with a
//! typed payload per modal. Presenters subscribe to per-modal streams.

mod payload;
mod store;

pub use payload::{ModalKind, ModalPayload};
pub use store::{DataWatch, ModalState, ModalStore, OpenWatch};
