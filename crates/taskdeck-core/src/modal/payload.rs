//! Modal identifiers and typed payloads

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Modals the application knows about
///
/// The store itself accepts any string; this enum names the ones the UI uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalKind {
    AddUser,
    AddTask,
    ImagePreview,
}

impl ModalKind {
    pub const ALL: [ModalKind; 3] = [ModalKind::AddUser, ModalKind::AddTask, ModalKind::ImagePreview];

    pub fn as_str(self) -> &'static str {
        match self {
            ModalKind::AddUser => "add-user",
            ModalKind::AddTask => "add-task",
            ModalKind::ImagePreview => "image-preview",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownModal(s.to_string()))
    }
}

impl From<ModalKind> for String {
    fn from(kind: ModalKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Data attached to an open modal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModalPayload {
    AddUser,
    AddTask {
        /// User the new task belongs to
        user_id: Option<String>,
    },
    ImagePreview {
        image_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl ModalPayload {
    /// The modal this payload is meant for
    pub fn kind(&self) -> ModalKind {
        match self {
            ModalPayload::AddUser => ModalKind::AddUser,
            ModalPayload::AddTask { .. } => ModalKind::AddTask,
            ModalPayload::ImagePreview { .. } => ModalKind::ImagePreview,
        }
    }
}
