use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::payload::ModalPayload;

/// Snapshot of which modals are open and what data they carry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    open: Vec<String>,
    data: HashMap<String, ModalPayload>,
}

impl ModalState {
    pub fn is_open(&self, name: &str) -> bool {
        self.open.iter().any(|n| n == name)
    }

    pub fn data(&self, name: &str) -> Option<&ModalPayload> {
        self.data.get(name)
    }

    /// Open modals in the order they were opened
    pub fn open_modals(&self) -> &[String] {
        &self.open
    }
}

/// Registry of open modals shared by triggers and presenters
///
/// Cloning yields another handle to the same registry. Names not present are
/// closed. A payload supplied to [`open`](Self::open) replaces the stored one
/// even when the modal is already open; [`close`](Self::close) drops it.
#[derive(Debug, Clone)]
pub struct ModalStore {
    tx: Arc<watch::Sender<ModalState>>,
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ModalState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Open `name`, optionally attaching a payload
    pub fn open(&self, name: impl Into<String>, payload: Option<ModalPayload>) {
        let name = name.into();
        self.tx.send_if_modified(|state| {
            let mut changed = false;
            if !state.is_open(&name) {
                state.open.push(name.clone());
                changed = true;
            }
            if let Some(payload) = payload {
                if state.data.get(&name) != Some(&payload) {
                    state.data.insert(name.clone(), payload);
                    changed = true;
                }
            }
            if changed {
                debug!(modal = %name, open = ?state.open, "modal opened");
            }
            changed
        });
    }

    /// Close `name` and drop its payload
    pub fn close(&self, name: &str) {
        self.tx.send_if_modified(|state| {
            let before = state.open.len();
            state.open.retain(|n| n != name);
            let removed = state.data.remove(name).is_some();
            let changed = state.open.len() != before || removed;
            if changed {
                debug!(modal = %name, open = ?state.open, "modal closed");
            }
            changed
        });
    }

    /// Close every open modal
    pub fn close_all(&self) {
        self.tx.send_if_modified(|state| {
            if state.open.is_empty() && state.data.is_empty() {
                return false;
            }
            state.open.clear();
            state.data.clear();
            true
        });
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.tx.borrow().is_open(name)
    }

    pub fn data(&self, name: &str) -> Option<ModalPayload> {
        self.tx.borrow().data(name).cloned()
    }

    pub fn open_modals(&self) -> Vec<String> {
        self.tx.borrow().open.clone()
    }

    /// Raw stream of every registry change
    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.tx.subscribe()
    }

    /// Stream of open/closed transitions for one modal
    pub fn watch_open(&self, name: impl Into<String>) -> OpenWatch {
        let name = name.into();
        let rx = self.tx.subscribe();
        let last = rx.borrow().is_open(&name);
        OpenWatch { rx, name, last }
    }

    /// Stream of payload changes for one modal
    pub fn watch_data(&self, name: impl Into<String>) -> DataWatch {
        let name = name.into();
        let rx = self.tx.subscribe();
        let last = rx.borrow().data(&name).cloned();
        DataWatch { rx, name, last }
    }
}

/// Emits only when a modal's membership in the open set changes
#[derive(Debug)]
pub struct OpenWatch {
    rx: watch::Receiver<ModalState>,
    name: String,
    last: bool,
}

impl OpenWatch {
    pub fn current(&self) -> bool {
        self.last
    }

    /// Wait for the next transition; `None` once every store handle is gone
    pub async fn changed(&mut self) -> Option<bool> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(open) = self.take_transition() {
                return Some(open);
            }
        }
    }

    /// Non-blocking check for a transition since the last call
    pub fn poll(&mut self) -> Option<bool> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        self.take_transition()
    }

    fn take_transition(&mut self) -> Option<bool> {
        let open = self.rx.borrow_and_update().is_open(&self.name);
        if open == self.last {
            return None;
        }
        self.last = open;
        Some(open)
    }
}

/// Emits whenever a modal's payload changes
#[derive(Debug)]
pub struct DataWatch {
    rx: watch::Receiver<ModalState>,
    name: String,
    last: Option<ModalPayload>,
}

impl DataWatch {
    pub fn current(&self) -> Option<&ModalPayload> {
        self.last.as_ref()
    }

    /// Wait for the next payload change; outer `None` once the store is gone
    pub async fn changed(&mut self) -> Option<Option<ModalPayload>> {
        loop {
            self.rx.changed().await.ok()?;
            let data = self.rx.borrow_and_update().data(&self.name).cloned();
            if data != self.last {
                self.last = data.clone();
                return Some(data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn preview(url: &str) -> ModalPayload {
        ModalPayload::ImagePreview {
            image_url: url.to_string(),
            caption: None,
        }
    }

    #[test]
    fn test_open_then_is_open() {
        let store = ModalStore::new();
        assert!(!store.is_open("a"));
        store.open("a", None);
        assert!(store.is_open("a"));
    }

    #[test]
    fn test_multiple_open_and_close_one() {
        let store = ModalStore::new();
        store.open("a", None);
        store.open("b", None);
        assert!(store.is_open("a"));
        assert!(store.is_open("b"));
        assert_eq!(store.open_modals(), vec!["a".to_string(), "b".to_string()]);

        store.close("a");
        assert!(!store.is_open("a"));
        assert!(store.is_open("b"));
    }

    #[test]
    fn test_reopen_does_not_duplicate() {
        let store = ModalStore::new();
        store.open("a", None);
        store.open("a", None);
        assert_eq!(store.open_modals().len(), 1);
    }

    #[test]
    fn test_payload_roundtrip_and_missing() {
        let store = ModalStore::new();
        store.open("a", Some(preview("x1.jpg")));
        assert_eq!(store.data("a"), Some(preview("x1.jpg")));
        assert_eq!(store.data("missing"), None);
    }

    #[test]
    fn test_reopen_with_payload_replaces_it() {
        let store = ModalStore::new();
        store.open("a", Some(preview("first.jpg")));
        store.open("a", Some(preview("second.jpg")));
        assert_eq!(store.data("a"), Some(preview("second.jpg")));
        // Re-opening without a payload keeps the stored one
        store.open("a", None);
        assert_eq!(store.data("a"), Some(preview("second.jpg")));
    }

    #[test]
    fn test_close_clears_payload() {
        let store = ModalStore::new();
        store.open("a", Some(preview("x.jpg")));
        store.close("a");
        assert_eq!(store.data("a"), None);
        // Unknown names are ignored
        store.close("never-opened");
        assert!(store.open_modals().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = ModalStore::new();
        let other = store.clone();
        other.open("add-user", Some(ModalPayload::AddUser));
        assert!(store.is_open("add-user"));
        store.close_all();
        assert!(!other.is_open("add-user"));
    }

    #[test]
    fn test_poll_reports_only_transitions() {
        let store = ModalStore::new();
        let mut watch = store.watch_open("a");
        assert!(!watch.current());
        assert_eq!(watch.poll(), None);

        store.open("b", None);
        assert_eq!(watch.poll(), None);

        store.open("a", None);
        assert_eq!(watch.poll(), Some(true));
        assert_eq!(watch.poll(), None);

        store.close("a");
        assert_eq!(watch.poll(), Some(false));
    }

    #[tokio::test]
    async fn test_watch_open_stream() {
        let store = ModalStore::new();
        let mut watch = store.watch_open("add-task");

        let producer = store.clone();
        tokio::spawn(async move {
            producer.open("image-preview", None);
            producer.open("add-task", None);
        });

        let opened = timeout(Duration::from_secs(1), watch.changed()).await.unwrap();
        assert_eq!(opened, Some(true));

        store.close("add-task");
        let closed = timeout(Duration::from_secs(1), watch.changed()).await.unwrap();
        assert_eq!(closed, Some(false));
    }

    #[tokio::test]
    async fn test_watch_ends_when_store_dropped() {
        let store = ModalStore::new();
        let mut watch = store.watch_open("a");
        drop(store);
        let result = timeout(Duration::from_secs(1), watch.changed()).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_watch_data_stream() {
        let store = ModalStore::new();
        let mut watch = store.watch_data("image-preview");
        assert!(watch.current().is_none());

        store.open("image-preview", Some(preview("a.jpg")));
        let data = timeout(Duration::from_secs(1), watch.changed()).await.unwrap();
        assert_eq!(data, Some(Some(preview("a.jpg"))));

        store.close("image-preview");
        let data = timeout(Duration::from_secs(1), watch.changed()).await.unwrap();
        assert_eq!(data, Some(None));
    }
}
