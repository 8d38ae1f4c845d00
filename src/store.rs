//! Persisted key-value substrate for the session slice.
//!
//! Models a browser-local storage area: synchronous, infallible get/set/remove
//! on string keys. The rest of the application never touches the store
//! directly; all reads and writes go through `SessionService`.

use std::collections::HashMap;
use std::sync::Mutex;

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, one per instance. Hosts embedding this crate back it
/// with their real storage area; tests use it directly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held. Used by tests asserting that a
    /// sign-out cleared everything.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("session store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("session store mutex poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session store mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("session store mutex poisoned").remove(key);
    }
}
