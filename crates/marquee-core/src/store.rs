//! Key-value store seam.
//!
//! The page behaviors never talk to browser storage directly; they receive a
//! store handle at setup. Durable (checklist) and session-scoped (gate flag)
//! storage share the same contract, the host decides the lifetime. Keys are
//! opaque strings, flag values are the literal `"true"` or absent/other --
//! no namespacing, no versioning, matching the delivered markup contract.

use std::collections::HashMap;

/// Wire value for a set boolean flag.
pub const FLAG_TRUE: &str = "true";

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    /// Read a key as a boolean flag: only the literal `"true"` counts.
    fn flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some(FLAG_TRUE)
    }
}

/// In-memory store used in tests and by hosts that bridge to real storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
