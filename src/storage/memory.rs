use std::collections::HashMap;
use std::io;

use super::LocalStorage;
use crate::error::Result;

/// In-process storage, mostly for tests. Counts writes and can be told to
/// reject them.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage whose every write fails
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Number of write attempts, successful or not
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "storage is read-only").into());
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
