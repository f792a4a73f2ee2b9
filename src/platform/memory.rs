//! In-memory storage backend

use std::collections::HashMap;

use super::KeyValueStorage;
use crate::error::StorageError;

/// HashMap-backed storage, optionally refusing writes like a full quota
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose `set` always fails
    pub fn with_failing_writes() -> Self {
        Self {
            items: HashMap::new(),
            fail_writes: true,
        }
    }

    /// Storage pre-seeded with one item
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write(format!("quota exceeded writing {key}")));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_failing_writes_keep_previous_value() {
        let mut storage = MemoryStorage::with_item("k", "old");
        storage.set_fail_writes(true);
        assert!(matches!(storage.set("k", "new"), Err(StorageError::Write(_))));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("old"));
    }
}
