//! Platform abstraction layer
//!
//! Storage backends behind a single key-value interface:
//! - `MemoryStorage`: in-process map (tests, headless runs)
//! - `FileStorage`: one file per key (native)
//! - `LocalStorage`: `window.localStorage` (web)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// String key-value storage supplied by the host environment
pub trait KeyValueStorage {
    /// Read the value under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
