//! UI preferences
//!
//! Persisted separately from the entry data, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::consts::SETTINGS_KEY;
use crate::error::StorageError;
use crate::platform::KeyValueStorage;
use crate::view::ViewKind;

/// Last selected category and screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub view: ViewKind,
}

impl Settings {
    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load<S: KeyValueStorage>(storage: &S) -> Self {
        match storage.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save<S: KeyValueStorage>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::Write(format!("serialize settings: {e}")))?;
        storage.set(SETTINGS_KEY, &json)?;
        log::debug!("Settings saved");
        Ok(())
    }
}
