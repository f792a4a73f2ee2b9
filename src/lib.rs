//! Lotonu - per-category number/position tally tracker
//!
//! Core modules:
//! - `store`: Category → entries data model, validation and persistence
//! - `input`: Bounds-checked parsing of user input
//! - `platform`: Key-value storage backends (LocalStorage on web, files natively)
//! - `settings`: Persisted UI preferences
//! - `view`: Text rendering of the Entries/Consult/Stats screens
//! - `app`: Controller routing user actions into the store

pub mod app;
pub mod category;
pub mod error;
pub mod input;
pub mod platform;
pub mod settings;
pub mod store;
pub mod view;

pub use app::App;
pub use category::Category;
pub use error::{AppError, InputError, StorageError, StoreError};
pub use input::EntryInput;
pub use settings::Settings;
pub use store::{CategoryStats, Entry, LoadOutcome, LoadReport, State, Store};
pub use view::{Rendered, ViewKind};

/// Application constants
pub mod consts {
    /// Storage key holding the serialized category → entries object
    pub const DATA_KEY: &str = "lotonu-data";
    /// Storage key holding UI preferences
    pub const SETTINGS_KEY: &str = "lotonu-settings";

    /// Largest accepted entry number (displayed as 000-999)
    pub const MAX_NUM: u16 = 999;
    /// Largest accepted position (displayed 1-based, P1-P10)
    pub const MAX_POS: u8 = 9;
    /// Largest accepted observed value
    pub const MAX_VALUE: u8 = 9;

    /// Native data directory override
    pub const DATA_DIR_ENV: &str = "LOTONU_DATA_DIR";
    /// Native data directory when the override is unset
    pub const DEFAULT_DATA_DIR: &str = ".lotonu";
}
