//! Entry store
//!
//! Owns the category → entries state and its storage backend. State is
//! loaded once at startup and written back after every mutation.
//!
//! Loading never fails hard: a missing, unreadable or structurally malformed
//! payload is replaced by an all-empty state which is persisted immediately.
//! Individual bad entries inside a well-formed payload are skipped and the
//! rest kept. What happened is reported in a `LoadReport` instead of being
//! swallowed.

pub mod state;

pub use state::{CategoryStats, Entry, State};

use crate::category::Category;
use crate::consts::DATA_KEY;
use crate::error::StoreError;
use crate::input::EntryInput;
use crate::platform::KeyValueStorage;

/// Where the state came from on load
#[derive(Debug)]
pub enum LoadOutcome {
    /// A valid payload was found and decoded
    Restored,
    /// Nothing was stored yet
    Initialized,
    /// The stored payload was unusable and has been replaced
    Recovered(StoreError),
}

/// Result of `Store::load`
#[derive(Debug)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    /// Failure to persist the fresh default, if one was written
    pub save_error: Option<StoreError>,
}

pub struct Store<S: KeyValueStorage> {
    storage: S,
    state: State,
}

impl<S: KeyValueStorage> Store<S> {
    /// Load state from `storage`, falling back to (and persisting) an
    /// all-empty state when nothing valid is stored.
    pub fn load(storage: S) -> (Self, LoadReport) {
        match read_state(&storage) {
            Ok(Some(state)) => {
                log::info!(
                    "Loaded data from storage ({} entries)",
                    Category::ALL
                        .iter()
                        .map(|&c| state.entries(c).len())
                        .sum::<usize>()
                );
                let store = Self { storage, state };
                let report = LoadReport {
                    outcome: LoadOutcome::Restored,
                    save_error: None,
                };
                (store, report)
            }
            Ok(None) => {
                log::info!("No stored data, initializing empty categories");
                Self::with_default(storage, LoadOutcome::Initialized)
            }
            Err(e) => {
                log::warn!("Stored data unusable ({e}), resetting to empty categories");
                Self::with_default(storage, LoadOutcome::Recovered(e))
            }
        }
    }

    fn with_default(storage: S, outcome: LoadOutcome) -> (Self, LoadReport) {
        let mut store = Self {
            storage,
            state: State::new(),
        };
        let save_error = store.save().err();
        (
            store,
            LoadReport {
                outcome,
                save_error,
            },
        )
    }

    /// Serialize and write the current state. The in-memory state is left
    /// untouched whether or not the write succeeds.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = self.state.to_json()?;
        if let Err(e) = self.storage.set(DATA_KEY, &json) {
            log::error!("Failed to save data: {e}");
            return Err(e.into());
        }
        log::debug!("Data saved ({} bytes)", json.len());
        Ok(())
    }

    /// Record `input.value()` for (category, num, pos) and persist.
    ///
    /// An existing entry gets the value appended; otherwise a new entry is
    /// added at the end of the category's list.
    pub fn upsert_entry(&mut self, category: Category, input: EntryInput) -> Result<(), StoreError> {
        self.state
            .upsert(category, input.num(), input.pos(), input.value());
        log::info!(
            "Recorded {category} num {:03} P{} = {}",
            input.num(),
            input.pos() + 1,
            input.value()
        );
        self.save()
    }

    /// Clear every category and persist
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = State::new();
        log::info!("All data reset");
        self.save()
    }

    /// Entries of `category` whose `num` matches, in storage order
    pub fn query(&self, category: Category, num: u16) -> Vec<&Entry> {
        self.state.query(category, num)
    }

    pub fn entries(&self, category: Category) -> &[Entry] {
        self.state.entries(category)
    }

    pub fn stats(&self, category: Category) -> CategoryStats {
        self.state.stats(category)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn read_state<S: KeyValueStorage>(storage: &S) -> Result<Option<State>, StoreError> {
    match storage.get(DATA_KEY)? {
        Some(json) => State::from_json(&json).map(Some),
        None => Ok(None),
    }
}
