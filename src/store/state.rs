//! Persisted data model
//!
//! Layout on disk / in LocalStorage:
//! `{ "GH18": [ {"num":5,"pos":0,"values":[3,7]}, ... ], "CIV10": [...], ... }`

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::consts::{MAX_NUM, MAX_POS, MAX_VALUE};
use crate::error::StoreError;

/// The unique record for a (category, num, pos) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub num: u16,
    pub pos: u8,
    /// Observed values in insertion order (duplicates kept)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<u8>,
}

impl Entry {
    pub fn new(num: u16, pos: u8, value: u8) -> Self {
        Self {
            num,
            pos,
            values: vec![value],
        }
    }

    /// Whether num, pos and every value lie within the accepted input bounds
    pub fn in_bounds(&self) -> bool {
        self.num <= MAX_NUM && self.pos <= MAX_POS && self.values.iter().all(|&v| v <= MAX_VALUE)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<u8>>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode_entry(category: Category, index: usize, item: &Value) -> Option<Entry> {
    match Entry::deserialize(item) {
        Ok(entry) if entry.in_bounds() => Some(entry),
        Ok(entry) => {
            log::warn!("Skipping out-of-range {category} entry #{index}: {entry:?}");
            None
        }
        Err(e) => {
            log::warn!("Skipping unreadable {category} entry #{index}: {e}");
            None
        }
    }
}

/// Summary numbers for the Stats view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryStats {
    /// Number of distinct (num, pos) entries
    pub positions_filled: usize,
    /// Number of recorded values across entries
    pub total_values: usize,
}

/// Category → entries mapping. Every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct State {
    entries: BTreeMap<Category, Vec<Entry>>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            entries: Category::ALL.iter().map(|&cat| (cat, Vec::new())).collect(),
        }
    }
}

impl State {
    /// All-empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural check: an object whose every category key holds an array.
    /// Entries themselves are not inspected.
    pub fn validate(candidate: &Value) -> bool {
        Self::check_structure(candidate).is_ok()
    }

    fn check_structure(candidate: &Value) -> Result<&serde_json::Map<String, Value>, StoreError> {
        let obj = candidate.as_object().ok_or(StoreError::NotAnObject)?;
        for cat in Category::ALL {
            if !obj.get(cat.as_str()).is_some_and(Value::is_array) {
                return Err(StoreError::MissingCategory(cat));
            }
        }
        Ok(obj)
    }

    /// Build a state from parsed JSON. Unknown top-level keys are ignored.
    ///
    /// Only the structure can fail the whole payload. Entries that do not
    /// decode or fall outside the input bounds are skipped one by one.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        let obj = Self::check_structure(value)?;
        let mut entries = BTreeMap::new();
        for cat in Category::ALL {
            let items = obj[cat.as_str()].as_array().map(Vec::as_slice).unwrap_or(&[]);
            let list = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| decode_entry(cat, i, item))
                .collect();
            entries.insert(cat, list);
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Entries of `category` in storage order
    pub fn entries(&self, category: Category) -> &[Entry] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        self.entries.entry(category).or_default()
    }

    /// Append `value` to the (num, pos) entry, creating it if absent
    pub fn upsert(&mut self, category: Category, num: u16, pos: u8, value: u8) {
        let list = self.entries_mut(category);
        match list.iter_mut().find(|e| e.num == num && e.pos == pos) {
            Some(entry) => entry.values.push(value),
            None => list.push(Entry::new(num, pos, value)),
        }
    }

    /// All entries of `category` with the given `num`, any position
    pub fn query(&self, category: Category, num: u16) -> Vec<&Entry> {
        self.entries(category)
            .iter()
            .filter(|e| e.num == num)
            .collect()
    }

    pub fn stats(&self, category: Category) -> CategoryStats {
        let entries = self.entries(category);
        CategoryStats {
            positions_filled: entries.len(),
            total_values: entries.iter().map(|e| e.values.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}
