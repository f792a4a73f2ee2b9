//! Error types
//!
//! Nothing here is fatal: load failures are recovered by the store, write
//! failures and bad input are surfaced to the user and the session carries on.

use std::fmt;

use thiserror::Error;

use crate::category::Category;

/// Which input field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Num,
    Pos,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Num => "num",
            Field::Pos => "pos",
            Field::Value => "value",
        })
    }
}

/// Rejected user input. The operation is aborted with no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: Field, raw: String },

    #[error("{field} out of range: {value} (expected 0-{max})")]
    OutOfRange { field: Field, value: i64, max: i64 },
}

/// Failure reported by a key-value storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Store-level failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("persisted data is not an object")]
    NotAnObject,

    #[error("persisted data has no list for category {0}")]
    MissingCategory(Category),
}

/// Errors surfaced by the controller to the user
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Text shown to the user in an alert
    pub fn user_message(&self) -> String {
        match self {
            AppError::Input(_) => {
                "Please enter valid values: Num (000-999), Pos (P1-P10), Val (0-9)".to_string()
            }
            AppError::Store(e) => format!("Failed to save data: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::OutOfRange {
            field: Field::Num,
            value: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "num out of range: 1000 (expected 0-999)");

        let err = InputError::NotANumber {
            field: Field::Value,
            raw: "x".to_string(),
        };
        assert_eq!(err.to_string(), "value is not a number: \"x\"");
    }

    #[test]
    fn test_store_error_from_storage_is_transparent() {
        let err: StoreError = StorageError::Write("quota exceeded".to_string()).into();
        assert_eq!(err.to_string(), "storage write failed: quota exceeded");
    }

    #[test]
    fn test_missing_category_display() {
        let err = StoreError::MissingCategory(Category::CIV10);
        assert!(err.to_string().contains("CIV10"));
    }

    #[test]
    fn test_user_message() {
        let err = AppError::from(InputError::OutOfRange {
            field: Field::Pos,
            value: 10,
            max: 9,
        });
        assert!(err.user_message().starts_with("Please enter valid values"));

        let err = AppError::from(StoreError::from(StorageError::Write("full".to_string())));
        assert_eq!(err.user_message(), "Failed to save data: storage write failed: full");
    }
}
