//! File-backed storage for native builds
//!
//! Each key lives in `<dir>/<key>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStorage;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at `$LOTONU_DATA_DIR`, or `./.lotonu` when unset
    pub fn from_env() -> Self {
        let dir = std::env::var_os(crate::consts::DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(crate::consts::DEFAULT_DATA_DIR));
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        // Write a sibling temp file, then rename it over the target
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));
        assert_eq!(storage.get("lotonu-data").unwrap(), None);
    }

    #[test]
    fn test_set_creates_dir_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested/data"));
        storage.set("lotonu-data", "{\"GH18\":[]}").unwrap();
        assert_eq!(
            storage.get("lotonu-data").unwrap().as_deref(),
            Some("{\"GH18\":[]}")
        );
        assert!(dir.path().join("nested/data/lotonu-data.json").exists());
        assert!(!dir.path().join("nested/data/lotonu-data.json.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set("k", "v").unwrap();
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the target's place makes the rename fail
        fs::create_dir(dir.path().join("k.json")).unwrap();
        fs::create_dir(dir.path().join("k.json").join("blocker")).unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(matches!(storage.set("k", "v"), Err(StorageError::Io(_))));
        assert!(!dir.path().join("k.json.tmp").exists());
    }
}
