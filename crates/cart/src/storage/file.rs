//! File-backed key-value storage.
//!
//! Each key maps to `<dir>/<url-encoded key>.json`. Writes go to a sibling
//! temp file that is then renamed over the target, so readers only ever see a
//! complete value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// Key-value storage in a directory, one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get_item("@RocketShoes:cart").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/slots"));

        storage.set_item("@RocketShoes:cart", "[]").unwrap();

        assert_eq!(
            storage.get_item("@RocketShoes:cart").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_key_is_url_encoded_into_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let path = storage.path_for("@RocketShoes:cart");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "%40RocketShoes%3Acart.json"
        );

        let path = storage.path_for("../escape");
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("cart", "[1]").unwrap();
        storage.set_item("cart", "[2]").unwrap();

        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[2]"));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("cart", "[]").unwrap();
        storage.remove_item("cart").unwrap();
        assert_eq!(storage.get_item("cart").unwrap(), None);

        // Removing again is fine
        storage.remove_item("cart").unwrap();
    }
}
