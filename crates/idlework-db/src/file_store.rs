//! Durable store: one JSON file per key under a data directory.
//!
//! Writes go to a sibling temp file that is then renamed over the target,
//! so a crash mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DbError;
use crate::store::KeyValueStore;

/// File-backed [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidKey`] for an empty key or one made only of
    /// dots.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, DbError> {
        if key.is_empty() || key.chars().all(|c| c == '.') {
            return Err(DbError::InvalidKey(key.to_owned()));
        }
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| DbError::io(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| DbError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| DbError::io(&path, e))?;

        debug!(path = %path.display(), bytes = value.len(), "store entry written");
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DbError::io(path, e)),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DbError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DbError::io(path, e)),
        }
    }
}
