//! The string key-value medium behind the save gateway.
//!
//! [`MemoryStore`] keeps entries in process memory. Durable storage lives in
//! [`crate::file_store::FileStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::DbError;

/// Minimal string store: one value per key.
pub trait KeyValueStore {
    /// Write `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the medium rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DbError>;

    /// Read the value at `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, DbError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the medium rejects the delete.
    fn remove_item(&mut self, key: &str) -> Result<(), DbError>;
}

/// In-memory store.
///
/// Clones share the same entries, so a caller can keep a handle to inspect
/// what a consumer wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DbError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
