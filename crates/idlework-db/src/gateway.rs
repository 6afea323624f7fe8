//! The save gateway: one JSON record under one fixed key.
//!
//! The gateway is the only place persistence failures are handled. Every
//! [`DbError`] is logged here and turned into "no save" or "save skipped";
//! callers never see an error.

use chrono::Utc;
use idlework_types::SaveRecord;
use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::store::KeyValueStore;

/// Reads and writes the single save record.
#[derive(Debug, Clone)]
pub struct SaveGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SaveGateway<S> {
    /// Gateway writing under `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The record key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the save with `record`, stamping the save time.
    ///
    /// Returns `false` if the write was skipped.
    pub fn save(&mut self, record: &SaveRecord) -> bool {
        match self.try_save(record) {
            Ok(bytes) => {
                info!(key = %self.key, bytes, "game saved");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "save skipped");
                false
            }
        }
    }

    /// Read the save, or `None` if it is absent, unreadable, or malformed.
    pub fn load(&self) -> Option<SaveRecord> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no save found");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "save unreadable");
                return None;
            }
        };

        match serde_json::from_str::<SaveRecord>(&raw) {
            Ok(record) => {
                info!(
                    key = %self.key,
                    upgrades = record.upgrade_data.len(),
                    saved_at = ?record.saved_at,
                    "save loaded"
                );
                Some(record)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed save ignored");
                None
            }
        }
    }

    /// Delete the save. Returns `false` if the store refused.
    pub fn clear(&mut self) -> bool {
        match self.store.remove_item(&self.key) {
            Ok(()) => {
                info!(key = %self.key, "save cleared");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "save clear failed");
                false
            }
        }
    }

    fn try_save(&mut self, record: &SaveRecord) -> Result<usize, DbError> {
        let stamped = SaveRecord {
            saved_at: Some(Utc::now()),
            ..record.clone()
        };
        let json = serde_json::to_string(&stamped)?;
        self.store.set_item(&self.key, &json)?;
        Ok(json.len())
    }
}
