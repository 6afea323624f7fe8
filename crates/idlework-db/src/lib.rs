//! Persistence for idlework: string key-value stores and the save gateway.
//!
//! ```text
//! Game --save()/load()--> SaveGateway --JSON--> KeyValueStore
//!                                                 |-- MemoryStore
//!                                                 +-- FileStore (temp file + rename)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`KeyValueStore`] trait and [`MemoryStore`]
//! - [`file_store`] -- Durable [`FileStore`]
//! - [`gateway`] -- [`SaveGateway`], which absorbs every store failure
//! - [`error`] -- Shared error types

pub mod error;
pub mod file_store;
pub mod gateway;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use file_store::FileStore;
pub use gateway::SaveGateway;
pub use store::{KeyValueStore, MemoryStore};
