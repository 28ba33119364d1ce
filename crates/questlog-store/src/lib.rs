//! Record store implementations for Questlog.
//!
//! `MemoryRecordStore` keeps everything in process memory; `SqliteRecordStore`
//! persists to a local SQLite database. Both honor the same contract:
//! insertion order, last-write-wins upserts, atomic batches, and cascading
//! deletes along collection ownership.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
