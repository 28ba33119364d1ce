//! Record store database schema.

/// Statements that create the records table and its indexes.
///
/// `seq` preserves insertion order; an upsert keeps the original row, so a
/// record never moves once written.
pub const CREATE_RECORDS_TABLE: &[&str] = &[
    r"
CREATE TABLE IF NOT EXISTS records (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,
    owner_id    TEXT,
    payload     TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (collection, id)
)",
    r"
CREATE INDEX IF NOT EXISTS idx_records_owner
    ON records (collection, owner_id, seq)",
];
