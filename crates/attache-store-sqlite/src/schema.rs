//! SQL schema for the session store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout for later migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per session field, keyed by the flat field name
-- (student_id, contact_email, admin_email, ...).
CREATE TABLE IF NOT EXISTS session_entries (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
