//! SQL schema generation and verification.
//!
//! The catalogue uses three tables:
//!
//! - `system` — one row per operating-system name+version, unique by name
//! - `command` — one row per documented command under a system
//! - `switch` — extracted option tokens, owned exclusively by a command
//!
//! Switch rows cascade on command deletion; command rows cascade on system
//! deletion (systems are never deleted in practice, but the constraint
//! keeps the store free of orphans).

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Tables a usable catalogue database must contain.
pub const EXPECTED_TABLES: [&str; 3] = ["system", "command", "switch"];

/// Returns the complete DDL for the catalogue tables and indexes.
///
/// Uses `CREATE TABLE IF NOT EXISTS` throughout, so applying it to an
/// already-initialized database is a no-op.
pub fn generate_schema_sql() -> &'static str {
    r#"
CREATE TABLE IF NOT EXISTS system (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS command (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manpage_name TEXT,
    command TEXT NOT NULL,
    man_group TEXT,
    system_id INTEGER NOT NULL,
    FOREIGN KEY (system_id) REFERENCES system(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS switch (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    switch TEXT NOT NULL,
    command_id INTEGER NOT NULL,
    FOREIGN KEY (command_id) REFERENCES command(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_command_identity ON command(command, man_group, system_id);
CREATE INDEX IF NOT EXISTS idx_switch_command ON switch(command_id);
"#
}

/// Applies the schema to a connection, inside one transaction.
pub(crate) fn apply_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(generate_schema_sql())?;
    tx.commit()?;
    Ok(())
}

/// Verifies that all expected tables exist on a pre-existing database.
///
/// # Errors
///
/// Returns [`StoreError::SchemaMismatch`] when any of the three tables is
/// missing. A half-initialized catalogue cannot safely accept idempotent
/// upserts, so callers treat this as fatal.
pub(crate) fn verify_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' \
         AND name IN (?1, ?2, ?3)",
    )?;
    let found: usize = stmt.query_row(EXPECTED_TABLES, |row| row.get(0))?;

    if found != EXPECTED_TABLES.len() {
        return Err(StoreError::SchemaMismatch {
            found,
            expected: EXPECTED_TABLES.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_sql_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        assert!(verify_schema(&conn).is_ok());
    }

    #[test]
    fn test_apply_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();
        assert!(verify_schema(&conn).is_ok());
    }

    #[test]
    fn test_verify_schema_rejects_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        match verify_schema(&conn) {
            Err(StoreError::SchemaMismatch { found, expected }) => {
                assert_eq!(found, 0);
                assert_eq!(expected, 3);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_schema_rejects_partial_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE system (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();
        match verify_schema(&conn) {
            Err(StoreError::SchemaMismatch { found, .. }) => assert_eq!(found, 1),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}
