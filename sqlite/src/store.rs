//! The catalogue store: find-or-create systems and commands, replace
//! switch sets on reparse.
//!
//! All per-command mutation happens inside one transaction so a failure
//! partway never leaves a command with a mix of stale and fresh switches.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use switch_catalogue_core::{Catalogue, CatalogueError, CommandEntry, CommandId, SystemId};

use crate::error::Result;
use crate::schema::{apply_schema, verify_schema};

/// SQLite-backed implementation of the [`Catalogue`] contract.
///
/// # Examples
///
/// ```
/// use switch_catalogue_core::{Catalogue, CommandEntry};
/// use switch_catalogue_sqlite::SwitchStore;
/// use std::collections::BTreeSet;
///
/// let mut store = SwitchStore::open_in_memory().unwrap();
/// let system = store.resolve_system("TestOS1.0").unwrap();
///
/// let switches: BTreeSet<String> = ["-l"].into_iter().map(String::from).collect();
/// let id = store
///     .record_command(system, &CommandEntry::from_manpage("ls", Some(1), switches))
///     .unwrap();
///
/// assert_eq!(store.switches_for(id).unwrap(), vec!["-l".to_string()]);
/// ```
pub struct SwitchStore {
    conn: Connection,
}

impl SwitchStore {
    /// Opens (or creates) the catalogue database at `path`.
    ///
    /// A fresh file gets the schema applied; a pre-existing file is
    /// verified to carry the expected tables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SchemaMismatch`](crate::StoreError::SchemaMismatch)
    /// when `path` exists but lacks the catalogue tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let fresh = !path.exists();

        if fresh && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        if fresh {
            apply_schema(&conn)?;
        } else {
            verify_schema(&conn)?;
        }

        Ok(Self { conn })
    }

    /// Opens an in-memory store with the schema applied. Intended for tests
    /// and ephemeral runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Finds or creates the system row for `name`.
    pub fn resolve_system_id(&self, name: &str) -> Result<SystemId> {
        if let Some(id) = self
            .conn
            .query_row(
                "SELECT id FROM system WHERE name = ?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
        {
            return Ok(id);
        }

        self.conn
            .execute("INSERT INTO system(name) VALUES(?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Records one command and its switches under `system`, atomically.
    ///
    /// An existing row with the same identity tuple is reused and its
    /// switches are purged before the fresh set is inserted.
    pub fn record_command_entry(
        &self,
        system: SystemId,
        entry: &CommandEntry,
    ) -> Result<CommandId> {
        let tx = self.conn.unchecked_transaction()?;
        let command_id = resolve_command(&tx, system, entry)?;
        insert_switches(&tx, command_id, &entry.switches)?;
        tx.commit()?;
        Ok(command_id)
    }

    /// Records a batch of bare commands (no switches, no section) in one
    /// transaction.
    pub fn record_bare_command_names(
        &self,
        system: SystemId,
        commands: &BTreeSet<String>,
    ) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for command in commands {
            let entry = CommandEntry::bare(command.clone());
            resolve_command(&tx, system, &entry)?;
        }
        tx.commit()?;
        Ok(commands.len())
    }

    /// Returns the canonical names of all commands catalogued under
    /// `system`.
    pub fn known_command_names(&self, system: SystemId) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT command FROM command WHERE system_id = ?1")?;
        let names = stmt
            .query_map(params![system], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<BTreeSet<_>, _>>()?;
        Ok(names)
    }

    /// Returns the switch tokens owned by a command row, sorted.
    pub fn switches_for(&self, command_id: CommandId) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT switch FROM switch WHERE command_id = ?1 ORDER BY switch")?;
        let switches = stmt
            .query_map(params![command_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(switches)
    }

    /// Returns the total number of command rows (all systems).
    pub fn command_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM command", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Finds the command row for the entry's identity tuple, purging its
/// switches, or inserts a new row. Runs inside the caller's transaction.
fn resolve_command(tx: &Transaction<'_>, system: SystemId, entry: &CommandEntry) -> Result<CommandId> {
    let group = entry.section.map(|n| n.to_string());

    // Entries without a section (help output, bare enumeration) match on
    // (command, system) only.
    let existing = match &group {
        Some(group) => tx
            .query_row(
                "SELECT id FROM command WHERE command = ?1 AND man_group = ?2 AND system_id = ?3",
                params![entry.command, group, system],
                |row| row.get::<_, i64>(0),
            )
            .optional()?,
        None => tx
            .query_row(
                "SELECT id FROM command WHERE command = ?1 AND system_id = ?2",
                params![entry.command, system],
                |row| row.get::<_, i64>(0),
            )
            .optional()?,
    };

    if let Some(id) = existing {
        tx.execute("DELETE FROM switch WHERE command_id = ?1", params![id])?;
        return Ok(id);
    }

    tx.execute(
        "INSERT INTO command(manpage_name, command, man_group, system_id) \
         VALUES(?1, ?2, ?3, ?4)",
        params![entry.manpage_name, entry.command, group, system],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Inserts the switch set for a command. Uniqueness is guaranteed upstream
/// by the tokenizer's set semantics, not enforced here.
fn insert_switches(
    tx: &Transaction<'_>,
    command_id: CommandId,
    switches: &BTreeSet<String>,
) -> Result<()> {
    let mut stmt = tx.prepare("INSERT INTO switch(switch, command_id) VALUES(?1, ?2)")?;
    for switch in switches {
        stmt.execute(params![switch, command_id])?;
    }
    Ok(())
}

impl Catalogue for SwitchStore {
    fn resolve_system(&mut self, name: &str) -> std::result::Result<SystemId, CatalogueError> {
        self.resolve_system_id(name).map_err(Into::into)
    }

    fn record_command(
        &mut self,
        system: SystemId,
        entry: &CommandEntry,
    ) -> std::result::Result<CommandId, CatalogueError> {
        self.record_command_entry(system, entry).map_err(Into::into)
    }

    fn record_bare_commands(
        &mut self,
        system: SystemId,
        commands: &BTreeSet<String>,
    ) -> std::result::Result<usize, CatalogueError> {
        self.record_bare_command_names(system, commands)
            .map_err(Into::into)
    }

    fn known_commands(
        &mut self,
        system: SystemId,
    ) -> std::result::Result<BTreeSet<String>, CatalogueError> {
        self.known_command_names(system).map_err(Into::into)
    }
}
