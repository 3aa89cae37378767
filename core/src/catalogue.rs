//! Store contract consumed by the extraction pipeline.

use std::collections::BTreeSet;

use crate::error::CatalogueError;
use crate::types::{CommandEntry, CommandId, SystemId};

/// Idempotent persistence contract for the switch catalogue.
///
/// Implementations must honor the replace-on-reparse discipline: recording
/// a command whose identity tuple already exists purges the previously
/// stored switches and repopulates them from the new entry, atomically per
/// call. Repeated calls with identical input are therefore safe and
/// convergent.
pub trait Catalogue {
    /// Finds or creates the system row for `name`, returning its id.
    ///
    /// Never fails on repeat calls with the same name; the same id is
    /// returned every time.
    fn resolve_system(&mut self, name: &str) -> Result<SystemId, CatalogueError>;

    /// Records one command and its switch set under `system`.
    ///
    /// If the identity tuple `(command, section, system)` already maps to a
    /// row, that row is kept and its switches are replaced wholesale;
    /// otherwise a new row is created. The lookup, purge, and switch
    /// inserts form one atomic unit.
    fn record_command(
        &mut self,
        system: SystemId,
        entry: &CommandEntry,
    ) -> Result<CommandId, CatalogueError>;

    /// Records commands known only by name, with no switches and no section.
    ///
    /// Returns the number of commands written. Implementations may batch
    /// the writes into a single unit; per-command atomicity is not required
    /// because bare entries own no switches.
    fn record_bare_commands(
        &mut self,
        system: SystemId,
        commands: &BTreeSet<String>,
    ) -> Result<usize, CatalogueError>;

    /// Returns the canonical names of all commands already catalogued under
    /// `system`.
    ///
    /// Used to avoid reprocessing commands already seen from richer
    /// sources when ingesting cheaper enumeration output.
    fn known_commands(&mut self, system: SystemId) -> Result<BTreeSet<String>, CatalogueError>;
}
