//! Entity types shared between the extraction pipeline and the store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key of a system row.
pub type SystemId = i64;

/// Store-assigned surrogate key of a command row.
pub type CommandId = i64;

/// One invocable command as documented under one system, together with the
/// switch set extracted for it.
///
/// Identity for store lookups is the tuple `(command, section, system)`;
/// when [`section`](Self::section) is `None` (entries sourced from `--help`
/// output or bare command enumeration) identity degrades to
/// `(command, system)`.
///
/// The persisted command name is always lower-cased; the originally-cased
/// name from the manual page is retained in
/// [`manpage_name`](Self::manpage_name) for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Display name as printed by the manual page (e.g. `LS`), if any.
    pub manpage_name: Option<String>,
    /// Canonical lower-cased command name used for identity.
    pub command: String,
    /// Manual section number, when the entry came from a sectioned page.
    pub section: Option<u8>,
    /// Deduplicated switch tokens owned by this command.
    pub switches: BTreeSet<String>,
}

impl CommandEntry {
    /// Builds an entry from a manual page's resolved display name.
    ///
    /// The display name is retained as-is and lower-cased for the canonical
    /// command identity.
    pub fn from_manpage(
        display_name: impl Into<String>,
        section: Option<u8>,
        switches: BTreeSet<String>,
    ) -> Self {
        let display_name = display_name.into();
        let command = display_name.to_lowercase();
        Self {
            manpage_name: Some(display_name),
            command,
            section,
            switches,
        }
    }

    /// Builds an entry for one sub-command of a composite builtins page.
    ///
    /// Sub-documents carry no display name of their own; the section is
    /// fixed to the umbrella page's primary section.
    pub fn builtin(command: impl Into<String>, section: u8, switches: BTreeSet<String>) -> Self {
        Self {
            manpage_name: None,
            command: command.into().to_lowercase(),
            section: Some(section),
            switches,
        }
    }

    /// Builds an entry from scraped `--help` output (no manual section).
    pub fn from_help(command: impl Into<String>, switches: BTreeSet<String>) -> Self {
        Self {
            manpage_name: None,
            command: command.into().to_lowercase(),
            section: None,
            switches,
        }
    }

    /// Builds an entry for a command known only from shell enumeration.
    ///
    /// Such entries have no section and an empty switch set; they exist so
    /// completion databases still know the command is invocable.
    pub fn bare(command: impl Into<String>) -> Self {
        Self {
            manpage_name: None,
            command: command.into().to_lowercase(),
            section: None,
            switches: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_manpage_lowercases_command_and_keeps_display_name() {
        let entry = CommandEntry::from_manpage("BASH", Some(1), BTreeSet::new());
        assert_eq!(entry.command, "bash");
        assert_eq!(entry.manpage_name.as_deref(), Some("BASH"));
        assert_eq!(entry.section, Some(1));
    }

    #[test]
    fn test_bare_entry_has_no_section_and_no_switches() {
        let entry = CommandEntry::bare("compgen");
        assert_eq!(entry.command, "compgen");
        assert!(entry.manpage_name.is_none());
        assert!(entry.section.is_none());
        assert!(entry.switches.is_empty());
    }

    #[test]
    fn test_builtin_entry_fixes_section() {
        let entry = CommandEntry::builtin("cd", 1, BTreeSet::new());
        assert_eq!(entry.section, Some(1));
        assert!(entry.manpage_name.is_none());
    }
}
