//! Splitter for the composite shell-builtins manual page.
//!
//! The shell's manual documents dozens of builtin commands under a single
//! `SHELL BUILTIN COMMANDS` heading. This module partitions the rendered
//! page into per-command sub-documents with a single line-oriented pass,
//! expressed as an explicit three-state machine so the transition
//! conditions stay auditable in isolation from the tokenizer.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Section header that starts the builtins listing.
pub const BUILTINS_SECTION_HEADER: &str = "SHELL BUILTIN COMMANDS";

/// A builtin entry header: 6-8 leading spaces, then a bare identifier.
static BUILTIN_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {6,8}([a-zA-Z0-9_+-]+)").expect("static regex must compile")
});

/// States of the splitter's single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    /// Accumulating the umbrella command's own document.
    Preamble,
    /// Inside the builtins listing, routing lines to sub-documents.
    ScanningBuiltins,
    /// A following top-level section ended the scan.
    Done,
}

/// Partitions a composite builtins page into per-command sub-documents.
///
/// Returns a mapping from command name (the umbrella plus each recognized
/// builtin) to its text slice. Only identifiers present in
/// `known_commands` start a new sub-document; header-shaped lines naming
/// anything else are treated as prose of the active sub-document. Lines
/// between the section header and the first recognized builtin are
/// dropped, and the scan stops at the first line starting with an
/// uppercase letter in column one after the listing begins.
///
/// # Examples
///
/// ```
/// use switch_catalogue_extract::builtins::split_builtin_page;
/// use std::collections::HashSet;
///
/// let known: HashSet<String> = ["cd".to_string()].into_iter().collect();
/// let text = "\
/// BASH(1)
/// preamble text
/// SHELL BUILTIN COMMANDS
///        cd [-L|-P] [dir]
///               Change the current directory.
/// SEE ALSO
/// ";
/// let docs = split_builtin_page("bash", text, &known);
/// assert!(docs.contains_key("bash"));
/// assert!(docs["cd"].contains("-L|-P"));
/// ```
pub fn split_builtin_page(
    umbrella: &str,
    text: &str,
    known_commands: &HashSet<String>,
) -> BTreeMap<String, String> {
    let mut docs: BTreeMap<String, String> = BTreeMap::new();
    let mut state = SplitState::Preamble;
    let mut umbrella_doc = String::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        match state {
            SplitState::Preamble => {
                if line == BUILTINS_SECTION_HEADER {
                    docs.insert(umbrella.to_string(), std::mem::take(&mut umbrella_doc));
                    state = SplitState::ScanningBuiltins;
                } else {
                    umbrella_doc.push_str(line);
                    umbrella_doc.push('\n');
                }
            }
            SplitState::ScanningBuiltins => {
                if let Some(caps) = BUILTIN_HEADER_RE.captures(line) {
                    let ident = &caps[1];
                    if known_commands.contains(ident) {
                        // The header line seeds the new sub-document.
                        current = Some(ident.to_string());
                        let doc = docs.entry(ident.to_string()).or_default();
                        doc.push_str(line);
                        doc.push('\n');
                        continue;
                    }
                } else if line.chars().next().is_some_and(|ch| ch.is_ascii_uppercase()) {
                    state = SplitState::Done;
                    continue;
                }

                // Prose: attribute to the active sub-document, or drop it
                // when no builtin has been recognized yet.
                if let Some(name) = &current
                    && let Some(doc) = docs.get_mut(name)
                {
                    doc.push_str(line);
                    doc.push('\n');
                }
            }
            SplitState::Done => break,
        }
    }

    // A page without the builtins section is all preamble.
    if state == SplitState::Preamble {
        docs.insert(umbrella.to_string(), umbrella_doc);
    }

    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    const PAGE: &str = "\
BASH(1)
bash - GNU Bourne-Again SHell
bash [options] [command_string | file]
SHELL BUILTIN COMMANDS
       Unless otherwise noted, each builtin command accepts -- .
       cd [-L|[-P [-e]]] [dir]
              Change the current directory to dir.
              The variable CDPATH defines the search path.
       echo [-neE] [arg ...]
              Output the args, separated by spaces.
SEE ALSO
       sh(1), ksh(1)
";

    #[test]
    fn test_partitions_umbrella_and_two_builtins() {
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo"]));

        assert_eq!(docs.len(), 3);
        assert!(docs.contains_key("bash"));
        assert!(docs.contains_key("cd"));
        assert!(docs.contains_key("echo"));
    }

    #[test]
    fn test_umbrella_document_is_the_preamble() {
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo"]));
        let bash = &docs["bash"];
        assert!(bash.contains("GNU Bourne-Again SHell"));
        assert!(!bash.contains("SHELL BUILTIN COMMANDS"));
        assert!(!bash.contains("cd [-L"));
    }

    #[test]
    fn test_builtin_document_spans_until_next_builtin() {
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo"]));
        let cd = &docs["cd"];
        assert!(cd.contains("cd [-L|[-P [-e]]] [dir]"));
        assert!(cd.contains("CDPATH"));
        assert!(!cd.contains("echo [-neE]"));
    }

    #[test]
    fn test_scan_stops_at_next_top_level_section() {
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo"]));
        let echo = &docs["echo"];
        assert!(echo.contains("Output the args"));
        assert!(!echo.contains("SEE ALSO"));
        assert!(!echo.contains("sh(1)"));
    }

    #[test]
    fn test_unknown_identifier_is_prose_not_a_new_entry() {
        // "Unless" is header-shaped (7 leading spaces, bare identifier) but
        // not a known command, and precedes the first recognized builtin,
        // so the line is dropped entirely.
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo"]));
        assert!(!docs.contains_key("Unless"));
        assert!(docs.values().all(|doc| !doc.contains("Unless otherwise")));
    }

    #[test]
    fn test_builtin_absent_from_page_produces_no_document() {
        let docs = split_builtin_page("bash", PAGE, &known(&["cd", "echo", "ulimit"]));
        assert!(!docs.contains_key("ulimit"));
    }

    #[test]
    fn test_page_without_builtins_section_is_all_umbrella() {
        let text = "BASH(1)\njust a normal page\n";
        let docs = split_builtin_page("bash", text, &known(&["cd"]));
        assert_eq!(docs.len(), 1);
        assert!(docs["bash"].contains("just a normal page"));
    }

    #[test]
    fn test_unknown_header_inside_listing_stays_with_active_builtin() {
        let text = "\
SHELL BUILTIN COMMANDS
       cd [dir]
       notacommand mentioned mid-entry
       echo [arg]
";
        let docs = split_builtin_page("bash", text, &known(&["cd", "echo"]));
        assert!(docs["cd"].contains("notacommand"));
        assert!(!docs["echo"].contains("notacommand"));
    }
}
