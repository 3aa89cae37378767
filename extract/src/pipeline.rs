//! Single-threaded extraction pipeline.
//!
//! Walks the enumerated manual pages one at a time, resolves each page's
//! identity, tokenizes its text, and writes entries through the
//! [`Catalogue`] trait. A page that fails to render or resolve is logged,
//! counted in the run report, and skipped; it never aborts the run.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use switch_catalogue_core::{Catalogue, CommandEntry, SystemId};

use crate::builtins::split_builtin_page;
use crate::error::Result;
use crate::identity::{
    BUILTINS_SECTION, BUILTINS_UMBRELLA, name_from_rendered, rewrite_stub_path, section_from_path,
    stub_display_name, stub_target,
};
use crate::probe::probe_help;
use crate::render::PageRenderer;
use crate::report::RunReport;
use crate::tokenizer::extract_switches;

/// Configuration for one manual-page scan.
pub struct ScanConfig {
    /// Root of the manual tree (conventionally `/usr/share/man`).
    pub man_root: PathBuf,
    /// Manual sections to visit, in order.
    pub sections: Vec<u8>,
    /// Builtin command names of the host shell. Gates which identifiers
    /// the composite builtins page may be split on.
    pub shell_builtins: HashSet<String>,
}

impl ScanConfig {
    /// Scan configuration for the user-command and admin sections.
    pub fn new(man_root: impl Into<PathBuf>) -> Self {
        Self {
            man_root: man_root.into(),
            sections: vec![1, 8],
            shell_builtins: HashSet::new(),
        }
    }
}

/// Scans every enumerated page and records the extracted entries.
///
/// Returns the canonical names of all commands recorded, so callers can
/// seed the remaining installed commands as bare entries afterwards.
pub fn scan_man_pages<R, C>(
    config: &ScanConfig,
    renderer: &R,
    catalogue: &mut C,
    system: SystemId,
    report: &mut RunReport,
) -> Result<BTreeSet<String>>
where
    R: PageRenderer,
    C: Catalogue + ?Sized,
{
    let pages = crate::enumerate::man_page_files(&config.man_root, &config.sections)?;
    let mut recorded = BTreeSet::new();

    for page in &pages {
        report.pages_seen += 1;
        let entries = match process_page(config, renderer, page) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(page = %page.display(), error = %err, "skipping page");
                report.record_failure(page, err.to_string());
                continue;
            }
        };

        for entry in entries {
            catalogue.record_command(system, &entry)?;
            report.commands_recorded += 1;
            recorded.insert(entry.command);
        }
    }

    Ok(recorded)
}

/// Turns one page file into catalogue entries.
///
/// A `.so` indirection stub is resolved to its target file and the command
/// name is recovered from the stub's own file name; the composite
/// shell-builtins page fans out into one entry per recognized builtin.
fn process_page<R: PageRenderer>(
    config: &ScanConfig,
    renderer: &R,
    page: &Path,
) -> Result<Vec<CommandEntry>> {
    let raw = renderer.read_source(page)?;

    let (resolved_path, stub_name) = match stub_target(&raw) {
        Some(target) => {
            let rewritten = resolve_stub_path(page, target);
            debug!(stub = %page.display(), target = %rewritten.display(), "following indirection");
            (rewritten, stub_display_name(page))
        }
        None => (page.to_path_buf(), None),
    };

    let rendered = renderer.render(&resolved_path)?;
    let section = section_from_path(&resolved_path).or_else(|| section_from_path(page));

    let declared = name_from_rendered(&rendered);
    if declared == BUILTINS_UMBRELLA {
        return Ok(builtin_entries(config, &declared, &rendered));
    }

    // Indirection pages keep the name recovered from the stub's own path,
    // not the declared name of the re-rendered target. Malformed content
    // degrades to an empty name; the page is still recorded.
    let display_name = stub_name.unwrap_or(declared);
    let switches = extract_switches(&rendered);
    Ok(vec![CommandEntry::from_manpage(display_name, section, switches)])
}

/// Maps a stub's redirect target back to an on-disk file, tolerating
/// compression mismatches between the stub and its target.
fn resolve_stub_path(stub: &Path, target: &str) -> PathBuf {
    let rewritten = rewrite_stub_path(stub, target);
    if rewritten.is_file() {
        return rewritten;
    }
    let toggled = if rewritten.extension().is_some_and(|ext| ext == "gz") {
        rewritten.with_extension("")
    } else {
        let mut with_gz = rewritten.clone().into_os_string();
        with_gz.push(".gz");
        PathBuf::from(with_gz)
    };
    if toggled.is_file() { toggled } else { rewritten }
}

/// Splits the composite builtins page into per-command entries. The
/// umbrella keeps its own declared name; each builtin files under the
/// umbrella's section.
fn builtin_entries(config: &ScanConfig, declared: &str, rendered: &str) -> Vec<CommandEntry> {
    let docs = split_builtin_page(
        &declared.to_lowercase(),
        rendered,
        &config.shell_builtins,
    );
    let umbrella = declared.to_lowercase();

    docs.into_iter()
        .map(|(command, doc)| {
            let switches = extract_switches(&doc);
            if command == umbrella {
                CommandEntry::from_manpage(declared, Some(BUILTINS_SECTION), switches)
            } else {
                CommandEntry::builtin(command, BUILTINS_SECTION, switches)
            }
        })
        .collect()
}

/// Probes `--help` for each named command and records any switches found.
///
/// Commands whose help output yields no switch tokens are left untouched;
/// their existing catalogue rows (if any) are not disturbed. Returns the
/// number of commands recorded.
pub fn scrape_help<C>(
    catalogue: &mut C,
    system: SystemId,
    commands: &BTreeSet<String>,
    report: &mut RunReport,
) -> Result<usize>
where
    C: Catalogue + ?Sized,
{
    let mut stored = 0;

    for command in commands {
        report.help_probes += 1;
        let output = probe_help(command)?;
        let switches = extract_switches(&output);
        if switches.is_empty() {
            continue;
        }
        let entry = CommandEntry::from_help(command.clone(), switches);
        catalogue.record_command(system, &entry)?;
        stored += 1;
    }

    debug!(probed = commands.len(), stored, "help scraping finished");
    Ok(stored)
}
