//! Manual-page file enumeration under a man tree root.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Lists manual-page files under `root` for the requested sections.
///
/// Each section `n` maps to the `man<n>` directory directly under `root`;
/// a missing section directory contributes nothing rather than failing the
/// run. Results are sorted so repeated runs visit pages in a stable order.
pub fn man_page_files(root: &Path, sections: &[u8]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for section in sections {
        let dir = root.join(format!("man{section}"));
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "section directory absent, skipping");
            continue;
        }
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    debug!(count = files.len(), root = %root.display(), "enumerated manual pages");
    Ok(files)
}
