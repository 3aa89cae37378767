//! Command identity resolution: name and manual section from a page's
//! path and rendered content, including `.so` indirection stubs.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Display name of the composite shell-builtins page. A page resolving to
/// this name is routed to the builtin splitter instead of being tokenized
/// directly.
pub const BUILTINS_UMBRELLA: &str = "BASH";

/// Manual section the builtins umbrella files its sub-commands under.
pub const BUILTINS_SECTION: u8 = 1;

static SECTION_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^man(\d)$").expect("static regex must compile"));

/// Parses the manual section number from a file path.
///
/// Looks for a directory path segment of the form `man<digit>`. Absent
/// segments yield `None`; the command is then identity-matched by
/// `(command, system)` only.
///
/// # Examples
///
/// ```
/// use switch_catalogue_extract::identity::section_from_path;
/// use std::path::Path;
///
/// assert_eq!(section_from_path(Path::new("/usr/share/man/man1/ls.1.gz")), Some(1));
/// assert_eq!(section_from_path(Path::new("/tmp/ls.txt")), None);
/// ```
pub fn section_from_path(path: &Path) -> Option<u8> {
    path.components().find_map(|component| {
        let segment = component.as_os_str().to_str()?;
        let caps = SECTION_DIR_RE.captures(segment)?;
        caps[1].parse().ok()
    })
}

/// Extracts the page's declared name from rendered content.
///
/// The formatter conventionally emits the declared name first; the name is
/// the leading contiguous run of word characters, dots, and hyphens.
/// Malformed content degrades to an empty name rather than failing.
pub fn name_from_rendered(content: &str) -> String {
    content
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-'))
        .collect()
}

/// Returns the redirection target of a `.so` indirection stub, if the raw
/// source is one.
///
/// Stub files carry a single directive like `.so man1/ls.1`; the target is
/// the last whitespace-separated token of the first line.
pub fn stub_target(raw_source: &str) -> Option<&str> {
    if !raw_source.starts_with(".so") {
        return None;
    }
    let first_line = raw_source.lines().next()?;
    let target = first_line.split_whitespace().nth(1)?;
    if target.is_empty() { None } else { Some(target) }
}

/// Derives the intended command name from a stub file's own path: the file
/// name with its compression and section suffixes stripped.
///
/// For `/usr/share/man/man1/egrep.1.gz` this is `egrep`. The recovered
/// name — not the name inside the re-rendered target — becomes the
/// canonical command name for indirection pages.
pub fn stub_display_name(path: &Path) -> Option<String> {
    let mut name = path.file_name()?.to_str()?;
    if let Some(stripped) = name.strip_suffix(".gz") {
        name = stripped;
    }
    // Strip one trailing section-like extension (1-5 word characters).
    if let Some(idx) = name.rfind('.')
        && !name[idx + 1..].is_empty()
        && name[idx + 1..].len() <= 5
        && name[idx + 1..].chars().all(|ch| ch.is_ascii_alphanumeric())
    {
        name = &name[..idx];
    }
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Rewrites a stub's file path to point at its redirection target.
///
/// A target containing a directory segment (`man1/ls.1`) replaces the
/// final two path segments; a bare file name replaces only the last one.
/// When the stub itself was gzipped the target gets a `.gz` suffix
/// appended, matching how compressed trees store their redirect targets.
pub fn rewrite_stub_path(stub_path: &Path, target: &str) -> PathBuf {
    let gz = stub_path.extension().is_some_and(|ext| ext == "gz");
    let mut target = target.to_string();
    if gz && !target.ends_with(".gz") {
        target.push_str(".gz");
    }

    let mut rewritten = stub_path.to_path_buf();
    rewritten.pop();
    if target.contains('/') {
        rewritten.pop();
    }
    rewritten.push(target);
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_man1_path() {
        assert_eq!(
            section_from_path(Path::new("/usr/share/man/man1/ls.1.gz")),
            Some(1)
        );
        assert_eq!(
            section_from_path(Path::new("/usr/share/man/man8/mount.8")),
            Some(8)
        );
    }

    #[test]
    fn test_section_absent_without_man_segment() {
        assert_eq!(section_from_path(Path::new("/tmp/pages/ls.1.gz")), None);
        // "manual" and "man12" are not section segments.
        assert_eq!(section_from_path(Path::new("/usr/share/manual/ls.1")), None);
        assert_eq!(section_from_path(Path::new("/usr/share/man/man12/x.1")), None);
    }

    #[test]
    fn test_name_from_rendered_takes_leading_word_run() {
        assert_eq!(name_from_rendered("LS(1)  User Commands"), "LS");
        assert_eq!(name_from_rendered("git-log - show commits"), "git-log");
        assert_eq!(name_from_rendered("e2fsck.conf(5)"), "e2fsck.conf");
    }

    #[test]
    fn test_name_from_rendered_degrades_to_empty() {
        assert_eq!(name_from_rendered(""), "");
        assert_eq!(name_from_rendered("   leading spaces"), "");
    }

    #[test]
    fn test_stub_target_parses_so_directive() {
        assert_eq!(stub_target(".so man1/ls.1\n"), Some("man1/ls.1"));
        assert_eq!(stub_target(".so grep.1"), Some("grep.1"));
    }

    #[test]
    fn test_stub_target_rejects_regular_content() {
        assert_eq!(stub_target("LS(1)  User Commands"), None);
        assert_eq!(stub_target(".so"), None);
    }

    #[test]
    fn test_stub_display_name_strips_suffixes() {
        assert_eq!(
            stub_display_name(Path::new("/usr/share/man/man1/egrep.1.gz")),
            Some("egrep".to_string())
        );
        assert_eq!(
            stub_display_name(Path::new("/usr/share/man/man8/fsck.8")),
            Some("fsck".to_string())
        );
    }

    #[test]
    fn test_rewrite_with_directory_target_replaces_two_segments() {
        let rewritten = rewrite_stub_path(
            Path::new("/usr/share/man/man1/egrep.1.gz"),
            "man1/grep.1",
        );
        assert_eq!(
            rewritten,
            Path::new("/usr/share/man/man1/grep.1.gz")
        );
    }

    #[test]
    fn test_rewrite_with_bare_target_replaces_one_segment() {
        let rewritten = rewrite_stub_path(Path::new("/usr/share/man/man1/egrep.1.gz"), "grep.1");
        assert_eq!(rewritten, Path::new("/usr/share/man/man1/grep.1.gz"));
    }

    #[test]
    fn test_rewrite_preserves_plain_extension_for_uncompressed_stub() {
        let rewritten = rewrite_stub_path(Path::new("/usr/share/man/man1/egrep.1"), "grep.1");
        assert_eq!(rewritten, Path::new("/usr/share/man/man1/grep.1"));
    }
}
