//! The external text-rendering collaborator.
//!
//! [`GroffRenderer`] reads manual-page source (gzip-aware) and pipes it
//! through `groff -E -c -mandoc -Tutf8`, then strips ANSI escapes and
//! backspace overstrike sequences so the tokenizer sees plain text.
//! Formatter warnings from malformed pages go to `/dev/null`; they are a
//! property of the page, not of this run.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use flate2::read::GzDecoder;
use regex::Regex;
use tracing::debug;

use crate::error::{ExtractError, Result};

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile"));
static OVERSTRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".\x08").expect("static regex must compile"));

/// Contract for turning a manual-page file into displayable plain text.
///
/// Implementations must expose the raw (decompressed) source separately so
/// callers can detect `.so` indirection stubs before paying for a render.
pub trait PageRenderer {
    /// Returns the raw page source, decompressed but not formatted.
    fn read_source(&self, path: &Path) -> Result<String>;

    /// Returns the fully rendered, escape-stripped plain text of the page.
    fn render(&self, path: &Path) -> Result<String>;
}

/// Renderer backed by the system `groff` formatter.
pub struct GroffRenderer;

impl PageRenderer for GroffRenderer {
    fn read_source(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;

        let decompressed = if path.extension().is_some_and(|ext| ext == "gz") {
            let mut decoder = GzDecoder::new(bytes.as_slice());
            let mut out = Vec::new();
            decoder.read_to_end(&mut out)?;
            out
        } else {
            bytes
        };

        // Manual pages are occasionally not valid UTF-8; degrade rather
        // than fail the page.
        Ok(String::from_utf8_lossy(&decompressed).into_owned())
    }

    fn render(&self, path: &Path) -> Result<String> {
        let source = self.read_source(path)?;
        let rendered = run_groff(path, &source)?;
        Ok(normalize_rendered(&rendered))
    }
}

/// Pipes page source through groff, returning its stdout.
fn run_groff(path: &Path, source: &str) -> Result<String> {
    let mut child = Command::new("groff")
        .args(["-E", "-c", "-mandoc", "-Tutf8"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| ExtractError::Render {
            path: path.display().to_string(),
            message: format!("failed to spawn groff: {err}"),
        })?;

    // Feed stdin from a second thread so a large page cannot deadlock
    // against a filling stdout pipe.
    let mut stdin = child.stdin.take().ok_or_else(|| ExtractError::Render {
        path: path.display().to_string(),
        message: "groff stdin unavailable".to_string(),
    })?;
    let source_bytes = source.as_bytes().to_vec();
    let writer = std::thread::spawn(move || {
        let _ = stdin.write_all(&source_bytes);
    });

    // Always reap the child, even when reading its output fails.
    let mut output = Vec::new();
    let read_result = match child.stdout.take() {
        Some(mut stdout) => stdout.read_to_end(&mut output).map(|_| ()),
        None => Ok(()),
    };

    let _ = writer.join();
    let status = child.wait()?;
    read_result?;
    debug!(path = %path.display(), exit = ?status.code(), bytes = output.len(), "rendered page");

    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Strips ANSI escape sequences and backspace overstrike (`X\bX` bold,
/// `_\bX` underline) from formatter output.
pub fn normalize_rendered(raw: &str) -> String {
    let stripped = ANSI_RE.replace_all(raw, "");
    let mut cleaned = stripped.into_owned();
    while OVERSTRIKE_RE.is_match(&cleaned) {
        cleaned = OVERSTRIKE_RE.replace_all(&cleaned, "").into_owned();
    }
    cleaned.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_ansi_color_escapes() {
        let raw = "\x1b[1mNAME\x1b[0m\n       ls - list\n";
        assert_eq!(normalize_rendered(raw), "NAME\n       ls - list\n");
    }

    #[test]
    fn test_normalize_strips_overstrike_bold_and_underline() {
        let raw = "N\x08NA\x08AM\x08ME\x08E\n_\x08l_\x08s\n";
        assert_eq!(normalize_rendered(raw), "NAME\nls\n");
    }

    #[test]
    fn test_normalize_leaves_plain_text_intact() {
        let raw = "OPTIONS\n  -a, --all   everything\n";
        assert_eq!(normalize_rendered(raw), raw);
    }

    #[test]
    fn test_read_source_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.1");
        std::fs::write(&path, ".TH LS 1\n").unwrap();

        let source = GroffRenderer.read_source(&path).unwrap();
        assert_eq!(source, ".TH LS 1\n");
    }

    #[test]
    fn test_read_source_gzip_file_matches_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.1.gz");

        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b".TH LS 1\n").unwrap();
        encoder.finish().unwrap();

        let source = GroffRenderer.read_source(&path).unwrap();
        assert_eq!(source, ".TH LS 1\n");
    }

    #[test]
    fn test_read_source_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/man1/ghost.1.gz");
        assert!(GroffRenderer.read_source(missing).is_err());
    }
}
