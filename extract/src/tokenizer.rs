//! Switch tokenizer: rendered text in, deduplicated switch set out.
//!
//! A candidate switch begins with one or two hyphens or a single plus sign,
//! followed by letters, digits, `#`, `?`, hyphens, or plus signs. Candidates
//! are recognized in two contexts:
//!
//! 1. inside bracket/brace-delimited alternative lists such as `{-a|-b}`
//!    or `[-x, --long]`, where each pipe- or comma-separated alternative
//!    is itself a candidate;
//! 2. inline within prose, bounded by whitespace, punctuation, or an
//!    opening bracket, optionally followed by up to two sibling tokens on
//!    the same logical line (`-f, --force`, `-o FILE`).
//!
//! The list context is tried first: the inline boundary class also matches
//! an opening brace, and letting it win there would swallow the second
//! alternative of a pair like `{-a|-b}`.
//!
//! A candidate is kept only when it contains at least one word character,
//! `#`, or `?` — or is exactly the bare long-option marker `--`. This
//! rejects punctuation artifacts like the lone hyphen of a hyphenated word.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Candidate contexts: bracketed alternative lists (groups 1-2), then
/// inline prose (groups 3-5). List alternatives must come first in the
/// alternation.
static SWITCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:[\[{]((?:--?|\+)[^ ]*?)[|,\]}](?:((?:--?|\+)[^ ]*?)[\]}])?)+|(?:\n?(?:[^\w\-]|\[)((?:--?|\+)[#?\w+-]*)(?:,?\s((?:--?|\+)[#?\w+-]+)|.*?\s((?:--?|\+)[#?\w+-]+))?)",
    )
    .expect("static regex must compile")
});

/// Extracts the set of switch tokens from a block of rendered text.
///
/// Pure and idempotent: identical input always yields the identical set.
/// Tokens dedup by exact string match only; no case normalization.
///
/// # Examples
///
/// ```
/// use switch_catalogue_extract::tokenizer::extract_switches;
///
/// let switches = extract_switches("  -f, --force   never prompt\n");
/// assert!(switches.contains("-f"));
/// assert!(switches.contains("--force"));
/// ```
pub fn extract_switches(text: &str) -> BTreeSet<String> {
    let mut switches = BTreeSet::new();

    for caps in SWITCH_RE.captures_iter(text) {
        for group in 1..=5 {
            if let Some(candidate) = caps.get(group) {
                let candidate = candidate.as_str();
                if is_acceptable(candidate) {
                    switches.insert(candidate.to_string());
                }
            }
        }
    }

    switches
}

/// Accepts a candidate that carries at least one word character, `#`, or
/// `?`, or is exactly `--`.
fn is_acceptable(candidate: &str) -> bool {
    candidate == "--"
        || candidate
            .chars()
            .any(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '#' | '?'))
}
