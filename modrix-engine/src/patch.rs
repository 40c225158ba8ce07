//! Pure text patching primitives
//!
//! Every operation in this module is a plain string transform: no
//! filesystem access, no panics, no surprises. "Anchor not found" is not an
//! error here — operations either hand back the input unchanged or report
//! the outcome explicitly through [`PatchOutcome`], and the caller decides
//! whether a miss is acceptable template drift or a hard failure.

use regex::Regex;

/// Result of a structured-field rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Exactly one match was found and rewritten.
    Patched(String),
    /// The anchor pattern matched nothing; content is unchanged.
    NoMatchFound,
    /// The pattern matched more than once; nothing was rewritten.
    AmbiguousMultipleMatches(usize),
}

/// Replace all non-overlapping occurrences of `from`, case-sensitively.
#[must_use]
pub fn replace_literal(content: &str, from: &str, to: &str) -> String {
    content.replace(from, to)
}

/// Replace the uppercase form of `from` with the uppercase form of `to`.
///
/// Used for `MOD_ID`-style constants where the template carries the
/// placeholder token in all caps.
#[must_use]
pub fn replace_literal_all_caps(content: &str, from: &str, to: &str) -> String {
    content.replace(&from.to_uppercase(), &to.to_uppercase())
}

/// Rewrite a single structured field (a JSON/TOML/properties key) matched
/// by `pattern` with the literal `replacement` — no capture-group
/// expansion, so user-supplied values may contain `$` freely.
///
/// The pattern is expected to match exactly once per document; zero or
/// multiple matches are reported rather than applied.
#[must_use]
pub fn rewrite_field(content: &str, pattern: &Regex, replacement: &str) -> PatchOutcome {
    match pattern.find_iter(content).count() {
        0 => PatchOutcome::NoMatchFound,
        1 => PatchOutcome::Patched(
            pattern
                .replace(content, regex::NoExpand(replacement))
                .into_owned(),
        ),
        n => PatchOutcome::AmbiguousMultipleMatches(n),
    }
}

/// Locate the closing brace matching the first `{` at or after
/// `search_start`, by depth counting.
///
/// Returns the byte offset of the brace that brings the depth back to
/// zero, or `content.len()` when the input is unbalanced or contains no
/// opening brace. Never panics, never loops forever.
#[must_use]
pub fn find_matching_closing_brace(content: &str, search_start: usize) -> usize {
    let bytes = content.as_bytes();
    let mut i = search_start.min(bytes.len());

    while i < bytes.len() && bytes[i] != b'{' {
        i += 1;
    }

    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }

    content.len()
}

/// Insert `text` immediately before `offset`.
///
/// Offsets past the end append; offsets landing inside a multi-byte
/// character are floored to the previous boundary rather than panicking.
#[must_use]
pub fn insert_before_offset(content: &str, offset: usize, text: &str) -> String {
    let mut at = offset.min(content.len());
    while !content.is_char_boundary(at) {
        at -= 1;
    }

    let mut out = String::with_capacity(content.len() + text.len());
    out.push_str(&content[..at]);
    out.push_str(text);
    out.push_str(&content[at..]);
    out
}

/// Find the insertion point for a new Java `import` statement: one past
/// the semicolon of the last existing import, falling back to one past the
/// `package` declaration's semicolon.
///
/// Returns `None` when the source has neither.
#[must_use]
pub fn locate_last_import_end(content: &str) -> Option<usize> {
    let mut last_import = None;
    let mut package_end = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(semi) = trimmed.find(';') {
            let end = offset + indent + semi + 1;
            if trimmed.starts_with("import ") {
                last_import = Some(end);
            } else if trimmed.starts_with("package ") {
                package_end = Some(end);
            }
        }
        offset += line.len();
    }

    last_import.or(package_end)
}
