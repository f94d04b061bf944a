//! Centralized display-name derivation.
//!
//! Component identifiers, subdirectory group keys, and filename stems all
//! become human-readable navigation labels through the same two rules:
//! separator expansion (`-` and `_` become spaces) followed by title-casing.
//!
//! ## Title Resolution
//!
//! Document titles are resolved in priority order:
//! - title supplied by the ordering manifest
//! - first level-1 heading (`# Title`) in the document text
//! - display label derived from the filename stem
//!
//! The first source lives with its caller; this module owns the derivation
//! rules and the heading scan.
//!
//! ```text
//! "kerbside"            → "Kerbside"        (component header)
//! "qcow2_internals"     → "Qcow2 Internals" (group header)
//! "getting-started"     → "Getting Started" (stem fallback)
//! ```

/// Title-case a string: the first letter of each whitespace-separated word
/// is uppercased, the rest lowercased. Spacing is preserved.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Derive a display label from an identifier: dashes and underscores become
/// spaces, then each word is title-cased.
///
/// - `"qcow2-format"` → `"Qcow2 Format"`
/// - `"wire_protocol"` → `"Wire Protocol"`
/// - `"kerbside"` → `"Kerbside"`
pub fn display_title(identifier: &str) -> String {
    title_case(&identifier.replace(['-', '_'], " "))
}

/// Resolve a document title from its markdown text.
///
/// Scans for the first level-1 heading (`# Title`); when none exists, falls
/// back to the display label of the filename stem.
pub fn doc_title(content: &str, fallback_stem: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| display_title(fallback_stem))
}
