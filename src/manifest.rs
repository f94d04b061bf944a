//! Ordered document-set resolution.
//!
//! Stage 1 of the sync pipeline. Decides which markdown files a run
//! processes and in what order, from one of two sources:
//!
//! - **Manifest mode**: an `order.yml` at the source root lists files and
//!   their navigation titles explicitly. Downstream stages preserve this
//!   order.
//! - **Discovery mode**: no usable `order.yml` — every `*.md` under the
//!   source root is picked up recursively and navigation is sorted by
//!   title later.
//!
//! ## Ordering Manifest Format
//!
//! `order.yml` is a YAML sequence of single-key mappings, with `#` comment
//! lines stripped before parsing:
//!
//! ```yaml
//! - getting-started.md: Getting Started
//! - qcow2/qcow2-format.md: The Qcow2 Format
//! # - drafts.md: commented entries are skipped
//! ```
//!
//! The root `index.md` is never listed — it is always placed first when it
//! exists, and an explicit entry for it is ignored.
//!
//! ## Failure Posture
//!
//! Data problems degrade, they never abort: a manifest that is not a
//! sequence falls back to discovery with a warning, a malformed entry is
//! skipped with a warning, and an entry naming a file that does not exist
//! is dropped with a warning. Only I/O failures on files that exist are
//! errors.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

/// Ordering manifest filename, looked up at the source root.
pub const ORDER_FILE: &str = "order.yml";

/// Optional component metadata filename, looked up at the source root.
pub const COMPONENT_FILE: &str = "component.yml";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document selected for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    /// Forward-slash path relative to the source root; may include
    /// subdirectories (`qcow2/qcow2-format.md`).
    pub rel_path: String,
    /// Title from the ordering manifest. `None` until the sync stage
    /// derives one from content.
    pub title: Option<String>,
}

/// Outcome of document-set resolution.
#[derive(Debug)]
pub struct Resolution {
    /// Documents to process, in processing order.
    pub entries: Vec<DocEntry>,
    /// True when `order.yml` drove the selection — downstream consumers
    /// keep this order instead of sorting by title.
    pub ordered: bool,
    /// Display-name override from `component.yml`.
    pub display_name: Option<String>,
    /// Recoverable problems encountered while resolving.
    pub warnings: Vec<String>,
}

/// Resolve the ordered document set for a source tree.
///
/// Pure read — no side effects. The caller is responsible for having
/// validated that `source_root` exists and is a directory.
pub fn resolve(source_root: &Path) -> Result<Resolution, ManifestError> {
    let mut warnings = Vec::new();

    let listed = parse_order_file(&source_root.join(ORDER_FILE), &mut warnings)?;
    let display_name = read_display_name(&source_root.join(COMPONENT_FILE), &mut warnings);

    let ordered = listed.is_some();
    let entries = match listed {
        Some(pairs) => ordered_entries(source_root, pairs, &mut warnings),
        None => discover_entries(source_root),
    };

    Ok(Resolution {
        entries,
        ordered,
        display_name,
        warnings,
    })
}

/// Parse `order.yml` into `(filename, title)` pairs.
///
/// Returns `None` (discovery mode) when the file is absent, fails to parse,
/// or is not a sequence. Items that are not single-key string mappings are
/// skipped individually with a warning.
fn parse_order_file(
    path: &Path,
    warnings: &mut Vec<String>,
) -> Result<Option<Vec<(String, String)>>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;

    // Comment lines are stripped before parsing so entries can be toggled
    // off without being valid YAML.
    let filtered: String = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    let parsed: serde_yaml::Value = match serde_yaml::from_str(&filtered) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(format!("failed to parse {ORDER_FILE}: {err}"));
            return Ok(None);
        }
    };
    let serde_yaml::Value::Sequence(items) = parsed else {
        warnings.push(format!("{ORDER_FILE} is not a list, ignoring"));
        return Ok(None);
    };

    let mut pairs = Vec::with_capacity(items.len());
    for item in items {
        match single_key_entry(&item) {
            Some(pair) => pairs.push(pair),
            None => warnings.push(format!("invalid {ORDER_FILE} entry: {item:?}")),
        }
    }
    Ok(Some(pairs))
}

/// A valid manifest entry is a mapping with exactly one string key and one
/// string value.
fn single_key_entry(item: &serde_yaml::Value) -> Option<(String, String)> {
    let map = item.as_mapping()?;
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    Some((key.as_str()?.to_string(), value.as_str()?.to_string()))
}

/// Assemble the processing order for a manifest-driven run.
///
/// A root `index.md` always leads when it exists, then manifest entries
/// follow verbatim. Entries naming files absent from the source tree are
/// dropped with a warning rather than failing the run.
fn ordered_entries(
    source_root: &Path,
    listed: Vec<(String, String)>,
    warnings: &mut Vec<String>,
) -> Vec<DocEntry> {
    let mut entries = Vec::with_capacity(listed.len() + 1);

    if source_root.join("index.md").is_file() {
        entries.push(DocEntry {
            rel_path: "index.md".to_string(),
            title: None,
        });
    }

    for (filename, title) in listed {
        if filename == "index.md" {
            continue; // already placed first
        }
        if !source_root.join(&filename).is_file() {
            warnings.push(format!("file not found, skipping: {filename}"));
            continue;
        }
        entries.push(DocEntry {
            rel_path: filename,
            title: Some(title),
        });
    }
    entries
}

/// Discover every markdown file under the source root.
///
/// Order is whatever the directory walk yields — discovery runs sort by
/// title downstream, so no ordering is promised here. Titles are derived
/// from content later.
fn discover_entries(source_root: &Path) -> Vec<DocEntry> {
    WalkDir::new(source_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(source_root)
                .ok()
                .map(|rel| rel.to_string_lossy().to_string())
        })
        .map(|rel_path| DocEntry {
            rel_path,
            title: None,
        })
        .collect()
}

/// Fields read from `component.yml`. Unknown keys are ignored — the file
/// belongs to the component, not to this tool.
#[derive(Deserialize)]
struct ComponentMeta {
    title: Option<String>,
}

/// Read the navigation display-name override from `component.yml`.
///
/// Absence is silent. A file that cannot be read or parsed warns and falls
/// back to the derived name. Only a non-empty `title` counts.
fn read_display_name(path: &Path, warnings: &mut Vec<String>) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warnings.push(format!("failed to read {COMPONENT_FILE}: {err}"));
            return None;
        }
    };
    match serde_yaml::from_str::<ComponentMeta>(&content) {
        Ok(meta) => meta.title.filter(|title| !title.trim().is_empty()),
        Err(err) => {
            warnings.push(format!("failed to parse {COMPONENT_FILE}: {err}"));
            None
        }
    }
}
