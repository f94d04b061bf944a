//! Pipeline orchestration.
//!
//! Runs a full sync: validate the source tree, resolve the document set,
//! destructively replace the destination, rewrite and write each document,
//! and settle the license file. Produces a [`SyncReport`] that the
//! [`output`](crate::output) module formats and that drives navigation
//! synthesis.
//!
//! ## Destination Contract
//!
//! The destination tree is deleted and rebuilt on every run. Incremental
//! patching would leave stale files behind after an upstream rename or
//! deletion; full replacement makes re-runs over unchanged input
//! byte-identical.
//!
//! ## License Handling
//!
//! A component repository may carry its own `LICENSE` next to the docs
//! tree. It is copied into the destination only when it differs from the
//! parent site's license (found by walking upward from the destination,
//! bounded depth) — an identical license would be noise.

use crate::links;
use crate::manifest::{self, DocEntry, ManifestError, Resolution};
use crate::naming;
use crate::nav::NavDoc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LICENSE_FILE: &str = "LICENSE";

/// Upper bound on the upward walk from the destination when looking for
/// the parent site's license.
const LICENSE_SEARCH_DEPTH: usize = 10;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source directory does not exist: {0}")]
    MissingSource(PathBuf),
    #[error("source is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// A document written to the destination.
#[derive(Debug)]
pub struct ProcessedDoc {
    pub rel_path: String,
    pub title: String,
}

/// What happened to the component license.
#[derive(Debug, PartialEq, Eq)]
pub enum LicenseOutcome {
    /// The component repository ships no `LICENSE` beside its docs tree.
    Absent,
    /// Byte-identical to the parent site's license — not copied.
    MatchesParent,
    /// Differs from the parent site's license — copied into the destination.
    Copied,
    /// No parent license found within the search depth; copied anyway.
    CopiedWithoutBaseline,
}

/// Result of a full sync run.
#[derive(Debug)]
pub struct SyncReport {
    pub component: String,
    /// Every document written, in processing order.
    pub processed: Vec<ProcessedDoc>,
    /// Non-index documents with resolved titles — the navigation input.
    pub nav_docs: Vec<NavDoc>,
    /// True when `order.yml` drove the run; navigation keeps this order.
    pub ordered: bool,
    /// Display-name override from `component.yml`.
    pub display_name: Option<String>,
    pub license: LicenseOutcome,
    /// Recoverable problems from resolution and license handling.
    pub warnings: Vec<String>,
}

/// Run the full pipeline for one component.
pub fn sync(
    component_name: &str,
    source_root: &Path,
    dest_dir: &Path,
) -> Result<SyncReport, SyncError> {
    validate_source(source_root)?;
    let resolution = manifest::resolve(source_root)?;
    let mut warnings = resolution.warnings;

    replace_dest(dest_dir)?;

    let mut processed = Vec::with_capacity(resolution.entries.len());
    let mut nav_docs = Vec::new();
    for entry in &resolution.entries {
        let title = write_document(component_name, source_root, dest_dir, entry)?;
        if file_name(&entry.rel_path) != "index.md" {
            nav_docs.push(NavDoc {
                rel_path: entry.rel_path.clone(),
                title: title.clone(),
            });
        }
        processed.push(ProcessedDoc {
            rel_path: entry.rel_path.clone(),
            title,
        });
    }

    let license = copy_license_if_different(source_root, dest_dir, &mut warnings)?;

    Ok(SyncReport {
        component: component_name.to_string(),
        processed,
        nav_docs,
        ordered: resolution.ordered,
        display_name: resolution.display_name,
        license,
        warnings,
    })
}

/// Validate the source tree and resolve its document set without writing
/// anything. Backs the `check` subcommand.
pub fn check(source_root: &Path) -> Result<Resolution, SyncError> {
    validate_source(source_root)?;
    Ok(manifest::resolve(source_root)?)
}

/// A missing or non-directory source is a configuration error, not a
/// degraded run.
fn validate_source(source_root: &Path) -> Result<(), SyncError> {
    if !source_root.exists() {
        return Err(SyncError::MissingSource(source_root.to_path_buf()));
    }
    if !source_root.is_dir() {
        return Err(SyncError::NotADirectory(source_root.to_path_buf()));
    }
    Ok(())
}

/// Delete and recreate the destination tree. Creation is idempotent;
/// deleting first guarantees no stale file survives an upstream rename.
fn replace_dest(dest_dir: &Path) -> Result<(), SyncError> {
    if dest_dir.exists() {
        fs::remove_dir_all(dest_dir)?;
    }
    fs::create_dir_all(dest_dir)?;
    Ok(())
}

/// Read one document, rewrite its links, and write it under the
/// destination, creating parent directories as needed.
///
/// Returns the resolved title: the manifest title when supplied, else the
/// first `# ` heading of the original text, else the filename stem as a
/// display label.
fn write_document(
    component_name: &str,
    source_root: &Path,
    dest_dir: &Path,
    entry: &DocEntry,
) -> Result<String, SyncError> {
    let content = fs::read_to_string(source_root.join(&entry.rel_path))?;
    let rewritten = links::rewrite_links(&content, component_name, &entry.rel_path);

    let dest_file = dest_dir.join(&entry.rel_path);
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest_file, rewritten)?;

    let title = match entry.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => naming::doc_title(&content, stem(&entry.rel_path)),
    };
    Ok(title)
}

fn file_name(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map_or(rel_path, |(_, name)| name)
}

fn stem(rel_path: &str) -> &str {
    let name = file_name(rel_path);
    name.strip_suffix(".md").unwrap_or(name)
}

/// Settle the component license against the parent site's.
///
/// The component license is expected beside the docs tree (parent of the
/// source root). The parent site's is found by walking upward from the
/// destination. Identical licenses are not copied; a missing parent
/// baseline warns but still copies.
fn copy_license_if_different(
    source_root: &Path,
    dest_dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<LicenseOutcome, SyncError> {
    let component_license = source_root
        .parent()
        .map(|parent| parent.join(LICENSE_FILE))
        .filter(|path| path.is_file());
    let Some(component_license) = component_license else {
        return Ok(LicenseOutcome::Absent);
    };

    let Some(parent_license) = find_parent_license(dest_dir) else {
        warnings.push("could not find parent site LICENSE".to_string());
        fs::copy(&component_license, dest_dir.join(LICENSE_FILE))?;
        return Ok(LicenseOutcome::CopiedWithoutBaseline);
    };

    if files_identical(&component_license, &parent_license)? {
        return Ok(LicenseOutcome::MatchesParent);
    }
    fs::copy(&component_license, dest_dir.join(LICENSE_FILE))?;
    Ok(LicenseOutcome::Copied)
}

/// Walk upward from the destination looking for the parent site's license,
/// stopping at the filesystem root or the depth bound.
fn find_parent_license(dest_dir: &Path) -> Option<PathBuf> {
    let mut search = dest_dir;
    for _ in 0..LICENSE_SEARCH_DEPTH {
        search = search.parent()?;
        let candidate = search.join(LICENSE_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Byte-for-byte file comparison.
fn files_identical(a: &Path, b: &Path) -> Result<bool, SyncError> {
    Ok(fs::read(a)? == fs::read(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    /// Component docs under `<tmp>/component/docs`, destination under
    /// `<tmp>/site/docs/components/<name>` — the layout a real parent site
    /// uses, so license walking has somewhere to go.
    fn site_layout(files: &[(&str, &str)]) -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        for (rel, content) in files {
            write_file(tmp.path(), &format!("component/docs/{rel}"), content);
        }
        let source = tmp.path().join("component/docs");
        let dest = tmp.path().join("site/docs/components/comp");
        (tmp, source, dest)
    }

    #[test]
    fn writes_rewritten_documents() {
        let (_tmp, source, dest) = site_layout(&[
            ("index.md", "# Home\n\nSee [guide](guide.md)."),
            ("guide.md", "# Guide"),
        ]);
        sync("comp", &source, &dest).unwrap();

        let written = fs::read_to_string(dest.join("index.md")).unwrap();
        assert_eq!(written, "# Home\n\nSee [guide](/components/comp/guide/).");
    }

    #[test]
    fn recreates_subdirectory_structure() {
        let (_tmp, source, dest) =
            site_layout(&[("qcow2/format.md", "# Format\n[up](../index.md)")]);
        sync("comp", &source, &dest).unwrap();

        let written = fs::read_to_string(dest.join("qcow2/format.md")).unwrap();
        assert_eq!(written, "# Format\n[up](/components/comp/index/)");
    }

    #[test]
    fn index_excluded_from_nav_docs() {
        let (_tmp, source, dest) =
            site_layout(&[("index.md", "# Home"), ("guide.md", "# Guide")]);
        let report = sync("comp", &source, &dest).unwrap();

        assert_eq!(report.processed.len(), 2);
        assert_eq!(report.nav_docs.len(), 1);
        assert_eq!(report.nav_docs[0].rel_path, "guide.md");
    }

    #[test]
    fn nested_index_also_excluded_from_nav() {
        let (_tmp, source, dest) = site_layout(&[("sub/index.md", "# Sub Home")]);
        let report = sync("comp", &source, &dest).unwrap();

        assert!(report.nav_docs.is_empty());
        assert!(dest.join("sub/index.md").is_file());
    }

    #[test]
    fn title_priority_manifest_then_heading_then_stem() {
        let (_tmp, source, dest) = site_layout(&[
            ("a.md", "# Heading A"),
            ("b.md", "# Heading B"),
            ("plain-notes.md", "no heading"),
            (
                "order.yml",
                "- a.md: Manifest Title\n- b.md: \"\"\n- plain-notes.md: \"\"\n",
            ),
        ]);
        let report = sync("comp", &source, &dest).unwrap();

        let titles: Vec<&str> = report.nav_docs.iter().map(|d| d.title.as_str()).collect();
        // Manifest title wins; an empty manifest title falls back to the
        // heading, and no heading falls back to the stem.
        assert_eq!(titles, vec!["Manifest Title", "Heading B", "Plain Notes"]);
    }

    #[test]
    fn discovery_titles_from_heading_or_stem() {
        let (_tmp, source, dest) = site_layout(&[
            ("with-heading.md", "# From Heading"),
            ("plain-notes.md", "no heading"),
        ]);
        let report = sync("comp", &source, &dest).unwrap();

        let mut titles: Vec<&str> = report.nav_docs.iter().map(|d| d.title.as_str()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["From Heading", "Plain Notes"]);
    }

    #[test]
    fn stale_destination_files_removed() {
        let (tmp, source, dest) = site_layout(&[("a.md", "# A")]);
        write_file(tmp.path(), "site/docs/components/comp/stale.md", "old");

        sync("comp", &source, &dest).unwrap();

        assert!(!dest.join("stale.md").exists());
        assert!(dest.join("a.md").is_file());
    }

    #[test]
    fn ordered_flag_follows_manifest_presence() {
        let (_tmp, source, dest) =
            site_layout(&[("a.md", "# A"), ("order.yml", "- a.md: Alpha\n")]);
        let report = sync("comp", &source, &dest).unwrap();
        assert!(report.ordered);

        let (_tmp2, source2, dest2) = site_layout(&[("a.md", "# A")]);
        let report2 = sync("comp", &source2, &dest2).unwrap();
        assert!(!report2.ordered);
    }

    #[test]
    fn missing_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = sync("comp", &tmp.path().join("nope"), &tmp.path().join("dest"));
        assert!(matches!(result, Err(SyncError::MissingSource(_))));
    }

    #[test]
    fn file_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.md");
        fs::write(&file, "x").unwrap();
        let result = sync("comp", &file, &tmp.path().join("dest"));
        assert!(matches!(result, Err(SyncError::NotADirectory(_))));
    }

    #[test]
    fn resolution_warnings_carried_into_report() {
        let (_tmp, source, dest) = site_layout(&[
            ("a.md", "# A"),
            ("order.yml", "- a.md: Alpha\n- gone.md: Gone\n"),
        ]);
        let report = sync("comp", &source, &dest).unwrap();

        assert!(report.warnings.iter().any(|w| w.contains("gone.md")));
        assert!(dest.join("a.md").is_file());
    }

    // ── license handling ────────────────────────────────────────────────

    #[test]
    fn no_component_license() {
        let (_tmp, source, dest) = site_layout(&[("a.md", "# A")]);
        let report = sync("comp", &source, &dest).unwrap();
        assert_eq!(report.license, LicenseOutcome::Absent);
    }

    #[test]
    fn identical_license_not_copied() {
        let (tmp, source, dest) = site_layout(&[("a.md", "# A")]);
        write_file(tmp.path(), "component/LICENSE", "Apache 2.0 text");
        write_file(tmp.path(), "site/LICENSE", "Apache 2.0 text");

        let report = sync("comp", &source, &dest).unwrap();

        assert_eq!(report.license, LicenseOutcome::MatchesParent);
        assert!(!dest.join("LICENSE").exists());
    }

    #[test]
    fn differing_license_copied() {
        let (tmp, source, dest) = site_layout(&[("a.md", "# A")]);
        write_file(tmp.path(), "component/LICENSE", "MIT text");
        write_file(tmp.path(), "site/LICENSE", "Apache 2.0 text");

        let report = sync("comp", &source, &dest).unwrap();

        assert_eq!(report.license, LicenseOutcome::Copied);
        assert_eq!(fs::read_to_string(dest.join("LICENSE")).unwrap(), "MIT text");
    }

    #[test]
    fn license_copied_when_no_parent_baseline() {
        // No LICENSE anywhere above the destination inside the temp tree;
        // the walk is bounded, but a LICENSE further up the real
        // filesystem could still be found — tolerate both copy outcomes.
        let (tmp, source, dest) = site_layout(&[("a.md", "# A")]);
        write_file(tmp.path(), "component/LICENSE", "MIT text");

        let report = sync("comp", &source, &dest).unwrap();

        assert!(matches!(
            report.license,
            LicenseOutcome::Copied | LicenseOutcome::CopiedWithoutBaseline
        ));
        assert!(dest.join("LICENSE").is_file());
    }
}
