//! Shared test utilities for the docsync test suite.
//!
//! Tests build their source trees inline from `(relative path, content)`
//! pairs — each test gets an isolated temp directory it can mutate freely.

use std::path::Path;
use tempfile::TempDir;

/// Create a temp directory populated from `(relative path, content)` pairs.
pub fn source_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in files {
        write_file(tmp.path(), rel, content);
    }
    tmp
}

/// Write a file under `root`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
