//! Shared helpers for building throwaway site fixtures in tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Write a page file at `root/rel/index.md`, creating parent directories.
/// Returns the path to the written file.
pub fn write_page(root: &Path, rel: &str, content: &str) -> PathBuf {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("index.md");
    fs::write(&path, content).unwrap();
    path
}
