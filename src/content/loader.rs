//! Content loader - discovers Markdown documents under the search root

use anyhow::{bail, Result};
use std::path::Path;
use walkdir::WalkDir;

use super::Document;

/// Recursively find Markdown documents below `root`.
///
/// Directory entries are visited in file-name order so discovery order is
/// stable across runs.
pub fn discover(root: &Path) -> Result<Vec<Document>> {
    if !root.is_dir() {
        bail!("Search root {:?} is not a directory", root);
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_markdown_file(path) {
            match Document::new(root, path) {
                Ok(doc) => documents.push(doc),
                Err(e) => tracing::warn!("Failed to load document {:?}: {:#}", path, e),
            }
        }
    }

    Ok(documents)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
