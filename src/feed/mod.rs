//! Feed generation
//!
//! Entries are serialized with the `rss` and `atom_syndication` crates.

mod atom;
mod entry;
mod rss;

pub use entry::{sort_entries, FeedEntry};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{FeedConfig, FeedKind};

/// Generator tag written into feeds
pub const GENERATOR: &str = concat!("yass ", env!("CARGO_PKG_VERSION"));

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("RSS validation failed: {0}")]
    Validation(String),

    #[error("Failed to serialize RSS: {0}")]
    Rss(#[from] ::rss::Error),

    #[error("Failed to serialize Atom: {0}")]
    Atom(#[from] ::atom_syndication::Error),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Entries that go into the feed: newest first, capped at `max_entries`.
///
/// `entries` must already be sorted oldest first.
pub fn select_entries<'a>(entries: &'a [FeedEntry], feed: &FeedConfig) -> Vec<&'a FeedEntry> {
    let newest_first = entries.iter().rev();
    match feed.max_entries {
        Some(max) => newest_first.take(max).collect(),
        None => newest_first.collect(),
    }
}

/// Serialize the feed to its configured path
pub fn write_feed(entries: &[FeedEntry], feed: &FeedConfig) -> Result<(), FeedError> {
    write_feed_to(entries, feed, &feed.path)
}

/// Serialize the feed to `path`
pub fn write_feed_to(
    entries: &[FeedEntry],
    feed: &FeedConfig,
    path: &Path,
) -> Result<(), FeedError> {
    let io_error = |source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let writer = BufWriter::new(File::create(path).map_err(io_error)?);

    let selected = select_entries(entries, feed);
    let mut writer = match feed.kind {
        FeedKind::Rss => rss::build(&selected, feed)?.write_to(writer)?,
        FeedKind::Atom => atom::build(&selected, feed).write_to(writer)?,
    };
    writer.flush().map_err(io_error)?;

    tracing::info!(
        "Generated {} feed {:?} with {} entries",
        feed.kind,
        path,
        selected.len()
    );
    Ok(())
}
