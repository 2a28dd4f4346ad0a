//! Feed entry records

use chrono::{DateTime, Utc};

use crate::config::FeedConfig;
use crate::content::{Document, FrontMatter};
use crate::helpers;

/// One document as it appears in the feed and the archive
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// Entry id; the same as `link`
    pub id: String,
    pub link: String,
    pub title: String,

    /// Source modification time
    pub updated: DateTime<Utc>,

    /// From the front-matter `date`
    pub published: Option<DateTime<Utc>>,

    /// Capture-pass HTML
    pub content: Option<String>,

    /// From the front-matter `abstract`, else `subtitle`
    pub summary: Option<String>,

    /// From the front-matter `keywords`
    pub categories: Vec<String>,
}

impl FeedEntry {
    /// Combine a document, its front-matter and its rendered HTML
    pub fn build(
        doc: &Document,
        fm: &FrontMatter,
        feed: &FeedConfig,
        content: Option<String>,
    ) -> Self {
        let link = doc.uri(&feed.link);
        let title = fm.title.clone().unwrap_or_else(|| doc.default_title());

        Self {
            id: link.clone(),
            link,
            title,
            updated: doc.modified,
            published: fm.published().map(helpers::start_of_day),
            content,
            summary: fm.summary().map(str::to_string),
            categories: fm.keywords.clone(),
        }
    }
}

/// Order entries oldest first by update time; ties keep discovery order
pub fn sort_entries(entries: &mut [FeedEntry]) {
    entries.sort_by_key(|e| e.updated);
}
