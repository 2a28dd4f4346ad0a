//! Archive page generation
//!
//! The archive is a Markdown document listing every entry, newest first.
//! It is rendered like any other page into the site's `index.html`.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::feed::FeedEntry;
use crate::helpers;

/// The fields of an entry the archive shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveItem<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub summary: Option<&'a str>,
    pub published: Option<DateTime<Utc>>,
    pub updated: DateTime<Utc>,
    pub categories: &'a [String],
}

impl<'a> From<&'a FeedEntry> for ArchiveItem<'a> {
    fn from(entry: &'a FeedEntry) -> Self {
        Self {
            title: &entry.title,
            link: &entry.link,
            summary: entry.summary.as_deref(),
            published: entry.published,
            updated: entry.updated,
            categories: &entry.categories,
        }
    }
}

impl ArchiveItem<'_> {
    /// `2024-05-01 (last updated 2024-05-06)`, or just the update date when
    /// there is no publication date
    pub fn date_line(&self) -> String {
        match self.published {
            Some(published) => format!(
                "{} (last updated {})",
                helpers::format_ymd(&published),
                helpers::format_ymd(&self.updated)
            ),
            None => helpers::format_ymd(&self.updated),
        }
    }

    fn write_markdown(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "### [{}](<{}>)\n",
            escape_link_text(self.title),
            self.link
        );

        if let Some(summary) = self.summary {
            let _ = writeln!(out, "{}\n", summary);
        }

        out.push_str(&self.date_line());
        if self.categories.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "  \n*{}*", self.categories.join(", "));
        }
        out.push('\n');
    }
}

/// Build the archive document from entries sorted oldest first
pub fn archive_markdown(entries: &[FeedEntry], feed_title: &str) -> String {
    let mut doc = String::new();
    let _ = writeln!(
        doc,
        "---\ntitle: \"Archive | {}\"\n---\n",
        escape_yaml_string(feed_title)
    );

    for entry in entries.iter().rev() {
        ArchiveItem::from(entry).write_markdown(&mut doc);
    }

    doc
}

/// Escape a value for a double-quoted YAML scalar
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape brackets so a title cannot close the link text early
fn escape_link_text(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
