//! Resolved site configuration

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// Default feed output path
pub const DEFAULT_FEED_PATH: &str = "feed.xml";

/// Name of the generated archive page, relative to the search root
pub const INDEX_FILE: &str = "index.html";

/// Feed serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FeedKind {
    #[value(name = "RSS")]
    Rss,
    #[default]
    #[value(name = "Atom")]
    Atom,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Rss => f.write_str("RSS"),
            FeedKind::Atom => f.write_str("Atom"),
        }
    }
}

/// Feed author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    /// RSS `managingEditor` form: `email (Name)`
    pub fn rss_contact(&self) -> String {
        format!("{} ({})", self.email, self.name)
    }
}

/// Feed metadata and output settings
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub path: PathBuf,
    pub kind: FeedKind,
    pub title: String,
    pub description: String,
    /// Base link; document paths are joined onto it to form entry URIs
    pub link: String,
    pub logo: Option<String>,
    pub author: Author,
    /// Keep only the newest N entries; `None` keeps all of them
    pub max_entries: Option<usize>,
}

/// Page-pass styling options handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleConfig {
    pub css: Option<String>,
    pub template: Option<PathBuf>,
    pub include_in_header: Option<PathBuf>,
    pub include_before_body: Option<PathBuf>,
    pub include_after_body: Option<PathBuf>,
}

impl StyleConfig {
    /// Whether no styling option was given at all
    pub fn is_empty(&self) -> bool {
        self.css.is_none()
            && self.template.is_none()
            && self.include_in_header.is_none()
            && self.include_before_body.is_none()
            && self.include_after_body.is_none()
    }
}

/// Main site configuration, built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub feed: FeedConfig,

    /// Directory searched recursively for Markdown documents
    pub root: PathBuf,
    pub style: StyleConfig,

    /// Re-render every page even when its output is newer than the source
    pub regenerate: bool,

    /// Conversion program
    pub renderer_program: String,
    /// Extra flags forwarded verbatim to page passes
    pub renderer_args: Vec<String>,
}

impl SiteConfig {
    /// Minimal configuration with defaults for every optional setting
    pub fn new(feed_title: &str, feed_link: &str, author: Author) -> Self {
        Self {
            feed: FeedConfig {
                path: PathBuf::from(DEFAULT_FEED_PATH),
                kind: FeedKind::default(),
                title: feed_title.to_string(),
                description: feed_title.to_string(),
                link: feed_link.to_string(),
                logo: None,
                author,
                max_entries: None,
            },
            root: PathBuf::from("."),
            style: StyleConfig::default(),
            regenerate: false,
            renderer_program: "pandoc".to_string(),
            renderer_args: Vec::new(),
        }
    }

    /// Output path of the generated archive page
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }
}
