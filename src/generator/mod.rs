//! Site generator - renders documents, the feed and the archive page

mod archive;

pub use archive::{archive_markdown, ArchiveItem};

use anyhow::{Context, Result};
use std::fmt;

use crate::config::SiteConfig;
use crate::content::{loader, Document, FrontMatter};
use crate::feed::{self, FeedEntry};
use crate::render::{PageSource, Renderer};

/// Outcome of one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents discovered
    pub documents: usize,
    /// Page passes run successfully
    pub rendered: usize,
    /// Page passes skipped because the output was up to date
    pub skipped: usize,
    /// Render passes that failed
    pub failed: usize,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents: {} rendered, {} skipped, {} failed",
            self.documents, self.rendered, self.skipped, self.failed
        )
    }
}

/// Static site generator
pub struct Generator<'a> {
    config: &'a SiteConfig,
    renderer: &'a dyn Renderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(config: &'a SiteConfig, renderer: &'a dyn Renderer) -> Self {
        Self { config, renderer }
    }

    /// Generate every page, the feed and the archive
    pub fn generate(&self) -> Result<BuildReport> {
        let start = std::time::Instant::now();
        let documents = loader::discover(&self.config.root)?;

        let mut report = BuildReport {
            documents: documents.len(),
            ..Default::default()
        };
        tracing::info!("Found {} documents in {:?}", documents.len(), self.config.root);

        let mut entries: Vec<FeedEntry> = documents
            .iter()
            .map(|doc| self.process_document(doc, &mut report))
            .collect();

        feed::sort_entries(&mut entries);

        feed::write_feed(&entries, &self.config.feed).with_context(|| {
            format!("Failed to generate feed {:?}", self.config.feed.path)
        })?;
        self.generate_archive(&entries)?;

        tracing::info!(
            "Generated in {:.2}s ({})",
            start.elapsed().as_secs_f64(),
            report
        );
        Ok(report)
    }

    /// Capture pass, entry, then the page pass for one document
    fn process_document(&self, doc: &Document, report: &mut BuildReport) -> FeedEntry {
        let fm = match FrontMatter::read(&doc.source) {
            Ok(fm) => fm,
            Err(e) => {
                tracing::warn!("{:#}; using empty front-matter", e);
                FrontMatter::default()
            }
        };
        tracing::debug!("Front-matter of {:?}: {:?}", doc.source, fm);

        let content = match self.renderer.render_fragment(&doc.source) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!("Failed to render {:?} for the feed: {}", doc.source, e);
                report.failed += 1;
                None
            }
        };

        let entry = FeedEntry::build(doc, &fm, &self.config.feed, content);
        tracing::info!("{}", entry.link);

        self.render_page(doc, report);
        entry
    }

    /// Page pass, skipped when the output is not older than the source
    fn render_page(&self, doc: &Document, report: &mut BuildReport) {
        let output = doc.output_path();

        if output == self.config.index_path() {
            tracing::warn!("{:?} will be overwritten by the archive page", output);
        }

        if !self.config.regenerate && doc.is_up_to_date() {
            tracing::info!("Skipping {:?} as it is newer", output);
            report.skipped += 1;
            return;
        }

        match self.renderer.render_page(PageSource::File(&doc.source), &output) {
            Ok(()) => report.rendered += 1,
            Err(e) => {
                tracing::warn!("Failed to render {:?}: {}", output, e);
                report.failed += 1;
            }
        }
    }

    /// Render the archive document into the root `index.html`
    fn generate_archive(&self, entries: &[FeedEntry]) -> Result<()> {
        let markdown = archive_markdown(entries, &self.config.feed.title);
        let output = self.config.index_path();

        self.renderer
            .render_page(PageSource::Markdown(&markdown), &output)
            .with_context(|| format!("Failed to generate archive {:?}", output))?;

        tracing::info!("Generated archive {:?}", output);
        Ok(())
    }
}
