//! yass: yet another static site
//!
//! Converts a tree of Markdown documents into HTML pages, an archive index
//! page and an RSS or Atom feed. Markdown conversion is delegated to a
//! [`render::Renderer`], normally `pandoc`.

pub mod cli;
pub mod config;
pub mod content;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod render;

use anyhow::Result;

pub use generator::BuildReport;

/// The main application
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
}

impl Site {
    /// Create a new site from a resolved configuration
    pub fn new(config: config::SiteConfig) -> Self {
        Self { config }
    }

    /// Generate pages, the feed and the archive with the given renderer
    pub fn generate(&self, renderer: &dyn render::Renderer) -> Result<BuildReport> {
        generator::Generator::new(&self.config, renderer).generate()
    }
}
