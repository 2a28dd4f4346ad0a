//! Document rendering
//!
//! Markdown to HTML conversion is delegated to a [`Renderer`]. Every
//! document goes through two passes:
//!
//! - the *capture pass* renders the body only and returns the HTML, which
//!   becomes the feed entry content;
//! - the *page pass* renders a complete styled page straight to disk.
//!
//! [`PandocRenderer`] implements both by running `pandoc`.

mod pandoc;

pub use pandoc::{PandocRenderer, SOURCE_FORMAT};

use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer `{program}` not found: {source}")]
    NotFound {
        program: String,
        source: which::Error,
    },

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` produced output that is not valid UTF-8")]
    InvalidOutput { program: String },
}

/// Input of a page pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource<'a> {
    /// A Markdown file on disk
    File(&'a Path),
    /// Markdown text generated in memory
    Markdown(&'a str),
}

/// Markdown to HTML conversion backend
pub trait Renderer {
    /// Capture pass: render the document body only and return the HTML
    fn render_fragment(&self, source: &Path) -> Result<String, RenderError>;

    /// Page pass: render a full page and write it to `output`
    fn render_page(&self, source: PageSource<'_>, output: &Path) -> Result<(), RenderError>;
}
