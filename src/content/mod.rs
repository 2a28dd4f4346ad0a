//! Content module - source documents and their front-matter

mod document;
mod frontmatter;
pub mod loader;

pub use document::{modified_time, Document, OUTPUT_EXTENSION};
pub use frontmatter::{extract_block, FrontMatter};
