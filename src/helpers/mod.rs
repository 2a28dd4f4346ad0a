//! Helper functions shared by the feed and archive generators

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
