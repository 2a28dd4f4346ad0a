//! Configuration module

mod site;

pub use site::Author;
pub use site::FeedConfig;
pub use site::FeedKind;
pub use site::SiteConfig;
pub use site::StyleConfig;
pub use site::{DEFAULT_FEED_PATH, INDEX_FILE};
