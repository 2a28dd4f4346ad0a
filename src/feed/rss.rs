//! RSS 2.0 serialization

use ::rss::validation::Validate;
use ::rss::{Channel, ChannelBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder};
use std::collections::BTreeMap;

use super::{FeedEntry, FeedError, GENERATOR};
use crate::config::FeedConfig;

/// `content:encoded` namespace
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Build and validate an RSS channel from entries in output order
pub(super) fn build(entries: &[&FeedEntry], feed: &FeedConfig) -> Result<Channel, FeedError> {
    let items: Vec<Item> = entries.iter().map(|e| entry_to_item(e)).collect();

    let namespaces = BTreeMap::from([("content".to_string(), CONTENT_NAMESPACE.to_string())]);

    let image = feed.logo.as_ref().map(|logo| {
        ImageBuilder::default()
            .url(logo.clone())
            .title(feed.title.clone())
            .link(feed.link.clone())
            .build()
    });

    let last_build_date = entries.iter().map(|e| e.updated).max().map(|d| d.to_rfc2822());

    let channel = ChannelBuilder::default()
        .namespaces(namespaces)
        .title(&feed.title)
        .link(&feed.link)
        .description(&feed.description)
        .managing_editor(feed.author.rss_contact())
        .generator(GENERATOR.to_string())
        .last_build_date(last_build_date)
        .image(image)
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;
    Ok(channel)
}

/// Convert a feed entry to an RSS item
fn entry_to_item(entry: &FeedEntry) -> Item {
    let categories = entry
        .categories
        .iter()
        .map(|c| ::rss::CategoryBuilder::default().name(c.clone()).build())
        .collect::<Vec<_>>();

    // RSS items carry a single date; fall back to the update time
    let pub_date = entry.published.unwrap_or(entry.updated).to_rfc2822();

    ItemBuilder::default()
        .title(entry.title.clone())
        .link(Some(entry.link.clone()))
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.id.clone())
                .build(),
        )
        .description(entry.summary.clone())
        .content(entry.content.clone())
        .pub_date(pub_date)
        .categories(categories)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Author, SiteConfig};
    use chrono::{TimeZone, Utc};

    fn feed() -> FeedConfig {
        SiteConfig::new(
            "Blog",
            "https://example.com/",
            Author {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            },
        )
        .feed
    }

    fn entry(published: Option<chrono::DateTime<Utc>>) -> FeedEntry {
        FeedEntry {
            id: "https://example.com/a.html".to_string(),
            link: "https://example.com/a.html".to_string(),
            title: "A".to_string(),
            updated: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
            published,
            content: None,
            summary: None,
            categories: vec!["notes".to_string()],
        }
    }

    #[test]
    fn test_item_dates() {
        let item = entry_to_item(&entry(None));
        assert_eq!(item.pub_date(), Some("Sat, 3 Feb 2024 04:05:06 +0000"));

        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let item = entry_to_item(&entry(Some(published)));
        assert_eq!(item.pub_date(), Some("Mon, 1 Jan 2024 00:00:00 +0000"));
        assert_eq!(item.guid().map(|g| g.value()), Some("https://example.com/a.html"));
        assert_eq!(item.categories()[0].name(), "notes");
    }

    #[test]
    fn test_channel_metadata() {
        let e = entry(None);
        let channel = build(&[&e], &feed()).unwrap();
        assert_eq!(channel.managing_editor(), Some("jane@example.com (Jane Doe)"));
        assert_eq!(channel.last_build_date(), Some("Sat, 3 Feb 2024 04:05:06 +0000"));
        assert!(channel.image().is_none());
        assert_eq!(
            channel.namespaces().get("content").map(String::as_str),
            Some(CONTENT_NAMESPACE)
        );
    }

    #[test]
    fn test_invalid_link_fails_validation() {
        let mut feed = feed();
        feed.link = "not a url".to_string();
        assert!(matches!(build(&[], &feed), Err(FeedError::Validation(_))));
    }

    #[test]
    fn test_logo_becomes_channel_image() {
        let mut feed = feed();
        feed.logo = Some("https://example.com/logo.png".to_string());

        let channel = build(&[], &feed).unwrap();
        let image = channel.image().unwrap();
        assert_eq!(image.url(), "https://example.com/logo.png");
        assert_eq!(image.title(), "Blog");
        assert_eq!(image.link(), "https://example.com/");
    }
}
