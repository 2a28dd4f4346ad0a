//! Atom serialization

use ::atom_syndication::{Category, Content, Entry, Feed, Generator, Link, Person, Text};
use chrono::Utc;

use super::{FeedEntry, GENERATOR};
use crate::config::FeedConfig;

/// Build an Atom feed from entries in output order
pub(super) fn build(entries: &[&FeedEntry], feed: &FeedConfig) -> Feed {
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or_else(Utc::now);

    let mut author = Person::default();
    author.set_name(feed.author.name.clone());
    author.set_email(feed.author.email.clone());

    let mut generator = Generator::default();
    generator.set_value(GENERATOR);

    let mut atom = Feed::default();
    atom.set_id(feed.link.clone());
    atom.set_title(Text::plain(feed.title.clone()));
    atom.set_subtitle(Text::plain(feed.description.clone()));
    atom.set_updated(updated.fixed_offset());
    atom.set_authors(vec![author]);
    atom.set_links(vec![alternate_link(&feed.link)]);
    atom.set_logo(feed.logo.clone());
    atom.set_generator(generator);
    atom.set_entries(entries.iter().map(|e| entry_to_atom(e)).collect::<Vec<_>>());
    atom
}

fn alternate_link(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("alternate");
    link
}

/// Convert a feed entry to an Atom entry
fn entry_to_atom(entry: &FeedEntry) -> Entry {
    let content = entry.content.as_ref().map(|html| {
        let mut content = Content::default();
        content.set_value(html.clone());
        content.set_content_type("html".to_string());
        content
    });

    let categories = entry
        .categories
        .iter()
        .map(|term| {
            let mut category = Category::default();
            category.set_term(term.clone());
            category.set_label(term.clone());
            category
        })
        .collect::<Vec<_>>();

    let mut atom = Entry::default();
    atom.set_id(entry.id.clone());
    atom.set_title(Text::plain(entry.title.clone()));
    atom.set_updated(entry.updated.fixed_offset());
    atom.set_published(entry.published.map(|d| d.fixed_offset()));
    atom.set_links(vec![alternate_link(&entry.link)]);
    atom.set_summary(entry.summary.clone().map(Text::plain));
    atom.set_content(content);
    atom.set_categories(categories);
    atom
}
