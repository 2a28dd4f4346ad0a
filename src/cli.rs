//! Command-line arguments
//!
//! Any `@path` token before `--` is replaced by the lines of `path`, one
//! argument per line. Everything after `--` is forwarded to the renderer.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::config::{Author, FeedConfig, FeedKind, SiteConfig, StyleConfig, DEFAULT_FEED_PATH};

/// Nesting limit for argument files
const MAX_ARG_FILE_DEPTH: usize = 16;

#[derive(Debug, Parser)]
#[command(name = "yass")]
#[command(version)]
#[command(about = "Yet another static site: Markdown to HTML pages, an archive and a feed", long_about = None)]
#[command(
    after_help = "Arguments may be stored in a file, one per line, and loaded with: yass @args.txt\n\
                  Extra arguments are passed to the renderer after a separator: yass <args> -- <pandoc args>"
)]
pub struct Args {
    /// Where to write the feed
    #[arg(long, default_value = DEFAULT_FEED_PATH)]
    pub feed_path: PathBuf,

    /// Feed format
    #[arg(long, value_enum, ignore_case = true, default_value_t = FeedKind::Atom)]
    pub feed_type: FeedKind,

    /// Feed description
    #[arg(long, visible_alias = "feed-subtitle")]
    pub feed_description: String,

    /// Absolute base URL of the site; document paths are appended to it
    #[arg(long, value_parser = absolute_url)]
    pub feed_link: String,

    #[arg(long)]
    pub feed_title: String,

    /// Absolute URL of a feed logo image
    #[arg(long, value_parser = absolute_url)]
    pub feed_logo: Option<String>,

    #[arg(long)]
    pub feed_author_name: String,

    #[arg(long)]
    pub feed_author_email: String,

    /// Maximum number of feed entries, newest first; negative means all
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub feed_entries_count: i64,

    /// Ignore all existing output
    #[arg(long)]
    pub regenerate: bool,

    /// Directory to search and convert
    #[arg(long, default_value = ".")]
    pub path_root: PathBuf,

    /// URL to a CSS file to include
    #[arg(short, long)]
    pub css: Option<String>,

    /// Path to a pandoc template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Path to an HTML fragment to include in the <head>
    #[arg(short = 'H', long)]
    pub include_in_header: Option<PathBuf>,

    /// Path to an HTML fragment to include at the start of the <body>
    #[arg(short = 'B', long)]
    pub include_before_body: Option<PathBuf>,

    /// Path to an HTML fragment to include at the end of the <body>
    #[arg(short = 'A', long)]
    pub include_after_body: Option<PathBuf>,

    /// Conversion program
    #[arg(long, default_value = "pandoc")]
    pub pandoc: String,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Extra arguments for the renderer
    #[arg(last = true)]
    pub renderer_args: Vec<String>,
}

/// Both feed formats need absolute URLs
fn absolute_url(value: &str) -> Result<String, url::ParseError> {
    Url::parse(value).map(|_| value.to_string())
}

impl Args {
    /// Parse arguments after expanding `@file` references
    pub fn parse_expanded<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = expand_arg_files(args.into_iter().map(Into::into).collect())?;
        Ok(Self::parse_from(args))
    }

    /// Resolve into the immutable site configuration
    pub fn into_config(self) -> SiteConfig {
        SiteConfig {
            feed: FeedConfig {
                path: self.feed_path,
                kind: self.feed_type,
                title: self.feed_title,
                description: self.feed_description,
                link: self.feed_link,
                logo: self.feed_logo,
                author: Author {
                    name: self.feed_author_name,
                    email: self.feed_author_email,
                },
                max_entries: usize::try_from(self.feed_entries_count).ok(),
            },
            root: self.path_root,
            style: StyleConfig {
                css: self.css,
                template: self.template,
                include_in_header: self.include_in_header,
                include_before_body: self.include_before_body,
                include_after_body: self.include_after_body,
            },
            regenerate: self.regenerate,
            renderer_program: self.pandoc,
            renderer_args: self.renderer_args,
        }
    }
}

/// Replace `@path` tokens with the lines of `path`, recursively.
///
/// The program name and everything from `--` onwards are left untouched.
pub fn expand_arg_files(args: Vec<OsString>) -> Result<Vec<OsString>> {
    let mut args = args.into_iter();
    let mut expanded: Vec<OsString> = args.next().into_iter().collect();
    let mut options = Vec::new();
    let mut passthrough = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            passthrough.push(arg);
            passthrough.extend(args.by_ref());
            break;
        }
        options.push(arg);
    }

    expand_into(options, &mut expanded, 0)?;
    expanded.extend(passthrough);
    Ok(expanded)
}

fn expand_into(args: Vec<OsString>, out: &mut Vec<OsString>, depth: usize) -> Result<()> {
    for arg in args {
        let path = arg.to_str().and_then(|s| s.strip_prefix('@'));
        match path {
            Some(path) if !path.is_empty() => {
                if depth >= MAX_ARG_FILE_DEPTH {
                    bail!("Argument files nested too deeply at {:?}", path);
                }
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read argument file {:?}", path))?;
                let lines = content
                    .lines()
                    .map(|l| l.trim_end_matches('\r'))
                    .filter(|l| !l.is_empty())
                    .map(OsString::from)
                    .collect();
                expand_into(lines, out, depth + 1)?;
            }
            _ => out.push(arg),
        }
    }
    Ok(())
}
