//! Front-matter parsing

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Opening delimiter line
const OPEN: &str = "---";

/// Lines that close the block. YAML allows either the document end marker
/// or a second directives-end marker.
const CLOSE: [&str; 2] = ["...", "---"];

/// Stringify a YAML scalar; anything else is `None`
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Accept any scalar where a string is expected
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Custom deserializer that handles both a single scalar and a list of scalars
fn scalar_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Sequence(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Front-matter data from a document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    pub date: Option<Value>,
    #[serde(deserialize_with = "scalar_or_vec")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub subtitle: Option<String>,
    #[serde(rename = "abstract", deserialize_with = "scalar_string")]
    pub abstract_text: Option<String>,
}

impl FrontMatter {
    /// Read a document and parse its front-matter block
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Malformed front-matter in {:?}", path))
    }

    /// Parse front-matter from content string.
    ///
    /// Content without a leading `---` line yields an empty front-matter.
    pub fn parse(content: &str) -> Result<Self> {
        match extract_block(content) {
            Some(yaml) if !yaml.trim().is_empty() => {
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                Ok(fm)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Whether no field was set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Entry summary: `abstract` wins over `subtitle`
    pub fn summary(&self) -> Option<&str> {
        self.abstract_text
            .as_deref()
            .or(self.subtitle.as_deref())
    }

    /// Publication date from the `date` field.
    ///
    /// Only the calendar date is kept; values that do not start with
    /// `YYYY-MM-DD` are ignored.
    pub fn published(&self) -> Option<NaiveDate> {
        let raw = self.date.clone().and_then(scalar_to_string)?;
        let date = parse_ymd(&raw);
        if date.is_none() {
            tracing::debug!("Ignoring unrecognized date {:?}", raw);
        }
        date
    }
}

/// Parse `YYYY-MM-DD`, optionally followed by a time part
fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    // Datetime forms: "2024-01-15 10:30:00", "2024-01-15T10:30:00Z", ...
    let (head, tail) = s.split_at(s.find(['T', 't', ' '])?);
    if tail.trim().is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Locate the YAML block at the very start of a document.
///
/// The first line must be exactly `---`; the block runs until the next
/// `...` or `---` line, or to the end of the text when unterminated.
pub fn extract_block(content: &str) -> Option<&str> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end_matches(['\n', '\r']) != OPEN || !first.ends_with('\n') {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if CLOSE.contains(&line.trim_end_matches(['\n', '\r'])) {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    Some(&content[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
keywords:
  - rust
  - pandoc
subtitle: A greeting
...

This is the content.
"#;

        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.keywords, vec!["rust", "pandoc"]);
        assert_eq!(fm.summary(), Some("A greeting"));
        assert_eq!(fm.published(), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_no_frontmatter_is_empty() {
        for content in [
            "# Just a heading\n",
            "",
            "\n---\ntitle: late\n---\n",
            "--- \ntitle: trailing space\n---\n",
            "----\ntitle: four dashes\n---\n",
        ] {
            let fm = FrontMatter::parse(content).unwrap();
            assert!(fm.is_empty(), "expected empty front-matter for {:?}", content);
        }
    }

    #[test]
    fn test_dash_terminator() {
        let content = "---\ntitle: Custom\n---\n\nBody\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Custom"));
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let block = extract_block("---\ntitle: Open\n").unwrap();
        assert_eq!(block, "title: Open\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n...\r\nBody\r\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
    }

    #[test]
    fn test_abstract_wins_over_subtitle() {
        let content = "---\nabstract: A\nsubtitle: B\n---\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.summary(), Some("A"));

        let content = "---\nsubtitle: B\nabstract: A\n---\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.summary(), Some("A"));
    }

    #[test]
    fn test_scalar_fields_are_stringified() {
        let content = "---\ntitle: 1984\nkeywords: notes\n---\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("1984"));
        assert_eq!(fm.keywords, vec!["notes"]);
    }

    #[test]
    fn test_date_shapes() {
        let fm = |date: &str| FrontMatter::parse(&format!("---\ndate: {}\n---\n", date)).unwrap();

        let expected = NaiveDate::from_ymd_opt(2023, 6, 1);
        assert_eq!(fm("2023-06-01").published(), expected);
        assert_eq!(fm("2023-06-01 10:30:00").published(), expected);
        assert_eq!(fm("2023-06-01T10:30:00Z").published(), expected);
        assert_eq!(fm("June 2023").published(), None);
        assert_eq!(fm("2023-13-01").published(), None);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let content = "---\nauthor: someone\ntitle: Known\n---\n";
        let fm = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Known"));

        let fm = FrontMatter::parse("---\nauthor: someone\n---\n").unwrap();
        assert!(fm.is_empty());
    }
}
