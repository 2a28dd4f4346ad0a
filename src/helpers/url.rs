//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Join encoded path segments onto a base link with exactly one `/` between
/// the base and the path
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/blog/", ["posts", "my post.html"])
///     // -> "https://example.com/blog/posts/my%20post.html"
/// ```
pub fn join_url<'a, I>(base: &str, segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let path = segments
        .into_iter()
        .filter(|s| !s.is_empty() && *s != ".")
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/");

    format!("{}/{}", base.trim_end_matches('/'), path)
}
