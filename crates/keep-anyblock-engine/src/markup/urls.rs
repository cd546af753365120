use regex::Regex;
use std::sync::OnceLock;

use crate::models::page::{Mark, MarkKind, Range};

/// A URL found in plain text, with UTF-16 offsets (end-exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub url: String,
    pub start: usize,
    pub end: usize,
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(r"https?://\S+").expect("Invalid URL regex"))
}

/// Scans `text` for `http://` / `https://` URLs.
///
/// Matches are greedy up to the next whitespace, non-overlapping, and
/// returned left to right.
pub fn extract_urls(text: &str) -> Vec<UrlMatch> {
    let mut matches = Vec::new();
    // Running UTF-16 position, so each byte span is only counted once.
    let mut byte_pos = 0;
    let mut utf16_pos = 0;

    for m in url_regex().find_iter(text) {
        let start = utf16_pos + utf16_len(&text[byte_pos..m.start()]);
        let end = start + utf16_len(m.as_str());
        matches.push(UrlMatch {
            url: m.as_str().to_string(),
            start,
            end,
        });
        byte_pos = m.end();
        utf16_pos = end;
    }

    matches
}

/// Link marks for every URL in `text`.
pub fn link_marks(text: &str) -> Vec<Mark> {
    extract_urls(text)
        .into_iter()
        .map(|m| Mark {
            range: Range::new(m.start, m.end),
            kind: MarkKind::Link,
            param: Some(m.url),
        })
        .collect()
}

pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
