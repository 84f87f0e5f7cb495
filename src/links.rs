//! Finding the path or URL a cursor points at inside a line of text.
//!
//! Candidates are tried in order: the first quoted substring on the line,
//! then a markdown link whose span contains the cursor, and finally the
//! whitespace-delimited word around the cursor.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// One pattern per quote character; the regex crate has no backreferences.
static QUOTED: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"'([^'\n]*)'").unwrap(),
        Regex::new(r#""([^"\n]*)""#).unwrap(),
        Regex::new(r"`([^`\n]*)`").unwrap(),
    ]
});

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?P<text>[^\]]+)\]\((?P<url>[^)]+)\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    pub text: String,
    pub url: String,
    /// Byte offset of the opening `[`.
    pub start: usize,
    /// Byte offset just past the closing `)`.
    pub end: usize,
}

/// Start offsets of every whitespace run in `line`.
pub fn find_whitespace_positions(line: &str) -> Vec<usize> {
    WHITESPACE.find_iter(line).map(|m| m.start()).collect()
}

/// Span of the contents of the leftmost quoted substring, quotes excluded.
pub fn find_quoted_substring(line: &str) -> Option<(usize, usize)> {
    QUOTED
        .iter()
        .filter_map(|re| re.captures(line))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some((whole.start(), inner.start(), inner.end()))
        })
        .min_by_key(|&(start, _, _)| start)
        .map(|(_, begin, end)| (begin, end))
}

pub fn find_markdown_links(line: &str) -> Vec<MarkdownLink> {
    MARKDOWN_LINK
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(MarkdownLink {
                text: caps.name("text")?.as_str().to_string(),
                url: caps.name("url")?.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Resolve the link target for a cursor at byte offset `cursor` in `line`.
pub fn link_target_at(line: &str, cursor: usize) -> Option<String> {
    let mut candidate = find_quoted_substring(line).map(|(begin, end)| &line[begin..end]);

    if let Some(link) = find_markdown_links(line)
        .into_iter()
        .find(|link| link.start <= cursor && cursor <= link.end)
    {
        return clean_target(&link.url);
    }

    if candidate.is_none() {
        candidate = Some(word_around(line, cursor));
    }

    candidate.and_then(clean_target)
}

/// Resolve the link target for explicitly selected text.
pub fn link_target_in_selection(selected: &str) -> Option<String> {
    clean_target(selected)
}

fn word_around(line: &str, cursor: usize) -> &str {
    let whitespace = find_whitespace_positions(line);
    if whitespace.is_empty() {
        return line;
    }

    let left = whitespace.iter().copied().filter(|&i| i <= cursor).max().unwrap_or(0);
    let right = whitespace.iter().copied().filter(|&i| i >= cursor).min().unwrap_or(line.len());
    line.get(left..right.max(left)).unwrap_or_default().trim_start()
}

// Markdown paths often carry URL-encoded spaces.
fn clean_target(raw: &str) -> Option<String> {
    let target = raw.trim().replace("%20", " ");
    if target.is_empty() { None } else { Some(target) }
}
