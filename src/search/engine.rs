//! Search Engine
//!
//! A filter, not a ranked search: a section is either in or out, and results
//! keep section order. There is no scoring.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::parser::Section;
use crate::render::escape_html;

/// Counts `- **Error**:` anywhere plus every bold-led bullet at line start
static ERROR_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)- \*\*Error\*\*:|^- \*\*").expect("error-line pattern is valid")
});

/// Number of body lines considered for a summary
pub const SUMMARY_LINES: usize = 5;
/// Hard character cut applied to a summary
pub const SUMMARY_CHARS: usize = 100;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// One section surfaced by a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Ordinal of the originating section
    pub section_index: usize,
    pub label: String,
    /// First matching line, escaped, with `<mark>` around each occurrence
    pub snippet: String,
    pub summary: String,
    pub error_count: usize,
    /// False for the listing produced by a blank query
    pub matched: bool,
}

impl SearchResult {
    pub fn slug(&self) -> String {
        format!("app{}", self.section_index)
    }
}

/// Trim and lowercase a raw query
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Filter sections by a case-insensitive substring query
///
/// A blank query lists every section unmatched, with summaries only.
pub fn search(query: &str, sections: &[Section]) -> Vec<SearchResult> {
    let needle = normalize_query(query);

    if needle.is_empty() {
        return sections
            .iter()
            .map(|section| result_for(section, String::new(), false))
            .collect();
    }

    let matcher = query_regex(&needle);

    sections
        .iter()
        .filter(|section| section.body.to_lowercase().contains(&needle))
        .map(|section| {
            let snippet = snippet(&section.body, &needle, matcher.as_ref());
            result_for(section, snippet, true)
        })
        .collect()
}

fn result_for(section: &Section, snippet: String, matched: bool) -> SearchResult {
    SearchResult {
        section_index: section.ordinal,
        label: section.name.clone(),
        snippet,
        summary: summarize(&section.body),
        error_count: error_count(&section.body),
        matched,
    }
}

/// Build the case-insensitive literal matcher for a query
fn query_regex(needle: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Cannot build highlight pattern for {:?}: {}", needle, e);
            None
        }
    }
}

/// First body line containing the needle, trimmed and highlighted
///
/// Empty when no single line contains it.
pub fn snippet(body: &str, needle: &str, matcher: Option<&Regex>) -> String {
    body.lines()
        .find(|line| line.to_lowercase().contains(needle))
        .map(|line| {
            let line = line.trim();
            let ranges = matcher.map(|re| find_occurrences(line, re)).unwrap_or_default();
            highlight(line, &ranges)
        })
        .unwrap_or_default()
}

/// Byte ranges of every non-overlapping match in `line`
pub fn find_occurrences(line: &str, matcher: &Regex) -> Vec<Range<usize>> {
    matcher.find_iter(line).map(|m| m.range()).collect()
}

/// Escape `line` and wrap each range in highlight markers
///
/// Ranges must be sorted, non-overlapping and on char boundaries, as
/// produced by [`find_occurrences`].
pub fn highlight(line: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(line.len() + ranges.len() * 13);
    let mut last = 0;

    for range in ranges {
        out.push_str(&escape_html(&line[last..range.start]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(&line[range.clone()]));
        out.push_str(MARK_CLOSE);
        last = range.end;
    }
    out.push_str(&escape_html(&line[last..]));

    out
}

/// First non-blank, non-heading lines joined by spaces, cut to a fixed length
pub fn summarize(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(SUMMARY_LINES)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SUMMARY_CHARS)
        .collect()
}

/// Badge count for a raw section body
pub fn error_count(body: &str) -> usize {
    ERROR_LINE_RE.find_iter(body).count()
}
