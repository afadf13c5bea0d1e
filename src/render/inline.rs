//! Inline text handling: entity escaping and `**bold**` spans.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

/// A run of inline text; the string is already HTML-escaped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Strong(String),
}

/// The inline content of one block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inline(pub Vec<Span>);

impl Inline {
    /// Escape raw text and resolve bold spans
    ///
    /// Escaping runs first; `*` is not a reserved character so the
    /// delimiters survive it. A lone `**` stays literal.
    pub fn parse(raw: &str) -> Self {
        let escaped = escape_html(raw);
        let mut spans = Vec::new();
        let mut last = 0;

        for caps in BOLD_RE.captures_iter(&escaped) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                spans.push(Span::Text(escaped[last..whole.start()].to_string()));
            }
            spans.push(Span::Strong(inner.as_str().to_string()));
            last = whole.end();
        }

        if last < escaped.len() {
            spans.push(Span::Text(escaped[last..].to_string()));
        }

        Inline(spans)
    }

    pub fn spans(&self) -> &[Span] {
        &self.0
    }

    /// Strong spans only, in order
    pub fn strong(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|span| match span {
            Span::Strong(text) => Some(text.as_str()),
            Span::Text(_) => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for span in &self.0 {
            match span {
                Span::Text(text) => out.push_str(text),
                Span::Strong(text) => {
                    out.push_str("<strong>");
                    out.push_str(text);
                    out.push_str("</strong>");
                }
            }
        }
        out
    }
}

/// Replace the HTML-reserved characters with entities
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
