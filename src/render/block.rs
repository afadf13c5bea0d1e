//! Block classification for section bodies.

use serde::Serialize;

use crate::render::inline::Inline;

/// One rendered structural unit of a section body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spans", rename_all = "snake_case")]
pub enum Block {
    /// `## ` line
    Heading3(Inline),
    /// `### ` line
    Heading4(Inline),
    /// `- ` line
    BulletItem(Inline),
    /// Any other non-blank line
    Paragraph(Inline),
}

impl Block {
    pub fn inline(&self) -> &Inline {
        match self {
            Block::Heading3(inline)
            | Block::Heading4(inline)
            | Block::BulletItem(inline)
            | Block::Paragraph(inline) => inline,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Block::BulletItem(_))
    }
}

/// Layout element: a block, or a run of adjacent bullets forming one list
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Block(Block),
    List(Vec<Inline>),
}

/// Classify a single line; blank lines yield `None`
///
/// Checks run on the trimmed line, most specific prefix first.
pub fn classify_line(line: &str) -> Option<Block> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("### ") {
        Some(Block::Heading4(Inline::parse(rest)))
    } else if let Some(rest) = trimmed.strip_prefix("## ") {
        Some(Block::Heading3(Inline::parse(rest)))
    } else if let Some(rest) = trimmed.strip_prefix("- ") {
        Some(Block::BulletItem(Inline::parse(rest)))
    } else if !trimmed.is_empty() {
        Some(Block::Paragraph(Inline::parse(trimmed)))
    } else {
        None
    }
}

/// Render a section body into its block sequence
pub fn render_body(body: &str) -> Vec<Block> {
    body.lines().filter_map(classify_line).collect()
}

/// Render a section body and group adjacent bullets into lists
///
/// A list stays open only across consecutive bullet lines; a blank line or
/// any other block closes it.
pub fn layout_body(body: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut open_list: Option<Vec<Inline>> = None;

    for line in body.lines() {
        match classify_line(line) {
            Some(Block::BulletItem(inline)) => open_list.get_or_insert_with(Vec::new).push(inline),
            other => {
                if let Some(items) = open_list.take() {
                    elements.push(Element::List(items));
                }
                if let Some(block) = other {
                    elements.push(Element::Block(block));
                }
            }
        }
    }

    if let Some(items) = open_list {
        elements.push(Element::List(items));
    }

    elements
}
