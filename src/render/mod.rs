//! Content Renderer
//!
//! Section body to structured blocks: headings, bullets, paragraphs and
//! `**bold**` spans. Malformed markup degrades to paragraph text.

pub mod block;
pub mod html;
pub mod inline;

pub use block::{Block, Element, classify_line, layout_body, render_body};
pub use html::{block_to_html, elements_to_html};
pub use inline::{Inline, Span, escape_html};
