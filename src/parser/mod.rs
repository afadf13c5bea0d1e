//! Store Parser
//!
//! Turns the flat troubleshooting text into ordered, named sections.
//! Scanning and folding are separate steps so the marker rules live in one place.

pub mod ast;
pub mod lexer;

pub use ast::{PREAMBLE_NAME, Section};
pub use lexer::{LineToken, scan_lines};

/// Parse the whole store text into sections
///
/// Never fails: anything that is not a marker line is body text.
pub fn parse_document(text: &str) -> Vec<Section> {
    let tokens = lexer::scan_lines(text);
    ast::tokens_to_sections(&tokens)
}
