//! Document Model
//!
//! Pure data: the ordered list of named sections folded from line tokens.

use serde::Serialize;

use crate::parser::lexer::LineToken;

/// Name given to text that appears before the first marker
pub const PREAMBLE_NAME: &str = "General";

/// A named chunk of the troubleshooting text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Text following the `# ` marker, trimmed
    pub name: String,
    /// Everything up to the next marker, verbatim
    pub body: String,
    /// Position in parse order; also the public identifier until the next edit
    pub ordinal: usize,
}

impl Section {
    /// Public identifier of the section (`app<ordinal>`)
    pub fn slug(&self) -> String {
        format!("app{}", self.ordinal)
    }
}

/// Fold scanned tokens into sections
///
/// A marker with an empty name is skipped entirely: the lines after it keep
/// flowing into whatever section (or preamble) was already open.
pub fn tokens_to_sections(tokens: &[LineToken<'_>]) -> Vec<Section> {
    let mut preamble = String::new();
    let mut sections: Vec<(String, String)> = Vec::new();

    for token in tokens {
        match *token {
            LineToken::Marker("") => {}
            LineToken::Marker(name) => sections.push((name.to_string(), String::new())),
            LineToken::Body(line) => match sections.last_mut() {
                Some((_, body)) => body.push_str(line),
                None => preamble.push_str(line),
            },
        }
    }

    let general = (!preamble.trim().is_empty()).then(|| (PREAMBLE_NAME.to_string(), preamble));

    general
        .into_iter()
        .chain(sections)
        .enumerate()
        .map(|(ordinal, (name, body))| Section {
            name,
            body,
            ordinal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LineToken;

    #[test]
    fn test_fold_preamble_and_sections() {
        let tokens = vec![
            LineToken::Body("intro\n"),
            LineToken::Marker("Router"),
            LineToken::Body("- reboot\n"),
        ];

        let sections = tokens_to_sections(&tokens);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "General");
        assert_eq!(sections[0].body, "intro\n");
        assert_eq!(sections[1].name, "Router");
        assert_eq!(sections[1].ordinal, 1);
    }

    #[test]
    fn test_blank_preamble_is_discarded() {
        let tokens = vec![
            LineToken::Body("\n"),
            LineToken::Body("   \n"),
            LineToken::Marker("Only"),
        ];

        let sections = tokens_to_sections(&tokens);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Only");
        assert_eq!(sections[0].ordinal, 0);
        assert_eq!(sections[0].body, "");
    }

    #[test]
    fn test_blank_marker_joins_bodies() {
        let tokens = vec![
            LineToken::Marker("A"),
            LineToken::Body("one\n"),
            LineToken::Marker(""),
            LineToken::Body("two\n"),
        ];

        let sections = tokens_to_sections(&tokens);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "one\ntwo\n");
    }

    #[test]
    fn test_slug() {
        let section = Section {
            name: "X".to_string(),
            body: String::new(),
            ordinal: 4,
        };
        assert_eq!(section.slug(), "app4");
    }
}
