//! Line Scanner
//!
//! Single pass over the store text, classifying every line as either a
//! section marker or a body line. No backtracking, no allocation beyond the
//! token vector: tokens borrow from the input.

/// Prefix that opens a new section when found at the very start of a line
pub const MARKER_PREFIX: &str = "# ";

/// A classified line of the store text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineToken<'a> {
    /// `# <name>` at column zero; carries the trimmed name, which may be empty
    Marker(&'a str),
    /// Any other line, verbatim including its line terminator
    Body(&'a str),
}

/// Scan text into marker and body tokens
///
/// Body tokens keep their `\n` (or `\r\n`) so that folding them back
/// together reproduces the section text exactly.
pub fn scan_lines(text: &str) -> Vec<LineToken<'_>> {
    text.split_inclusive('\n').map(classify_line).collect()
}

/// Classify one line (terminator included)
fn classify_line(line: &str) -> LineToken<'_> {
    let content = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);

    match content.strip_prefix(MARKER_PREFIX) {
        Some(name) => LineToken::Marker(name.trim()),
        None => LineToken::Body(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_marker_and_body() {
        let tokens = scan_lines("# Printer\n- jam\n");

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], LineToken::Marker("Printer"));
        assert_eq!(tokens[1], LineToken::Body("- jam\n"));
    }

    #[test]
    fn test_marker_name_is_trimmed() {
        let tokens = scan_lines("#   Wi-Fi   \r\n");
        assert_eq!(tokens, vec![LineToken::Marker("Wi-Fi")]);
    }

    #[test]
    fn test_blank_marker_has_empty_name() {
        let tokens = scan_lines("#    \nbody");
        assert_eq!(tokens[0], LineToken::Marker(""));
        assert_eq!(tokens[1], LineToken::Body("body"));
    }

    #[test]
    fn test_indented_and_deeper_headings_are_body() {
        let tokens = scan_lines("  # Indented\n## Sub\n#NoSpace\n");

        assert!(tokens.iter().all(|t| matches!(t, LineToken::Body(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(scan_lines("").is_empty());
    }
}
