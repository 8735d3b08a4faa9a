//! Line and indentation primitives for Scrapbox notation
//!
//! Scrapbox indents with space, tab, or full-width space interchangeably.
//! Two different measurements coexist and must stay separate:
//!
//! - [`indentation`] applies the dialect convention that one leading
//!   indentation character is structural (`level = count - 1`); the list
//!   converter uses it.
//! - [`base_indentation`] is the raw count; code-block boundary detection
//!   uses it. Unifying the two would change block segmentation.

/// Characters Scrapbox treats as indentation (space, tab, full-width space).
pub const INDENT_CHARS: [char; 3] = [' ', '\t', '\u{3000}'];

/// Number of spaces per nesting level in the emitted Markdown.
pub const MARKDOWN_INDENT_SIZE: usize = 2;

/// Indentation level and remaining content of a line.
///
/// One leading indentation character is structural, not a nesting level, so
/// the level is `max(0, count - 1)`.
pub fn indentation(line: &str) -> (usize, &str) {
    let count = leading_indent_chars(line);
    let level = count.saturating_sub(1);
    let remainder = strip_indent(line);
    (level, remainder)
}

/// Raw count of leading indentation characters, no dialect adjustment.
pub fn base_indentation(line: &str) -> usize {
    leading_indent_chars(line)
}

/// Whether the line starts with an indentation character.
pub fn is_indented(line: &str) -> bool {
    line.chars().next().is_some_and(|c| INDENT_CHARS.contains(&c))
}

/// Strip leading indentation characters from a line.
pub fn strip_indent(line: &str) -> &str {
    line.trim_start_matches(|c| INDENT_CHARS.contains(&c))
}

/// Markdown indentation string for a nesting level.
pub fn markdown_indent(level: usize) -> String {
    " ".repeat(MARKDOWN_INDENT_SIZE * level)
}

/// Split text into logical lines, treating `\r\n`, `\r`, and `\n` alike.
///
/// Empty input yields no lines.
pub fn split_lines(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Split a filename into stem and extension on the last dot.
///
/// No dot yields `(name, "")`.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (filename, ""),
    }
}

fn leading_indent_chars(line: &str) -> usize {
    line.chars()
        .take_while(|c| INDENT_CHARS.contains(c))
        .count()
}
