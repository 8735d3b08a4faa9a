//! Scrapbox indentation-list conversion
//!
//! Every indented line is a list item; nesting depth follows the dialect's
//! one-structural-character convention from [`super::lines::indentation`].
//! Unindented lines (including blanks and already-converted blocks) pass
//! through untouched. The pass is strictly line-by-line, no lookahead.

use super::lines::{indentation, is_indented, markdown_indent, split_lines};

/// Convert Scrapbox list notation to Markdown bullet lists.
pub fn convert_lists(content: &str) -> String {
    if content.is_empty() {
        return content.to_string();
    }

    let lines = split_lines(content);
    let mut result: Vec<String> = Vec::with_capacity(lines.len());

    for line in &lines {
        if is_indented(line) {
            let (level, item) = indentation(line);
            result.push(format!("{}- {item}", markdown_indent(level)));
        } else {
            result.push(line.clone());
        }
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_leading_space_is_depth_zero() {
        assert_eq!(convert_lists(" Test"), "- Test");
        assert_eq!(convert_lists("  Indented"), "  - Indented");
        assert_eq!(convert_lists("   Further indented"), "    - Further indented");
    }

    #[test]
    fn tabs_and_full_width_spaces_count_as_indentation() {
        assert_eq!(convert_lists("\tTab indented"), "- Tab indented");
        assert_eq!(convert_lists("\u{3000}Full-width space"), "- Full-width space");
    }

    #[test]
    fn nesting_depth_follows_indent_width() {
        let input = " Item 1\n  Sub-item 1.1\n   Sub-sub-item 1.1.1\n  Sub-item 1.2\n Item 2";
        let expected = "\
- Item 1
  - Sub-item 1.1
    - Sub-sub-item 1.1.1
  - Sub-item 1.2
- Item 2";
        assert_eq!(convert_lists(input), expected);
    }

    #[test]
    fn unindented_lines_pass_through() {
        let input = "# Heading\n item\n\nplain";
        assert_eq!(convert_lists(input), "# Heading\n- item\n\nplain");
    }
}
