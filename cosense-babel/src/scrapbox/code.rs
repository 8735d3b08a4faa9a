//! Scrapbox `code:` block extraction
//!
//! A `code:<name>` header starts a block whose body is every following line
//! at least as indented as the first body line. The body boundary uses the
//! raw indentation count, not the list converter's structural offset.
//!
//! `code:tex` is a pseudo-language: qualifying body lines become inline math
//! (`$...$`) instead of a fenced block. Whether a line "looks mathematical"
//! is a token-sniffing heuristic inherited from the dialect; its exact
//! boundary behavior on mixed CJK and math text is deliberate.

use super::lines::{base_indentation, split_lines, strip_indent};
use log::warn;

/// Header prefix that opens a Scrapbox code block.
pub const CODE_BLOCK_PREFIX: &str = "code:";

const MATH_OPERATORS: [char; 8] = ['=', '+', '-', '*', '/', '^', '(', ')'];
const MATH_FUNCTIONS: [&str; 8] = ["E(", "V(", "Cov(", "σ", "μ", "√", "Φ", "\\"];

/// Display language for a short extension token, identity when unmapped.
fn map_language(token: &str) -> &str {
    match token {
        "py" => "python",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "rb" => "ruby",
        "rs" => "rust",
        "cs" => "csharp",
        "kt" => "kotlin",
        "sh" => "bash",
        "yml" => "yaml",
        other => other,
    }
}

/// Convert every `code:` block in the content to Markdown.
pub fn convert_code_blocks(content: &str) -> String {
    if content.is_empty() {
        return content.to_string();
    }

    let lines = split_lines(content);
    let mut result: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        if strip_indent(line).starts_with(CODE_BLOCK_PREFIX) {
            i = process_code_block(&lines, i, &mut result);
        } else {
            result.push(line.clone());
            i += 1;
        }
    }

    result.join("\n")
}

/// Convert one block starting at `index`; returns the first unconsumed index.
fn process_code_block(lines: &[String], index: usize, result: &mut Vec<String>) -> usize {
    let line = &lines[index];
    let stripped = strip_indent(line);
    let leading_indent = &line[..line.len() - stripped.len()];
    let filename = stripped[CODE_BLOCK_PREFIX.len()..].trim();

    let (body, next_index) = collect_block_lines(lines, index + 1);

    if filename == "tex" {
        emit_latex_block(&body, result, leading_indent);
    } else {
        let lang = language_for(filename);
        emit_fenced_block(result, &lang, &body, !leading_indent.is_empty());
    }

    next_index
}

/// Collect body lines starting at `start` (the line after the header).
///
/// The boundary indentation is taken from the first body line. Blank lines
/// always belong to the block; a shallower line or a new `code:` header ends
/// it.
fn collect_block_lines(lines: &[String], start: usize) -> (Vec<String>, usize) {
    if start >= lines.len() {
        if start > lines.len() {
            warn!("Invalid start index {start} for {} lines", lines.len());
        }
        return (Vec::new(), start);
    }

    let base_indent = base_indentation(&lines[start]);
    let mut body = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(start) {
        if line.trim().is_empty() {
            body.push(line.clone());
            continue;
        }

        if base_indentation(line) < base_indent {
            return (body, i);
        }

        if strip_indent(line).starts_with(CODE_BLOCK_PREFIX) {
            return (body, i);
        }

        body.push(line.clone());
    }

    (body, lines.len())
}

/// Resolve the fence label from the header's trailing text.
fn language_for(filename: &str) -> String {
    if filename.is_empty() {
        return String::new();
    }

    let (_, ext) = super::lines::split_extension(filename);
    if ext.is_empty() {
        map_language(filename).to_string()
    } else {
        map_language(ext).to_string()
    }
}

/// Rewrite a `code:tex` body as inline math lines.
fn emit_latex_block(body: &[String], result: &mut Vec<String>, leading_indent: &str) {
    for line in body {
        let stripped = line.trim();
        if stripped.is_empty() {
            result.push(String::new());
        } else if is_mathematical_expression(stripped) {
            result.push(format!("{leading_indent}${stripped}$"));
        } else {
            result.push(line.trim_end().to_string());
        }
    }
}

/// Emit a fenced block. An indented header gets blank lines around the
/// fences so the list pass's indentation read stays intact.
fn emit_fenced_block(result: &mut Vec<String>, lang: &str, body: &[String], indented: bool) {
    if indented {
        result.push(String::new());
    }

    result.push(format!("```{lang}"));
    for line in body {
        if !line.trim().is_empty() {
            result.push(strip_indent(line).to_string());
        }
    }
    result.push("```".to_string());

    if indented {
        result.push(String::new());
    }
}

fn is_mathematical_expression(text: &str) -> bool {
    let has_math = contains_math_symbols(text);
    has_math && !is_excluded_content(text, has_math)
}

fn contains_math_symbols(text: &str) -> bool {
    text.chars().any(|c| MATH_OPERATORS.contains(&c))
        || MATH_FUNCTIONS.iter().any(|f| text.contains(f))
}

/// Lines that are images, URLs, arrows, or plain CJK prose are not math even
/// when they contain operator characters.
fn is_excluded_content(text: &str, has_math_symbols: bool) -> bool {
    let excluded_prefixes = ["![", "http", "<http", "->"];
    if excluded_prefixes.iter().any(|p| text.starts_with(p)) || text == "code:tex" {
        return true;
    }

    for c in text.chars() {
        let cjk = ('\u{3040}'..='\u{309f}').contains(&c)
            || ('\u{30a0}'..='\u{30ff}').contains(&c)
            || ('\u{4e00}'..='\u{9faf}').contains(&c);
        if cjk {
            return !has_math_symbols;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_python_block_with_extension() {
        let result = convert_code_blocks("code:example.py\nprint('Hello')");
        assert_eq!(result, "```python\nprint('Hello')\n```");
    }

    #[test]
    fn converts_javascript_block() {
        let result = convert_code_blocks("code:test.js\nconsole.log('test');");
        assert_eq!(result, "```javascript\nconsole.log('test');\n```");
    }

    #[test]
    fn header_without_body_emits_an_empty_fence() {
        assert_eq!(convert_code_blocks("code:styles.css"), "```css\n```");
    }

    #[test]
    fn bare_language_name_maps_too() {
        let result = convert_code_blocks("code:python\nprint('hello')");
        assert_eq!(result, "```python\nprint('hello')\n```");
    }

    #[test]
    fn block_ends_at_a_shallower_line() {
        let input = "code:python\n print('a')\n print('b')\nafter";
        let result = convert_code_blocks(input);
        assert_eq!(result, "```python\nprint('a')\nprint('b')\n```\nafter");
    }

    #[test]
    fn block_ends_at_a_new_code_header() {
        let input = "code:a.py\nx = 1\ncode:b.rb\ny = 2";
        let result = convert_code_blocks(input);
        assert_eq!(result, "```python\nx = 1\n```\n```ruby\ny = 2\n```");
    }

    #[test]
    fn indented_header_pads_the_fence_with_blank_lines() {
        let input = " code:sh\n  echo hi\nafter";
        let result = convert_code_blocks(input);
        assert_eq!(result, "\n```bash\necho hi\n```\n\nafter");
    }

    #[test]
    fn latex_block_becomes_inline_math() {
        let result = convert_code_blocks("code:tex\nE = mc^2\nV(X) = \\sigma^2");
        assert!(result.contains("$E = mc^2$"));
        assert!(result.contains("$V(X) = \\sigma^2$"));
    }

    #[test]
    fn latex_block_keeps_non_math_lines_verbatim() {
        let result = convert_code_blocks("code:tex\n-> see below\nE = mc^2");
        assert!(result.contains("-> see below"));
        assert!(!result.contains("$-> see below$"));
        assert!(result.contains("$E = mc^2$"));
    }

    #[test]
    fn cjk_prose_without_math_symbols_is_not_math() {
        assert!(!is_mathematical_expression("これは文章です"));
        assert!(is_mathematical_expression("確率 = 0.5"));
    }

    #[test]
    fn urls_and_images_are_never_math() {
        assert!(!is_mathematical_expression("https://example.com/a=b"));
        assert!(!is_mathematical_expression("![img](x)"));
        assert!(!is_mathematical_expression("code:tex"));
    }

    #[test]
    fn language_mapping_resolves_known_tokens() {
        assert_eq!(language_for("script.py"), "python");
        assert_eq!(language_for("mod.rs"), "rust");
        assert_eq!(language_for("deploy.yml"), "yaml");
        assert_eq!(language_for("unknown.xyz"), "xyz");
        assert_eq!(language_for(""), "");
    }
}
