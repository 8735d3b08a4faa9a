//! End-to-end pipeline tests for the Scrapbox converter
//!
//! These run the full pass sequence (protect → code blocks → protect →
//! tables → lists → inline rules → restore) over whole documents.

use cosense_babel::scrapbox::protect::FenceGuard;
use cosense_babel::{ScrapboxConverter, TagHandling};
use insta::assert_snapshot;

fn convert(content: &str, mode: TagHandling) -> String {
    ScrapboxConverter::new(mode)
        .expect("converter should build")
        .convert_content(content)
}

#[test]
fn heading_then_tag() {
    let result = convert("[* Title]\n[tag]", TagHandling::Comment);
    assert_eq!(result, "# Title\n<!-- tag: tag -->");
}

#[test]
fn code_block_scenario() {
    let result = convert("code:python\nprint('hello')", TagHandling::Comment);
    assert_eq!(result, "```python\nprint('hello')\n```");
}

#[test]
fn table_scenario() {
    let result = convert(
        "table:Data\n Name Age\n Alice 30\n Bob 25",
        TagHandling::Comment,
    );
    assert!(result.starts_with("## Data\n\n| Name | Age |\n|---|---|\n| Alice | 30 |\n| Bob | 25 |"));
}

#[test]
fn latex_scenario() {
    let result = convert("code:tex\nE = mc^2\nV(X) = \\sigma^2", TagHandling::Comment);
    assert!(result.contains("$E = mc^2$"));
    assert!(result.contains("$V(X) = \\sigma^2$"));
}

#[test]
fn comprehensive_document() {
    let content = "\
[* Main Heading]
[** Sub Heading]
[/ italic] and [- strikethrough]

 Item 1
  Nested 1-1
 Item 2

code:python
 def hello():
     print(\"world\")

table:Data
 Name Score
 Alice 95

[$ E = mc^2 $]
[Google https://google.com]";

    let result = convert(content, TagHandling::Keep);
    assert_snapshot!(result, @r#"
    # Main Heading
    ## Sub Heading
    *italic* and ~~strikethrough~~

    - Item 1
      - Nested 1-1
    - Item 2

    ```python
    def hello():
    print("world")
    ```
    ## Data

    | Name | Score |
    |---|---|
    | Alice | 95 |


    $E = mc^2$
    [Google](https://google.com)
    "#);
}

#[test]
fn mixed_notation_survives_every_pass() {
    let content = "\
[*/ bold italic] and [*- bold strikethrough]
[img https://example.com/logo.png]
[https://example.com/image.png]
Check https://example.com for details";

    let result = convert(content, TagHandling::Keep);
    assert!(result.contains("***bold italic***"));
    assert!(result.contains("**~~bold strikethrough~~**"));
    assert!(result.contains("![img](https://example.com/logo.png)"));
    assert!(result.contains("![](https://example.com/image.png)"));
    assert!(result.contains("<https://example.com>"));
}

#[test]
fn protected_fences_pass_through_table_list_and_inline_passes() {
    // A placeholder must never be rewritten by any later pass.
    let mut guard = FenceGuard::new();
    let protected = guard.protect("```rust\n [* not a heading]\n```");
    assert_eq!(protected, "<<<CODEBLOCK0>>>");

    let tabled = cosense_babel::scrapbox::table::convert_tables(&protected);
    let listed = cosense_babel::scrapbox::list::convert_lists(&tabled);
    assert_eq!(listed, "<<<CODEBLOCK0>>>");

    let restored = guard.restore(&listed);
    assert_eq!(restored, "```rust\n [* not a heading]\n```");
}

#[test]
fn restoration_is_identity_without_intermediate_passes() {
    let texts = [
        "plain text, no fences",
        "```python\ncode\n```",
        "before\n```a\n1\n```\nbetween\n```b\n2\n```\nafter",
        "",
    ];
    for text in texts {
        let mut guard = FenceGuard::new();
        let protected = guard.protect(text);
        assert_eq!(guard.restore(&protected), text, "input: {text:?}");
    }
}

#[test]
fn list_nesting_depths() {
    let content = " a\n  b\n   c\n  d\n e";
    let result = convert(content, TagHandling::Keep);
    assert_eq!(result, "- a\n  - b\n    - c\n  - d\n- e");
}

#[test]
fn crlf_input_is_normalized() {
    let result = convert("[* Title]\r\n item\r\nplain", TagHandling::Keep);
    assert_eq!(result, "# Title\n- item\nplain");
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(convert("", TagHandling::Comment), "");
}

#[test]
fn indented_code_block_keeps_list_context() {
    let content = " item\n code:sh\n  echo hi\n item two";
    let result = convert(content, TagHandling::Keep);
    assert_snapshot!(result, @r"
    - item

    ```bash
    echo hi
    ```

    - item two
    ");
}
