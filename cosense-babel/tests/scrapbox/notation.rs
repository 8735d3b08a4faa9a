//! Ordering and precedence tests for the inline notation rules
//!
//! The rule catalog's order is the grammar: these tests pin the tie-breaks
//! between overlapping bracket forms.

use cosense_babel::scrapbox::rules::RuleSet;
use cosense_babel::TagHandling;

fn apply(input: &str) -> String {
    RuleSet::new(TagHandling::Keep)
        .expect("rule set should compile")
        .apply(input)
}

#[test]
fn explicit_bold_beats_heading_three() {
    // The closing-marker form is tried first; without it, heading wins.
    assert_eq!(apply("[*** Title ***]"), "**Title**");
    assert_eq!(apply("[*** Title]"), "### Title");
}

#[test]
fn explicit_bold_beats_heading_two() {
    assert_eq!(apply("[** Title **]"), "**Title**");
    assert_eq!(apply("[** Title]"), "## Title");
}

#[test]
fn heading_precedence_by_star_count() {
    for (stars, hashes) in [
        ("*", "#"),
        ("**", "##"),
        ("***", "###"),
        ("****", "####"),
        ("*****", "#####"),
    ] {
        assert_eq!(apply(&format!("[{stars} X]")), format!("{hashes} X"));
    }
}

#[test]
fn styled_text_beats_emphasis_and_strikethrough() {
    // [*/ and [*- and [/- are narrower than [* [/ [- and run first
    assert_eq!(apply("[*/ both]"), "***both***");
    assert_eq!(apply("[*- both]"), "**~~both~~**");
    assert_eq!(apply("[/- both]"), "*~~both~~*");
}

#[test]
fn image_url_beats_generic_link_rules() {
    // A bare image URL converts to an image embed, not a link
    assert_eq!(
        apply("[https://example.com/photo.webp]"),
        "![](https://example.com/photo.webp)"
    );
}

#[test]
fn image_extension_match_is_case_sensitive() {
    let result = apply("[https://example.com/photo.PNG]");
    assert!(!result.starts_with("![]"));
}

#[test]
fn service_links_beat_generic_title_url_pairs() {
    assert_eq!(
        apply("[YouTube https://youtu.be/abc-123]"),
        "[YouTube Video](https://youtu.be/abc-123)"
    );
    assert_eq!(
        apply("[Twitter https://x.com/user/status/42]"),
        "[Twitter Post](https://x.com/user/status/42)"
    );
    // A non-YouTube URL after the word YouTube is an ordinary titled link
    assert_eq!(
        apply("[YouTube https://example.com]"),
        "[YouTube](https://example.com)"
    );
}

#[test]
fn autolink_skips_urls_already_in_converted_links() {
    let result = apply("[Docs https://example.com/docs] and https://example.com/raw");
    assert_eq!(
        result,
        "[Docs](https://example.com/docs) and <https://example.com/raw>"
    );
}

#[test]
fn multiple_notations_on_one_line() {
    assert_eq!(
        apply("[* Head] then [/ it] then [- strike]"),
        "# Head then *it* then ~~strike~~"
    );
}

#[test]
fn math_brackets_keep_inner_spacing_rules() {
    assert_eq!(apply("[$ \\frac{a}{b} $]"), "$\\frac{a}{b}$");
}
