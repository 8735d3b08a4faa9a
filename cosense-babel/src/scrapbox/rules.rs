//! Inline rewrite rules for bracket notation
//!
//! An ordered catalog of (pattern, action) pairs applied in sequence over
//! the whole document text. Each rule is a full substitute-all before the
//! next runs, so later rules see earlier output. The order is load-bearing:
//! narrower bracket forms (explicit bold with closing markers, styled text)
//! must win before the generic heading and link forms.
//!
//! Compiled patterns live in a process-wide cache, and the image-extension
//! pattern is memoized separately; both are write-once/read-many.

use super::TagHandling;
use crate::error::ConvertError;
use once_cell::sync::{Lazy, OnceCell};
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Mutex;

/// URL suffixes recognized as images by the bare image-URL rule.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Styled text, emphasis, headings, math, and explicit embeds.
///
/// Applied before the dynamic image rule; order within this table matters.
const STYLE_STEPS: &[(&str, &str)] = &[
    (r"\[\*/\s*(.*?)\]", "***${1}***"),
    (r"\[\*-\s*(.*?)\]", "**~~${1}~~**"),
    (r"\[/-\s*(.*?)\]", "*~~${1}~~*"),
    (r"\[\*\*\*\s*(.*?)\s*\*\*\*\]", "**${1}**"),
    (r"\[\*\*\s*(.*?)\s*\*\*\]", "**${1}**"),
    (r"\[\*\*\*\*\*\s*(.*?)\]", "##### ${1}"),
    (r"\[\*\*\*\*\s*(.*?)\]", "#### ${1}"),
    (r"\[\*\*\*\s*(.*?)\]", "### ${1}"),
    (r"\[\*\*\s*(.*?)\]", "## ${1}"),
    (r"\[\*\s*(.*?)\]", "# ${1}"),
    (r"\[/\s*(.*?)\]", "*${1}*"),
    (r"\[-\s*(.*?)\]", "~~${1}~~"),
    (r"\[\$\s*(.*?)\s*\$\]", "$$${1}$$"),
    (r"\[img\s+(https?://[^\s\]]+)\]", "![img](${1})"),
];

/// Recognized-service links and the generic title/URL bracket pairs.
const LINK_STEPS: &[(&str, &str)] = &[
    (
        r"\[YouTube\s+(https?://(?:www\.)?youtube\.com/watch\?v=[\w-]+|https?://youtu\.be/[\w-]+)\]",
        "[YouTube Video](${1})",
    ),
    (
        r"\[Twitter\s+(https?://(?:www\.)?twitter\.com/\w+/status/\d+|https?://x\.com/\w+/status/\d+)\]",
        "[Twitter Post](${1})",
    ),
    (r"\[([^/\-\*\]]+?)\s+(https?://[^\s\]]+)\]", "[${1}](${2})"),
    (r"\[(https?://[^\s\]]+)\s+([^/\-\*\]]+?)\]", "[${2}](${1})"),
];

/// Any remaining bare URL; wrapping is guarded so URLs already inside
/// parentheses (converted links and embeds) are left alone.
const AUTOLINK_PATTERN: &str = r#"https?://[^\s<>"']+"#;

const BLOCKQUOTE_STEP: (&str, &str) = (r"^>\s*(.*)$", "> ${1}");

/// Candidate for tag rewriting; validation happens in the action.
const TAG_CANDIDATE_PATTERN: &str = r"\[([^\]]*)\]";

/// Bracket content that qualifies as a tag: no style/heading markers, not
/// starting with whitespace. URL pairs can never match (URLs contain `/`).
static TAG_BODY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\-*\s][^/\-*]*$").expect("tag body pattern is valid"));

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(Mutex::default);

static IMAGE_URL_PATTERN: OnceCell<Regex> = OnceCell::new();

/// Compile a rule pattern, consulting the process-wide cache.
///
/// Patterns compile in multi-line mode, so `^`/`$` anchor per line.
pub(crate) fn cached_pattern(pattern: &str) -> Result<Regex, ConvertError> {
    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| {
            ConvertError::PatternCompilation(format!("Failed to compile pattern '{pattern}': {e}"))
        })?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// The memoized pattern matching `[<url>.<image extension>]`.
fn image_url_pattern() -> Result<&'static Regex, ConvertError> {
    IMAGE_URL_PATTERN.get_or_try_init(|| {
        let extensions = IMAGE_EXTENSIONS.join("|");
        cached_pattern(&format!(r"\[(https?://[^\s\]]+\.(?:{extensions}))\]"))
    })
}

enum RuleAction {
    /// Plain template substitution (`${n}` group references)
    Template(&'static str),
    /// Wrap a bare URL in angle brackets unless it follows `(`
    Autolink,
    /// Rewrite `[tag]` per the configured mode
    Tag(TagHandling),
}

/// One (matcher, transform) pair from the fixed catalog.
struct Rule {
    pattern: Regex,
    action: RuleAction,
}

impl Rule {
    fn template(pattern: &str, replacement: &'static str) -> Result<Self, ConvertError> {
        Ok(Rule {
            pattern: cached_pattern(pattern)?,
            action: RuleAction::Template(replacement),
        })
    }

    fn apply(&self, content: &str) -> String {
        match &self.action {
            RuleAction::Template(replacement) => {
                self.pattern.replace_all(content, *replacement).into_owned()
            }
            RuleAction::Autolink => self
                .pattern
                .replace_all(content, |caps: &Captures| {
                    let url = &caps[0];
                    let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                    if content[..start].ends_with('(') {
                        url.to_string()
                    } else {
                        format!("<{url}>")
                    }
                })
                .into_owned(),
            RuleAction::Tag(mode) => self
                .pattern
                .replace_all(content, |caps: &Captures| rewrite_tag(&caps[0], &caps[1], *mode))
                .into_owned(),
        }
    }
}

fn rewrite_tag(whole: &str, inner: &str, mode: TagHandling) -> String {
    if !is_tag_body(inner) {
        return whole.to_string();
    }
    match mode {
        TagHandling::Keep => whole.to_string(),
        TagHandling::Hashtag => format!("#{inner}"),
        TagHandling::Link => format!("[{inner}](#{inner})"),
        TagHandling::Comment => format!("<!-- tag: {inner} -->"),
        TagHandling::Code => format!("`{inner}`"),
        TagHandling::Remove => String::new(),
    }
}

/// `img <anything>` stays bracketed even when the embed rule rejected it.
fn is_tag_body(inner: &str) -> bool {
    let img_prefixed = inner
        .strip_prefix("img")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    !img_prefixed && TAG_BODY_PATTERN.is_match(inner)
}

/// The ordered rule catalog for one converter configuration.
///
/// Immutable after construction. The tag rule is appended only when tag
/// handling is not `keep`; `keep` is handled by omission.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile the catalog. A pattern that fails to compile makes the whole
    /// converter unusable, so construction is fallible.
    pub fn new(tag_handling: TagHandling) -> Result<Self, ConvertError> {
        let mut rules = Vec::new();

        for &(pattern, replacement) in STYLE_STEPS {
            rules.push(Rule::template(pattern, replacement)?);
        }

        rules.push(Rule {
            pattern: image_url_pattern()?.clone(),
            action: RuleAction::Template("![](${1})"),
        });

        for &(pattern, replacement) in LINK_STEPS {
            rules.push(Rule::template(pattern, replacement)?);
        }

        rules.push(Rule {
            pattern: cached_pattern(AUTOLINK_PATTERN)?,
            action: RuleAction::Autolink,
        });

        let (pattern, replacement) = BLOCKQUOTE_STEP;
        rules.push(Rule::template(pattern, replacement)?);

        if tag_handling != TagHandling::Keep {
            rules.push(Rule {
                pattern: cached_pattern(TAG_CANDIDATE_PATTERN)?,
                action: RuleAction::Tag(tag_handling),
            });
        }

        Ok(RuleSet { rules })
    }

    /// Apply every rule in catalog order over the whole text.
    pub fn apply(&self, content: &str) -> String {
        if content.is_empty() {
            return content.to_string();
        }

        let mut content = content.to_string();
        for rule in &self.rules {
            content = rule.apply(&content);
        }
        content
    }
}
