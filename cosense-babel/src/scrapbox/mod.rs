//! Scrapbox/Cosense notation converter
//!
//! This module implements conversion from Scrapbox wiki notation to
//! Markdown. There is no AST: the dialect's grammar is implemented as a
//! fixed sequence of line-oriented and regex-based passes whose ordering is
//! the correctness contract.
//!
//! Pipeline: protect existing fences → extract `code:` blocks → protect the
//! fences just produced → tables → lists → inline rules → restore fences.
//! The two protect runs share one placeholder sequence, so table, list, and
//! inline passes can never rewrite code content.

pub mod code;
pub mod lines;
pub mod list;
pub mod protect;
pub mod rules;
pub mod table;

use crate::converter::{ConversionResult, DocumentConverter, SourceStream, StreamInfo};
use crate::encoding;
use crate::error::ConvertError;
use log::{error, warn};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use code::convert_code_blocks;
use list::convert_lists;
use protect::FenceGuard;
use rules::{cached_pattern, RuleSet};
use table::convert_tables;

/// Extensions the converter accepts, matched case-insensitively.
pub const ACCEPTED_FILE_EXTENSIONS: [&str; 1] = [".txt"];

/// How bare `[tag]` notation is rewritten.
///
/// Fixed at converter construction and never changes mid-conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagHandling {
    /// Leave the brackets untouched
    Keep,
    /// `[tag]` → `#tag`
    Hashtag,
    /// `[tag]` → `[tag](#tag)`
    Link,
    /// `[tag]` → `<!-- tag: tag -->`
    Comment,
    /// `[tag]` → `` `tag` ``
    Code,
    /// `[tag]` → removed
    Remove,
}

impl TagHandling {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagHandling::Keep => "keep",
            TagHandling::Hashtag => "hashtag",
            TagHandling::Link => "link",
            TagHandling::Comment => "comment",
            TagHandling::Code => "code",
            TagHandling::Remove => "remove",
        }
    }
}

impl Default for TagHandling {
    fn default() -> Self {
        TagHandling::Comment
    }
}

impl fmt::Display for TagHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagHandling {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(TagHandling::Keep),
            "hashtag" => Ok(TagHandling::Hashtag),
            "link" => Ok(TagHandling::Link),
            "comment" => Ok(TagHandling::Comment),
            "code" => Ok(TagHandling::Code),
            "remove" => Ok(TagHandling::Remove),
            other => Err(ConvertError::Configuration(format!(
                "Invalid tag_handling option '{other}'"
            ))),
        }
    }
}

/// Converter from Scrapbox notation to Markdown.
pub struct ScrapboxConverter {
    tag_handling: TagHandling,
    rules: RuleSet,
    brace_pattern: Regex,
    bracket_pattern: Option<Regex>,
}

impl ScrapboxConverter {
    /// Build a converter for the given tag-handling mode.
    ///
    /// Fails only if a rule pattern does not compile; such a converter
    /// cannot be used and the error surfaces before any conversion begins.
    pub fn new(tag_handling: TagHandling) -> Result<Self, ConvertError> {
        let rules = RuleSet::new(tag_handling)?;
        let brace_pattern = cached_pattern(r"\{([^\}]*)\}")?;
        // With `keep`, leftover bracket notation is reported too
        let bracket_pattern = if tag_handling == TagHandling::Keep {
            Some(cached_pattern(r"\[([^\]]*)\]")?)
        } else {
            None
        };

        Ok(ScrapboxConverter {
            tag_handling,
            rules,
            brace_pattern,
            bracket_pattern,
        })
    }

    pub fn tag_handling(&self) -> TagHandling {
        self.tag_handling
    }

    /// Run the full conversion pipeline over decoded text.
    pub fn convert_content(&self, content: &str) -> String {
        let mut guard = FenceGuard::new();

        let content = guard.protect(content);
        let content = convert_code_blocks(&content);
        let content = guard.protect(&content);

        let content = convert_tables(&content);
        let content = convert_lists(&content);
        let content = self.rules.apply(&content);

        let content = guard.restore(&content);

        self.warn_unsupported_notations(&content);
        content
    }

    /// Diagnostic scan for residual notation the pipeline could not
    /// classify. Logs one warning per match; never fails conversion.
    fn warn_unsupported_notations(&self, content: &str) {
        for m in self.brace_pattern.find_iter(content) {
            warn!(
                "Unsupported brace notation detected: '{}' at position {}",
                m.as_str(),
                m.start()
            );
        }

        if let Some(pattern) = &self.bracket_pattern {
            for m in pattern.find_iter(content) {
                let inner = &m.as_str()[1..m.as_str().len() - 1];
                let img_prefixed = inner
                    .strip_prefix("img")
                    .is_some_and(|rest| rest.starts_with(char::is_whitespace));
                if inner.starts_with('*') || img_prefixed {
                    continue;
                }
                warn!(
                    "Unsupported bracket notation detected: '{}' at position {}",
                    m.as_str(),
                    m.start()
                );
            }
        }
    }
}

impl DocumentConverter for ScrapboxConverter {
    fn name(&self) -> &str {
        "scrapbox"
    }

    fn description(&self) -> &str {
        "Scrapbox/Cosense notation to Markdown"
    }

    fn accepts(&self, _stream: &mut dyn SourceStream, info: &StreamInfo) -> bool {
        let extension = info.extension.as_deref().unwrap_or("").to_lowercase();
        ACCEPTED_FILE_EXTENSIONS.contains(&extension.as_str())
    }

    fn convert(
        &self,
        stream: &mut dyn SourceStream,
        info: &StreamInfo,
    ) -> Result<ConversionResult, ConvertError> {
        let content = encoding::read_to_string(stream, info).map_err(|e| {
            error!("Document conversion failed: {e}");
            ConvertError::conversion(e)
        })?;

        // The dialect's headings never map to a document-level title
        Ok(ConversionResult {
            title: None,
            markdown: self.convert_content(&content),
        })
    }
}
