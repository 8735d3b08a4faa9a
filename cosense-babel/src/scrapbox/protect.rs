//! Protection of fenced code blocks across the pipeline
//!
//! Later passes rewrite text wholesale, so already-formed Markdown fences
//! are swapped for placeholder tokens first and restored verbatim at the
//! end. The guard runs twice per conversion (before and after `code:` block
//! extraction) and keeps one sequential index across both runs, so a token
//! never collides with an earlier one.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[\s\S]*?```").expect("fence pattern is valid"));

/// Placeholder token for the protected block at `index`.
///
/// The token shape is reserved: it never appears in legitimate input.
fn placeholder(index: usize) -> String {
    format!("<<<CODEBLOCK{index}>>>")
}

/// Holds protected fenced blocks and hands out placeholder tokens.
#[derive(Debug, Default)]
pub struct FenceGuard {
    blocks: Vec<String>,
}

impl FenceGuard {
    pub fn new() -> Self {
        FenceGuard { blocks: Vec::new() }
    }

    /// Replace every fenced block with an indexed placeholder.
    ///
    /// Indices continue from previous calls on the same guard.
    pub fn protect(&mut self, content: &str) -> String {
        let matches: Vec<String> = FENCE_PATTERN
            .find_iter(content)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut content = content.to_string();
        for block in matches {
            let token = placeholder(self.blocks.len());
            content = content.replacen(&block, &token, 1);
            self.blocks.push(block);
        }
        content
    }

    /// Replace each placeholder with its original block, by index.
    ///
    /// A guard that protected nothing is a no-op. Each token is substituted
    /// exactly once, so restored text is never re-matched.
    pub fn restore(&self, content: &str) -> String {
        let mut content = content.to_string();
        for (i, block) in self.blocks.iter().enumerate() {
            content = content.replacen(&placeholder(i), block, 1);
        }
        content
    }

    /// Number of blocks currently protected.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
