//! Shared configuration loader for the cosense toolchain.
//!
//! `defaults/cosense.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`CosenseConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use cosense_babel::TagHandling;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cosense.default.toml");

/// Top-level configuration consumed by cosense applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CosenseConfig {
    pub convert: ConvertConfig,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub tag_handling: TagHandlingConfig,
}

/// Mirrors [`TagHandling`] for deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TagHandlingConfig {
    #[serde(rename = "keep")]
    Keep,
    #[serde(rename = "hashtag")]
    Hashtag,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "remove")]
    Remove,
}

impl From<TagHandlingConfig> for TagHandling {
    fn from(config: TagHandlingConfig) -> Self {
        match config {
            TagHandlingConfig::Keep => TagHandling::Keep,
            TagHandlingConfig::Hashtag => TagHandling::Hashtag,
            TagHandlingConfig::Link => TagHandling::Link,
            TagHandlingConfig::Comment => TagHandling::Comment,
            TagHandlingConfig::Code => TagHandling::Code,
            TagHandlingConfig::Remove => TagHandling::Remove,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CosenseConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CosenseConfig, ConfigError> {
    Loader::new().build()
}
