//! Converter registry for discovery and dispatch
//!
//! The host-side registry holds converter instances and dispatches a stream
//! to the first converter that accepts it.

use crate::converter::{ConversionResult, DocumentConverter, SourceStream, StreamInfo};
use crate::error::ConvertError;
use crate::scrapbox::{ScrapboxConverter, TagHandling};
use log::warn;

/// Registry of document converters
///
/// Converters are tried in registration order; the first whose `accepts`
/// returns true handles the stream.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConverterRegistry {
            converters: Vec::new(),
        }
    }

    /// Register a converter
    pub fn register<C: DocumentConverter + 'static>(&mut self, converter: C) {
        self.converters.push(Box::new(converter));
    }

    /// List registered converter names, in registration order
    pub fn list_converters(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Whether a converter with this name is registered
    pub fn has(&self, name: &str) -> bool {
        self.converters.iter().any(|c| c.name() == name)
    }

    /// Convert a stream with the first converter that accepts it.
    pub fn convert(
        &self,
        stream: &mut dyn SourceStream,
        info: &StreamInfo,
    ) -> Result<ConversionResult, ConvertError> {
        for converter in &self.converters {
            if converter.accepts(stream, info) {
                return converter.convert(stream, info);
            }
        }

        Err(ConvertError::Conversion(format!(
            "No registered converter accepts extension '{}'",
            info.extension.as_deref().unwrap_or("")
        )))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration hook: add the Scrapbox converter to a registry.
///
/// `tag_handling` accepts keep/hashtag/link/comment/code/remove; an
/// unrecognized value logs a warning and falls back to `comment`.
pub fn register_converters(
    registry: &mut ConverterRegistry,
    tag_handling: &str,
) -> Result<(), ConvertError> {
    let mode = match tag_handling.parse::<TagHandling>() {
        Ok(mode) => mode,
        Err(e) => {
            warn!("Invalid tag_handling option '{tag_handling}': {e}, using 'comment'");
            TagHandling::Comment
        }
    };

    registry.register(ScrapboxConverter::new(mode)?);
    Ok(())
}
