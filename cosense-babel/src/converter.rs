//! Converter trait definition
//!
//! This module defines the host-facing contract every converter implements.
//! The host hands a converter a seekable byte stream plus metadata and
//! receives Markdown back; converter selection is driven by `accepts`.

use crate::error::ConvertError;
use serde::Serialize;
use std::io::{Read, Seek};

/// Metadata the host knows about a stream before conversion.
#[derive(Debug, Clone, Default)]
pub struct StreamInfo {
    /// Declared file extension including the leading dot (e.g., ".txt")
    pub extension: Option<String>,
    /// Declared character set, if the host knows one
    pub charset: Option<String>,
}

impl StreamInfo {
    /// Metadata carrying only a file extension.
    pub fn with_extension(extension: &str) -> Self {
        StreamInfo {
            extension: Some(extension.to_string()),
            charset: None,
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Document title, when the source dialect expresses one
    pub title: Option<String>,
    /// The converted Markdown text
    pub markdown: String,
}

/// Seekable byte source handed over by the host.
///
/// Blanket-implemented for anything that is `Read + Seek`, so files and
/// in-memory cursors both work.
pub trait SourceStream: Read + Seek {}

impl<T: Read + Seek> SourceStream for T {}

/// Trait for document converters
///
/// Implementors decide whether they can handle a stream (`accepts`) and, if
/// so, produce Markdown plus an optional title (`convert`).
///
/// `accepts` must not advance the stream position: if an implementation
/// sniffs bytes, it must seek back before returning.
pub trait DocumentConverter: Send + Sync {
    /// The name of this converter (e.g., "scrapbox")
    fn name(&self) -> &str;

    /// Optional description of this converter
    fn description(&self) -> &str {
        ""
    }

    /// Whether this converter handles the given stream.
    fn accepts(&self, stream: &mut dyn SourceStream, info: &StreamInfo) -> bool;

    /// Convert the stream into Markdown.
    ///
    /// On internal failure this returns `ConvertError::Conversion` wrapping
    /// the original cause; no other error kind escapes this entry point.
    fn convert(
        &self,
        stream: &mut dyn SourceStream,
        info: &StreamInfo,
    ) -> Result<ConversionResult, ConvertError>;
}
