//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting a document
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Invalid registration target or option value beyond the documented fallback
    Configuration(String),
    /// A rewrite rule's regex failed to compile; the converter is unusable
    PatternCompilation(String),
    /// I/O failure while reading the source stream during decoding
    Encoding(String),
    /// Malformed table block (recovered locally; never surfaced from `convert`)
    Table(String),
    /// Catch-all wrapping any unexpected failure during `convert`.
    ///
    /// This is the only error kind the host-facing `convert` entry point
    /// may surface; the message carries the original cause.
    Conversion(String),
}

impl ConvertError {
    /// Wrap an arbitrary failure into the single host-facing conversion error.
    pub fn conversion(cause: impl fmt::Display) -> Self {
        ConvertError::Conversion(format!("Failed to convert document: {cause}"))
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            ConvertError::PatternCompilation(msg) => {
                write!(f, "Pattern compilation error: {msg}")
            }
            ConvertError::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            ConvertError::Table(msg) => write!(f, "Table processing error: {msg}"),
            ConvertError::Conversion(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
