//! Scrapbox/Cosense notation to Markdown conversion
//!
//!     This crate converts documents written in Scrapbox wiki notation into
//!     standard Markdown. It is designed to sit inside a larger conversion
//!     host: given a byte stream and declared metadata, a converter decides
//!     whether it can handle the document (`accepts`) and, if so, produces
//!     Markdown plus an optional title (`convert`).
//!
//! Architecture
//!
//!     There is deliberately no parser or AST. The dialect's grammar is
//!     implemented as a fixed pipeline of passes over plain text, and
//!     correctness lives in the pass ordering and in the ordering of the
//!     inline rewrite rules. See scrapbox/mod.rs for the pipeline and
//!     scrapbox/rules.rs for the rule catalog.
//!
//!     The file structure:
//!     .
//!     ├── error.rs          # ConvertError taxonomy
//!     ├── converter.rs      # DocumentConverter trait, StreamInfo, result type
//!     ├── registry.rs       # ConverterRegistry and the registration hook
//!     ├── encoding.rs       # charset fallback chain (never fails)
//!     ├── scrapbox
//!     │   ├── lines.rs      # indentation and line primitives
//!     │   ├── code.rs       # code: block extraction, the tex heuristic
//!     │   ├── protect.rs    # fence placeholder guard
//!     │   ├── table.rs      # table: block conversion
//!     │   ├── list.rs       # indentation lists
//!     │   ├── rules.rs      # ordered inline rule catalog
//!     │   └── mod.rs        # ScrapboxConverter facade
//!     └── lib.rs
//!
//!     This is a pure lib: it powers the cosense CLI but is shell agnostic.
//!     All diagnostics go through the `log` facade; recoverable conditions
//!     (malformed tables, residual notation) are logged and worked around,
//!     and only the single wrapped conversion error reaches the caller.

pub mod converter;
pub mod encoding;
pub mod error;
pub mod registry;
pub mod scrapbox;

pub use converter::{ConversionResult, DocumentConverter, SourceStream, StreamInfo};
pub use error::ConvertError;
pub use registry::{register_converters, ConverterRegistry};
pub use scrapbox::{ScrapboxConverter, TagHandling};
