//! Character decoding with a fallback chain
//!
//! Conversion never fails on a wrong charset: a decode mismatch advances the
//! chain instead. Only stream I/O failures propagate as errors.
//!
//! The chain is: declared charset → UTF-8 → windows-1252 → lossy UTF-8.
//! Per the WHATWG Encoding Standard (which `encoding_rs` implements) the
//! `latin-1` label resolves to windows-1252, so the two legacy single-byte
//! stages collapse into one total decode here.

use crate::converter::{SourceStream, StreamInfo};
use crate::error::ConvertError;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::warn;
use std::io::{Read, Seek, SeekFrom};

/// Read the whole stream and decode it through the fallback chain.
pub fn read_to_string(
    stream: &mut dyn SourceStream,
    info: &StreamInfo,
) -> Result<String, ConvertError> {
    stream
        .seek(SeekFrom::Start(0))
        .map_err(|e| ConvertError::Encoding(format!("Failed to seek stream: {e}")))?;

    let mut bytes = Vec::new();
    stream
        .read_to_end(&mut bytes)
        .map_err(|e| ConvertError::Encoding(format!("Failed to read stream: {e}")))?;

    Ok(decode_bytes(&bytes, info.charset.as_deref()))
}

/// Decode bytes using the declared charset first, then the fallback chain.
///
/// Total: the windows-1252 stage accepts every byte sequence, and the lossy
/// UTF-8 last resort replaces anything that still cannot decode.
pub fn decode_bytes(bytes: &[u8], charset: Option<&str>) -> String {
    if let Some(label) = charset {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
                Some(text) => return text.into_owned(),
                None => warn!("Failed to decode with declared charset '{label}'"),
            },
            None => warn!("Unknown charset label '{label}', ignoring"),
        }
    }

    for encoding in [UTF_8, WINDOWS_1252] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return text.into_owned();
        }
        warn!("Failed to decode with {}", encoding.name());
    }

    warn!("Using UTF-8 with error replacement as last resort");
    let (text, _, _) = UTF_8.decode(bytes);
    text.into_owned()
}
