//! Text normalization
//!
//! Raw payloads are sniffed for their encoding, decoded to UTF-8, and
//! flattened to a single line: blank lines are dropped and the remaining
//! lines are joined with single spaces. Layout is lost on purpose so that
//! sentence scanning sees uniform text.

use crate::error::{EngineError, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// Infer the encoding of a byte payload
///
/// Fails when the payload looks binary (NUL bytes with no UTF-16 layout).
pub fn detect_encoding(bytes: &[u8]) -> Result<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Ok(encoding);
    }

    if bytes.contains(&0) {
        return sniff_utf16(bytes);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Ok(UTF_8);
    }

    // Every byte sequence decodes under windows-1252, the WHATWG fallback
    // for legacy 8-bit Latin text.
    Ok(WINDOWS_1252)
}

/// Guess UTF-16 byte order from where the NUL bytes sit
fn sniff_utf16(bytes: &[u8]) -> Result<&'static Encoding> {
    let pairs = bytes.len() / 2;
    let (even_zeros, odd_zeros) =
        bytes
            .iter()
            .enumerate()
            .fold((0usize, 0usize), |(even, odd), (i, &b)| match (b, i % 2) {
                (0, 0) => (even + 1, odd),
                (0, _) => (even, odd + 1),
                _ => (even, odd),
            });

    if pairs > 0 && even_zeros * 2 >= pairs && odd_zeros * 10 <= even_zeros {
        return Ok(UTF_16BE);
    }
    if pairs > 0 && odd_zeros * 2 >= pairs && even_zeros * 10 <= odd_zeros {
        return Ok(UTF_16LE);
    }

    Err(EngineError::EncodingDetection {
        reason: format!(
            "{} NUL bytes without a UTF-16 layout in {} bytes",
            even_zeros + odd_zeros,
            bytes.len()
        ),
    })
}

/// Decodes payloads and collapses their line structure
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Decode with the sniffed encoding
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let encoding = detect_encoding(bytes)?;
        log::debug!("decoding {} bytes as {}", bytes.len(), encoding.name());
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            log::warn!("replaced malformed {} sequences", encoding.name());
        }
        Ok(text.into_owned())
    }

    /// Decode with the sniffed encoding, falling back to lossy UTF-8
    pub fn decode_lossy(&self, bytes: &[u8]) -> String {
        match self.decode(bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{e}; falling back to lossy UTF-8");
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }

    /// Drop blank lines and join the rest with single spaces
    pub fn normalize(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Decode (lossily if needed) and normalize in one step
    pub fn normalize_bytes(&self, bytes: &[u8]) -> String {
        self.normalize(&self.decode_lossy(bytes))
    }
}
