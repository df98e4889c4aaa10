//! Input abstraction for extraction
//!
//! Every source is reduced to raw bytes; decoding is the normalizer's job,
//! since the payload's encoding is not known up front.

use crate::error::{EngineError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Unified input abstraction
pub enum Input {
    /// Text that is already decoded
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Raw bytes in an unknown encoding
    Bytes(Vec<u8>),
    /// Reader stream (for stdin, uploads, etc.)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the raw payload
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Input::Text(text) => Ok(text.into_bytes()),
            Input::Bytes(bytes) => Ok(bytes),
            Input::File(path) => fs::read(&path)
                .map_err(|e| EngineError::Io(format!("Failed to read file {path:?}: {e}"))),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer).map_err(|e| {
                    EngineError::Io(format!("Failed to read from stream: {e}"))
                })?;
                Ok(buffer)
            }
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_text_into_bytes() {
        let bytes = Input::from_text("Buyer").into_bytes().unwrap();
        assert_eq!(bytes, b"Buyer");
    }

    #[test]
    fn test_reader_into_bytes() {
        let input = Input::from_reader(Cursor::new(vec![0xE9, 0x41]));
        assert_eq!(input.into_bytes().unwrap(), vec![0xE9, 0x41]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Input::from_file("/nonexistent/contract.txt")
            .into_bytes()
            .unwrap_err();
        assert!(matches!(err, EngineError::Io(ref msg) if msg.contains("Failed to read file")));
    }

    #[test]
    fn test_debug_hides_byte_payload() {
        let input = Input::from_bytes(vec![0; 42]);
        assert_eq!(format!("{input:?}"), "Bytes(\"<42 bytes>\")");
    }
}
