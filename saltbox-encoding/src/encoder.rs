//! Byte/text encoders.

use crate::error::EncodingResult;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Converts between raw bytes and a human-readable text form.
///
/// Implementations are pure and reversible for every byte string they
/// produce themselves.
pub trait Encoder {
    /// Encodes bytes as text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decodes text back into bytes.
    fn decode(&self, text: &str) -> EncodingResult<Vec<u8>>;
}

/// Lowercase hexadecimal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hex;

impl Encoder for Hex {
    fn encode(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    fn decode(&self, text: &str) -> EncodingResult<Vec<u8>> {
        Ok(hex::decode(text.trim())?)
    }
}

/// Standard base64 with padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base64;

impl Encoder for Base64 {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> EncodingResult<Vec<u8>> {
        Ok(STANDARD.decode(text.trim())?)
    }
}

/// The text's own UTF-8 bytes.
///
/// Encoding is lossy for byte strings that are not valid UTF-8; invalid
/// sequences are replaced with U+FFFD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Raw;

impl Encoder for Raw {
    fn encode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn decode(&self, text: &str) -> EncodingResult<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }
}
