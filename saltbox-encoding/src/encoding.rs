//! Runtime-selectable encoding.

use crate::encoder::{Base64, Encoder, Hex, Raw};
use crate::error::{EncodingError, EncodingResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which text encoding to use for keys and fixtures.
///
/// Deserializes from `"hex"`, `"base64"` or `"raw"`. Defaults to hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
    Raw,
}

impl Encoding {
    /// Name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Raw => "raw",
        }
    }
}

impl Encoder for Encoding {
    fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex => Hex.encode(bytes),
            Encoding::Base64 => Base64.encode(bytes),
            Encoding::Raw => Raw.encode(bytes),
        }
    }

    fn decode(&self, text: &str) -> EncodingResult<Vec<u8>> {
        match self {
            Encoding::Hex => Hex.decode(text),
            Encoding::Base64 => Base64.decode(text),
            Encoding::Raw => Raw.decode(text),
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "raw" => Ok(Encoding::Raw),
            other => Err(EncodingError::UnknownEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
