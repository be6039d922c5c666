//! Text encodings for saltbox.
//!
//! Keys, nonces and messages enter the crypto layer as raw bytes. This crate
//! is the decode step in front of it: a textual key (for example a hex string
//! pasted from a config file) is decoded here, then handed to a byte-only
//! constructor.
//!
//! - [`Hex`]: lowercase hex, decoding accepts either case
//! - [`Base64`]: standard alphabet with padding
//! - [`Raw`]: the UTF-8 bytes of the text itself
//!
//! [`Encoding`] selects one of them at runtime and can be deserialized from
//! configuration.

mod encoder;
mod encoding;
mod error;

pub use encoder::{Base64, Encoder, Hex, Raw};
pub use encoding::Encoding;
pub use error::{EncodingError, EncodingResult};
