//! Crypto error types.

use saltbox_encoding::EncodingError;
use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in box construction, encryption and decryption.
///
/// Every decryption failure surfaces as [`CryptoError::Authentication`] with
/// the same message, whatever the cause (forged tag, truncated input, wrong
/// key, wrong nonce).
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("key material not provided")]
    MissingKeyMaterial,

    #[error("private key does not match public key")]
    KeyMismatch,

    #[error("public key is a low-order point")]
    LowOrderPublicKey,

    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonce { expected: usize, actual: usize },

    #[error("decryption failed: ciphertext could not be authenticated")]
    Authentication,

    #[error("decryption requires a private key")]
    MissingKey,

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("key decoding failed: {0}")]
    Encoding(#[from] EncodingError),
}

impl CryptoError {
    /// True for every variant that means "this key cannot be used":
    /// wrong length, absent, inconsistent with its pair, or a low-order point.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidKey { .. }
                | CryptoError::MissingKeyMaterial
                | CryptoError::KeyMismatch
                | CryptoError::LowOrderPublicKey
        )
    }
}
