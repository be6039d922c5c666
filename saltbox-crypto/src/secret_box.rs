//! Symmetric authenticated encryption (XSalsa20-Poly1305).
//!
//! One shared key, a caller-supplied 24-byte nonce, and a 16-byte Poly1305
//! tag placed in front of the encrypted message:
//!
//! ```text
//! ciphertext = tag:16 || encrypted_message
//! ```
//!
//! The byte layout matches NaCl `crypto_secretbox` / libsodium
//! `crypto_secretbox_easy`.
//!
//! A nonce must never be used twice with the same key. The box does not keep
//! a nonce history; callers either generate nonces with
//! [`generate_nonce`](crate::random::generate_nonce) or derive them from a
//! counter they own.

use crate::error::{CryptoError, CryptoResult};
use crate::keys::SecretKey;
use crate::random::generate_secret_key;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};
use saltbox_encoding::Encoder;
use std::fmt;
use tracing::debug;

/// Length of a secret-box nonce, in bytes.
pub const SECRETBOX_NONCE_BYTES: usize = 24;
/// Length of the Poly1305 authentication tag, in bytes.
pub const SECRETBOX_MAC_BYTES: usize = 16;

/// Checks a nonce length for any of the XSalsa20 boxes.
pub(crate) fn check_nonce(nonce: &[u8]) -> CryptoResult<&[u8]> {
    if nonce.len() != SECRETBOX_NONCE_BYTES {
        return Err(CryptoError::InvalidNonce {
            expected: SECRETBOX_NONCE_BYTES,
            actual: nonce.len(),
        });
    }
    Ok(nonce)
}

/// Shared-key box. Holds its own copy of the key.
#[derive(Clone)]
pub struct SecretBox {
    key: SecretKey,
}

impl SecretBox {
    /// Builds a box over `key`, which must be exactly `SECRETBOX_KEY_BYTES`.
    ///
    /// The length is checked here, not at first use.
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        Ok(Self::with_key(SecretKey::from_bytes(key)?))
    }

    pub fn from_key(key: &SecretKey) -> Self {
        Self::with_key(key.clone())
    }

    /// Decodes a textual key (hex, base64, ...) and builds a box over it.
    pub fn from_encoded(key: &str, encoder: &impl Encoder) -> CryptoResult<Self> {
        Ok(Self::with_key(SecretKey::from_encoded(key, encoder)?))
    }

    /// Builds a box over a fresh random key.
    pub fn generate() -> Self {
        Self::with_key(generate_secret_key())
    }

    fn with_key(key: SecretKey) -> Self {
        debug!("secret box created");
        Self { key }
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    fn cipher(&self) -> XSalsa20Poly1305 {
        XSalsa20Poly1305::new(self.key.as_bytes().into())
    }

    /// Encrypts and authenticates `message` under this box's key and `nonce`.
    ///
    /// Deterministic: the same key, nonce and message always give the same
    /// output.
    pub fn encrypt(&self, nonce: &[u8], message: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = check_nonce(nonce)?;
        let ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(nonce), message)
            .map_err(|e| CryptoError::Encryption(format!("secret box seal failed: {e}")))?;
        debug!(
            message_len = message.len(),
            ciphertext_len = ciphertext.len(),
            "secret box encrypted"
        );
        Ok(ciphertext)
    }

    /// Verifies and decrypts `ciphertext`.
    ///
    /// Any mismatch (forged or truncated ciphertext, wrong key, wrong nonce)
    /// returns [`CryptoError::Authentication`] and no plaintext.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = check_nonce(nonce)?;
        if ciphertext.len() < SECRETBOX_MAC_BYTES {
            debug!("secret box open rejected");
            return Err(CryptoError::Authentication);
        }
        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                debug!("secret box open rejected");
                CryptoError::Authentication
            })?;
        debug!(plaintext_len = plaintext.len(), "secret box decrypted");
        Ok(plaintext)
    }
}

impl fmt::Debug for SecretBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBox").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SECRETBOX_KEY_BYTES;

    #[test]
    fn zero_key_and_nonce_known_answer() {
        let secret_box = SecretBox::new(&[0u8; SECRETBOX_KEY_BYTES]).unwrap();
        let nonce = [0u8; SECRETBOX_NONCE_BYTES];

        let ciphertext = secret_box.encrypt(&nonce, b"secret message").unwrap();
        assert_eq!(
            hex::encode(&ciphertext),
            "c35dced9341ec298e171a2279fb51d31b55bd88d9bf1ee418ead84bd2591"
        );
        assert_eq!(secret_box.decrypt(&nonce, &ciphertext).unwrap(), b"secret message");
    }

    #[test]
    fn short_nonce_rejected() {
        let secret_box = SecretBox::generate();
        let err = secret_box.encrypt(&[0u8; 12], b"data").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidNonce {
                expected: 24,
                actual: 12
            }
        ));
    }

    #[test]
    fn ciphertext_shorter_than_tag_is_authentication_failure() {
        let secret_box = SecretBox::generate();
        let nonce = [1u8; SECRETBOX_NONCE_BYTES];
        let err = secret_box.decrypt(&nonce, &[0u8; SECRETBOX_MAC_BYTES - 1]).unwrap_err();
        assert!(matches!(err, CryptoError::Authentication));
    }

    #[test]
    fn tag_only_ciphertext_opens_to_empty_message() {
        let secret_box = SecretBox::generate();
        let nonce = [2u8; SECRETBOX_NONCE_BYTES];
        let ciphertext = secret_box.encrypt(&nonce, b"").unwrap();
        assert_eq!(ciphertext.len(), SECRETBOX_MAC_BYTES);
        assert!(secret_box.decrypt(&nonce, &ciphertext).unwrap().is_empty());
    }
}
