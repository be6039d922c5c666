//! Authenticated public-key encryption between two key pairs.
//!
//! Both parties hold a long-term Curve25519 key pair. The shared key is
//! X25519(our_private, their_public) run through HSalsa20, computed once when
//! the box is built. Messages use the same nonce rules and tag-first layout
//! as [`SecretBox`](crate::SecretBox); output is compatible with libsodium
//! `crypto_box_easy`.

use crate::error::{CryptoError, CryptoResult};
use crate::keys::{is_contributory, PrivateKey, PublicKey};
use crate::secret_box::{check_nonce, SECRETBOX_MAC_BYTES, SECRETBOX_NONCE_BYTES};
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use saltbox_encoding::Encoder;
use std::fmt;
use tracing::debug;

/// Length of a public-box nonce, in bytes.
pub const BOX_NONCE_BYTES: usize = SECRETBOX_NONCE_BYTES;
/// Length of a public-box authentication tag, in bytes.
pub const BOX_MAC_BYTES: usize = SECRETBOX_MAC_BYTES;

/// Box between "us" (private key) and "them" (public key).
///
/// A message encrypted by A's box for B opens with B's box for A.
#[derive(Clone)]
pub struct PublicBox {
    salsa_box: SalsaBox,
}

impl PublicBox {
    pub fn new(their_public_key: &[u8], our_private_key: &[u8]) -> CryptoResult<Self> {
        let their_public_key = PublicKey::from_bytes(their_public_key)?;
        let our_private_key = PrivateKey::from_bytes(our_private_key)?;
        Self::from_keys(&their_public_key, &our_private_key)
    }

    /// Fails with [`CryptoError::LowOrderPublicKey`] when `their_public_key`
    /// would give a shared key that does not depend on `our_private_key`.
    pub fn from_keys(
        their_public_key: &PublicKey,
        our_private_key: &PrivateKey,
    ) -> CryptoResult<Self> {
        if !is_contributory(our_private_key, their_public_key) {
            return Err(CryptoError::LowOrderPublicKey);
        }
        debug!("public box created");
        Ok(Self {
            salsa_box: SalsaBox::new(&their_public_key.to_curve(), &our_private_key.to_curve()),
        })
    }

    /// Decodes both keys with `encoder`, then builds the box.
    pub fn from_encoded(
        their_public_key: &str,
        our_private_key: &str,
        encoder: &impl Encoder,
    ) -> CryptoResult<Self> {
        let their_public_key = PublicKey::from_encoded(their_public_key, encoder)?;
        let our_private_key = PrivateKey::from_encoded(our_private_key, encoder)?;
        Self::from_keys(&their_public_key, &our_private_key)
    }

    pub fn encrypt(&self, nonce: &[u8], message: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = check_nonce(nonce)?;
        let ciphertext = self
            .salsa_box
            .encrypt(crypto_box::Nonce::from_slice(nonce), message)
            .map_err(|e| CryptoError::Encryption(format!("public box seal failed: {e}")))?;
        debug!(
            message_len = message.len(),
            ciphertext_len = ciphertext.len(),
            "public box encrypted"
        );
        Ok(ciphertext)
    }

    /// Fails with [`CryptoError::Authentication`] on any tampering or key
    /// mismatch.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = check_nonce(nonce)?;
        if ciphertext.len() < BOX_MAC_BYTES {
            debug!("public box open rejected");
            return Err(CryptoError::Authentication);
        }
        self.salsa_box
            .decrypt(crypto_box::Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                debug!("public box open rejected");
                CryptoError::Authentication
            })
    }
}

impl fmt::Debug for PublicBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PublicBox([REDACTED])")
    }
}
