//! Anonymous public-key encryption ("sealed boxes").
//!
//! Uses X25519 key exchange + XSalsa20-Poly1305. A fresh ephemeral key pair
//! is generated for every message, so the sender needs no long-term key and
//! stays anonymous. The recipient reconstructs the shared key from the
//! ephemeral public key carried in front of the ciphertext.
//!
//! ```text
//! nonce  = blake2b-192(ephemeral_pk || recipient_pk)
//! output = ephemeral_pk:32 || tag:16 || encrypted_message
//! ```
//!
//! The format is the one produced by libsodium `crypto_box_seal`.

use crate::error::{CryptoError, CryptoResult};
use crate::keys::{
    is_contributory, validate_key, KeyPair, PrivateKey, PublicKey, BOX_PUBLICKEY_BYTES,
};
use crate::secret_box::SECRETBOX_MAC_BYTES;
use blake2::digest::consts::U24;
use blake2::{Blake2b, Digest};
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use std::fmt;
use tracing::debug;

/// Bytes a sealed box adds to the message: ephemeral public key plus tag.
pub const SEALBOX_OVERHEAD_BYTES: usize = BOX_PUBLICKEY_BYTES + SECRETBOX_MAC_BYTES;

/// Derives the per-message nonce from both public keys.
///
/// Distinct ephemeral keys give distinct nonces, so no nonce is ever reused
/// under the same shared key.
fn seal_nonce(ephemeral_pk: &PublicKey, recipient_pk: &PublicKey) -> [u8; 24] {
    let mut hasher = Blake2b::<U24>::new();
    hasher.update(ephemeral_pk.as_bytes());
    hasher.update(recipient_pk.as_bytes());
    hasher.finalize().into()
}

/// Sealed box addressed to one recipient.
///
/// Built with only the recipient's public key it can encrypt; built with the
/// recipient's private key as well it can also decrypt.
#[derive(Clone)]
pub struct SealedBox {
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
}

impl SealedBox {
    /// Encrypt-only box for `recipient_public_key`.
    pub fn new(recipient_public_key: &[u8]) -> CryptoResult<Self> {
        Self::from_parts(Some(recipient_public_key), None)
    }

    /// Encrypt-and-decrypt box for the owner of `recipient_private_key`.
    pub fn with_private_key(
        recipient_public_key: &[u8],
        recipient_private_key: &[u8],
    ) -> CryptoResult<Self> {
        Self::from_parts(Some(recipient_public_key), Some(recipient_private_key))
    }

    /// General constructor; `None` means the key was not supplied.
    ///
    /// The public key is required and must not be a low-order point
    /// ([`CryptoError::LowOrderPublicKey`]). When a private key is given it
    /// must be the one the public key was derived from, otherwise
    /// [`CryptoError::KeyMismatch`] is returned. This also catches the two
    /// keys being passed in swapped order.
    pub fn from_parts(
        recipient_public_key: Option<&[u8]>,
        recipient_private_key: Option<&[u8]>,
    ) -> CryptoResult<Self> {
        let public_key =
            PublicKey::from_bytes(validate_key(recipient_public_key, BOX_PUBLICKEY_BYTES)?)?;
        let private_key = recipient_private_key
            .map(PrivateKey::from_bytes)
            .transpose()?;
        Self::from_keys(public_key, private_key)
    }

    /// Encrypt-only box over an already parsed key.
    ///
    /// A low-order key is only caught by [`Self::encrypt`].
    pub fn from_public_key(recipient: &PublicKey) -> Self {
        debug!(can_decrypt = false, "sealed box created");
        Self {
            public_key: *recipient,
            private_key: None,
        }
    }

    pub fn from_key_pair(recipient: &KeyPair) -> Self {
        debug!(can_decrypt = true, "sealed box created");
        Self {
            public_key: *recipient.public_key(),
            private_key: Some(recipient.private_key().clone()),
        }
    }

    fn from_keys(public_key: PublicKey, private_key: Option<PrivateKey>) -> CryptoResult<Self> {
        if public_key.is_low_order() {
            return Err(CryptoError::LowOrderPublicKey);
        }
        if let Some(private_key) = &private_key {
            if private_key.public_key() != public_key {
                return Err(CryptoError::KeyMismatch);
            }
        }
        debug!(can_decrypt = private_key.is_some(), "sealed box created");
        Ok(Self {
            public_key,
            private_key,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether this box was given the private key needed by [`Self::decrypt`].
    pub fn can_decrypt(&self) -> bool {
        self.private_key.is_some()
    }

    /// Seals `message` for the recipient under a fresh ephemeral key pair.
    ///
    /// Fails with [`CryptoError::LowOrderPublicKey`] if the recipient key
    /// would make the shared key independent of the ephemeral private key.
    pub fn encrypt(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        let ephemeral = KeyPair::generate();
        self.encrypt_with_ephemeral(&ephemeral, message)
    }

    fn encrypt_with_ephemeral(&self, ephemeral: &KeyPair, message: &[u8]) -> CryptoResult<Vec<u8>> {
        if !is_contributory(ephemeral.private_key(), &self.public_key) {
            return Err(CryptoError::LowOrderPublicKey);
        }
        let nonce = seal_nonce(ephemeral.public_key(), &self.public_key);
        let salsa_box = SalsaBox::new(&self.public_key.to_curve(), &ephemeral.private_key().to_curve());

        let ciphertext = salsa_box
            .encrypt(crypto_box::Nonce::from_slice(&nonce), message)
            .map_err(|e| CryptoError::Encryption(format!("sealed box seal failed: {e}")))?;

        let mut output = Vec::with_capacity(BOX_PUBLICKEY_BYTES + ciphertext.len());
        output.extend_from_slice(ephemeral.public_key().as_bytes());
        output.extend_from_slice(&ciphertext);

        debug!(
            message_len = message.len(),
            ciphertext_len = output.len(),
            "sealed box encrypted"
        );
        Ok(output)
    }

    /// Opens a sealed box with the recipient's private key.
    ///
    /// Returns [`CryptoError::MissingKey`] if this box has no private key.
    /// Every other failure, including a ciphertext meant for someone else,
    /// is [`CryptoError::Authentication`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        let private_key = self.private_key.as_ref().ok_or(CryptoError::MissingKey)?;

        if ciphertext.len() < SEALBOX_OVERHEAD_BYTES {
            debug!("sealed box open rejected");
            return Err(CryptoError::Authentication);
        }

        let (ephemeral_bytes, boxed) = ciphertext.split_at(BOX_PUBLICKEY_BYTES);
        let ephemeral_pk =
            PublicKey::from_bytes(ephemeral_bytes).map_err(|_| CryptoError::Authentication)?;
        if !is_contributory(private_key, &ephemeral_pk) {
            debug!("sealed box open rejected");
            return Err(CryptoError::Authentication);
        }
        let nonce = seal_nonce(&ephemeral_pk, &self.public_key);
        let salsa_box = SalsaBox::new(&ephemeral_pk.to_curve(), &private_key.to_curve());

        let plaintext = salsa_box
            .decrypt(crypto_box::Nonce::from_slice(&nonce), boxed)
            .map_err(|_| {
                debug!("sealed box open rejected");
                CryptoError::Authentication
            })?;
        debug!(plaintext_len = plaintext.len(), "sealed box decrypted");
        Ok(plaintext)
    }
}

impl fmt::Debug for SealedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedBox")
            .field("public_key", &self.public_key)
            .field("can_decrypt", &self.can_decrypt())
            .finish()
    }
}
