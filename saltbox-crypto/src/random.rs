//! Secure randomness for keys and nonces.
//!
//! Everything here draws from the operating system generator.

use crate::keys::{SecretKey, SECRETBOX_KEY_BYTES};
use crate::secret_box::SECRETBOX_NONCE_BYTES;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// Returns `len` random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random nonce for [`SecretBox`](crate::SecretBox) or
/// [`PublicBox`](crate::PublicBox).
///
/// 24 random bytes are enough that collisions can be ignored.
pub fn generate_nonce() -> [u8; SECRETBOX_NONCE_BYTES] {
    let mut nonce = [0u8; SECRETBOX_NONCE_BYTES];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Random symmetric key.
pub fn generate_secret_key() -> SecretKey {
    let mut bytes = [0u8; SECRETBOX_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let key = SecretKey::from_array(bytes);
    bytes.zeroize();
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_has_requested_length() {
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(100).len(), 100);
    }

    #[test]
    fn nonces_differ() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn keys_differ() {
        assert_ne!(generate_secret_key().as_bytes(), generate_secret_key().as_bytes());
    }
}
