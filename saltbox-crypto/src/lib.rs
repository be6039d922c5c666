//! NaCl-style boxes for saltbox.
//!
//! Provides authenticated encryption using:
//! - XSalsa20-Poly1305 for shared-key boxes ([`SecretBox`])
//! - X25519 + XSalsa20-Poly1305 for anonymous sealed boxes ([`SealedBox`])
//! - X25519 + XSalsa20-Poly1305 between two key pairs ([`PublicBox`])
//!
//! # Key handling
//!
//! Keys are validated when a box is built, never at first use. A key of the
//! wrong length, or one that was not supplied, fails with an invalid-key
//! error before any primitive runs. Boxes own copies of their keys and
//! secret material is zeroized on drop.
//!
//! Textual keys go through [`saltbox_encoding`] first:
//!
//! ```
//! use saltbox_crypto::SecretBox;
//! use saltbox_encoding::Hex;
//!
//! let secret_box = SecretBox::from_encoded(
//!     "1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389",
//!     &Hex,
//! )
//! .unwrap();
//! let nonce = saltbox_crypto::generate_nonce();
//! let ciphertext = secret_box.encrypt(&nonce, b"hello").unwrap();
//! assert_eq!(secret_box.decrypt(&nonce, &ciphertext).unwrap(), b"hello");
//! ```
//!
//! # Failures
//!
//! Decryption either returns the exact plaintext or
//! [`CryptoError::Authentication`]. The error is the same for a forged tag,
//! a truncated ciphertext and a wrong key, and never carries partial output.

mod error;
pub mod keys;
pub mod public_box;
pub mod random;
pub mod sealed_box;
pub mod secret_box;

pub use error::{CryptoError, CryptoResult};
pub use keys::{
    validate_key, KeyPair, PrivateKey, PublicKey, SecretKey, BOX_PUBLICKEY_BYTES,
    BOX_SECRETKEY_BYTES, SECRETBOX_KEY_BYTES,
};
pub use public_box::{PublicBox, BOX_MAC_BYTES, BOX_NONCE_BYTES};
pub use random::{generate_nonce, generate_secret_key, random_bytes};
pub use sealed_box::{SealedBox, SEALBOX_OVERHEAD_BYTES};
pub use secret_box::{SecretBox, SECRETBOX_MAC_BYTES, SECRETBOX_NONCE_BYTES};
