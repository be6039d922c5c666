//! Key material: validation, fixed-length key types and Curve25519 key pairs.
//!
//! Every key is copied into a fixed-size array at construction, after its
//! length has been checked. Nothing downstream ever sees a key of the wrong
//! length, and an absent key is rejected here rather than by the primitive.

use crate::error::{CryptoError, CryptoResult};
use crypto_box::{PublicKey as CurvePublicKey, SecretKey as CurveSecretKey};
use rand::rngs::OsRng;
use saltbox_encoding::Encoder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use x25519_dalek::{PublicKey as DalekPublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a symmetric secret-box key, in bytes.
pub const SECRETBOX_KEY_BYTES: usize = 32;
/// Length of a Curve25519 public key, in bytes.
pub const BOX_PUBLICKEY_BYTES: usize = 32;
/// Length of a Curve25519 private key, in bytes.
pub const BOX_SECRETKEY_BYTES: usize = 32;

/// Checks that key material is present and exactly `expected_len` bytes long.
///
/// `None` stands for a key that was never supplied.
pub fn validate_key(bytes: Option<&[u8]>, expected_len: usize) -> CryptoResult<&[u8]> {
    let bytes = bytes.ok_or(CryptoError::MissingKeyMaterial)?;
    if bytes.len() != expected_len {
        return Err(CryptoError::InvalidKey {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

fn to_array<const N: usize>(bytes: &[u8]) -> CryptoResult<[u8; N]> {
    let bytes = validate_key(Some(bytes), N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Whether X25519(`private_key`, `public_key`) depends on the private key.
///
/// Low-order public keys (all zeros among them) give an all-zero shared
/// secret for every private key.
pub(crate) fn is_contributory(private_key: &PrivateKey, public_key: &PublicKey) -> bool {
    StaticSecret::from(private_key.0)
        .diffie_hellman(&DalekPublicKey::from(public_key.0))
        .was_contributory()
}

fn decode_then<T>(
    text: &str,
    encoder: &impl Encoder,
    build: impl FnOnce(&[u8]) -> CryptoResult<T>,
) -> CryptoResult<T> {
    let mut bytes = encoder.decode(text)?;
    let result = build(&bytes);
    bytes.zeroize();
    result
}

/// Symmetric key for [`SecretBox`](crate::SecretBox).
///
/// Zeroized on drop. `Debug` never prints the key bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRETBOX_KEY_BYTES]);

impl SecretKey {
    /// Copies a key out of `bytes`, which must be `SECRETBOX_KEY_BYTES` long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        Ok(Self(to_array(bytes)?))
    }

    /// Decodes `text` with `encoder`, then validates it as a secret key.
    pub fn from_encoded(text: &str, encoder: &impl Encoder) -> CryptoResult<Self> {
        decode_then(text, encoder, Self::from_bytes)
    }

    pub(crate) fn from_array(bytes: [u8; SECRETBOX_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Read-only view of the key bytes.
    pub fn as_bytes(&self) -> &[u8; SECRETBOX_KEY_BYTES] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Curve25519 public key.
///
/// Serializes as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; BOX_PUBLICKEY_BYTES]);

impl PublicKey {
    /// Copies a key out of `bytes`, which must be `BOX_PUBLICKEY_BYTES` long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        Ok(Self(to_array(bytes)?))
    }

    /// Decodes `text` with `encoder`, then validates it as a public key.
    pub fn from_encoded(text: &str, encoder: &impl Encoder) -> CryptoResult<Self> {
        decode_then(text, encoder, Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BOX_PUBLICKEY_BYTES] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; BOX_PUBLICKEY_BYTES] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// True for points of order dividing 8, which no key exchange should
    /// accept.
    ///
    /// Any clamped scalar is a multiple of the cofactor, so a fixed one maps
    /// every low-order point, and only those, to zero.
    pub fn is_low_order(&self) -> bool {
        !is_contributory(&PrivateKey([1u8; BOX_SECRETKEY_BYTES]), self)
    }

    pub(crate) fn to_curve(self) -> CurvePublicKey {
        CurvePublicKey::from(self.0)
    }
}

impl From<[u8; BOX_PUBLICKEY_BYTES]> for PublicKey {
    fn from(bytes: [u8; BOX_PUBLICKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Curve25519 private key.
///
/// Zeroized on drop. `Debug` never prints the key bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; BOX_SECRETKEY_BYTES]);

impl PrivateKey {
    /// Copies a key out of `bytes`, which must be `BOX_SECRETKEY_BYTES` long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        Ok(Self(to_array(bytes)?))
    }

    /// Decodes `text` with `encoder`, then validates it as a private key.
    pub fn from_encoded(text: &str, encoder: &impl Encoder) -> CryptoResult<Self> {
        decode_then(text, encoder, Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BOX_SECRETKEY_BYTES] {
        &self.0
    }

    /// Derives the matching public key (X25519 base-point multiplication).
    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.to_curve().public_key().as_bytes())
    }

    pub(crate) fn to_curve(&self) -> CurveSecretKey {
        CurveSecretKey::from(self.0)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// A Curve25519 private key together with its public key.
///
/// The public half is always derived from the private half, so the pair can
/// never be inconsistent.
#[derive(Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generates a fresh key pair from the OS random number generator.
    pub fn generate() -> Self {
        let secret = CurveSecretKey::generate(&mut OsRng);
        let mut bytes = secret.to_bytes();
        let private_key = PrivateKey(bytes);
        bytes.zeroize();
        Self::from_private(private_key)
    }

    /// Rebuilds a key pair from private key bytes.
    pub fn from_private_key(bytes: &[u8]) -> CryptoResult<Self> {
        Ok(Self::from_private(PrivateKey::from_bytes(bytes)?))
    }

    /// Decodes `text` with `encoder`, then rebuilds the pair from it.
    pub fn from_encoded(text: &str, encoder: &impl Encoder) -> CryptoResult<Self> {
        decode_then(text, encoder, Self::from_private_key)
    }

    fn from_private(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private_key: PrivateKey) -> Self {
        Self::from_private(private_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key)
            .finish()
    }
}
