//! Shared-secret edit keys.
//!
//! Whoever creates a recipe chooses a key; presenting the same key later
//! authorizes editing or deleting that recipe. Keys are stored as salted
//! SHA-256 digests in the form `hex(salt)$hex(digest)`.

use std::fmt;

use rand::Rng;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const SEPARATOR: char = '$';

/// Errors raised when decoding a stored digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditKeyHashError {
    /// The encoded value lacks the salt separator.
    #[error("edit key digest is missing the salt separator")]
    MissingSeparator,
    /// Salt or digest is not valid hex of the expected length.
    #[error("edit key digest has a malformed {part}")]
    Malformed {
        /// Which half failed to decode.
        part: &'static str,
    },
}

/// Plaintext key as submitted by a client. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct EditKey(String);

impl EditKey {
    /// Wrap a submitted key verbatim; no trimming is applied.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Whether the submitted key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Plaintext value, for round-tripping through the edit form.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for EditKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for EditKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditKey(..)")
    }
}

/// Salted digest of an [`EditKey`].
///
/// # Examples
/// ```
/// use veggie_patch::domain::{EditKey, EditKeyHash};
///
/// let stored = EditKeyHash::derive(&EditKey::new("basil"));
/// assert!(stored.verify(&EditKey::new("basil")));
/// assert!(!stored.verify(&EditKey::new("Basil")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditKeyHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl EditKeyHash {
    /// Digest `key` under a fresh random salt.
    pub fn derive(key: &EditKey) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill(&mut salt);
        Self::with_salt(key, salt)
    }

    /// Digest `key` under a caller-chosen salt.
    pub fn with_salt(key: &EditKey, salt: [u8; SALT_LEN]) -> Self {
        Self {
            salt,
            digest: digest(&salt, key),
        }
    }

    /// Check a submitted key against the stored digest.
    pub fn verify(&self, key: &EditKey) -> bool {
        let candidate = digest(&self.salt, key);
        // Compare every byte so timing does not reveal the matching prefix.
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Encode as `hex(salt)$hex(digest)` for storage.
    pub fn encode(&self) -> String {
        format!("{}{SEPARATOR}{}", hex::encode(self.salt), hex::encode(self.digest))
    }

    /// Decode the storage form produced by [`EditKeyHash::encode`].
    pub fn decode(encoded: &str) -> Result<Self, EditKeyHashError> {
        let (salt, digest) = encoded
            .split_once(SEPARATOR)
            .ok_or(EditKeyHashError::MissingSeparator)?;
        Ok(Self {
            salt: decode_fixed(salt, "salt")?,
            digest: decode_fixed(digest, "digest")?,
        })
    }
}

fn digest(salt: &[u8; SALT_LEN], key: &EditKey) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

fn decode_fixed<const N: usize>(
    raw: &str,
    part: &'static str,
) -> Result<[u8; N], EditKeyHashError> {
    let mut out = [0_u8; N];
    hex::decode_to_slice(raw, &mut out).map_err(|_| EditKeyHashError::Malformed { part })?;
    Ok(out)
}
