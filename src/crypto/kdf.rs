//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault key is re-derived on every login and unlock from the master
//! password and the account's email address.  Using the email as the salt
//! means the same key comes back on any device without a server-side salt
//! record.  The tradeoff is a lower-entropy, predictable salt; switching to
//! a random salt now would orphan every existing ciphertext, so the
//! deterministic salt is kept on purpose.

use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{MasterSecret, VaultKey, KEY_LEN};
use crate::errors::{Result, VaultError};

/// Length of a randomly generated salt in bytes.
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count.  Also the minimum accepted.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// PBKDF2 parameters.
///
/// These are process-wide constants in practice: every existing
/// ciphertext was sealed under a key derived with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

/// The salt fed into PBKDF2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaltSource {
    /// Random bytes, used once for a brand-new account.
    Random(Vec<u8>),
    /// The account's email (or equivalent), used verbatim as UTF-8 bytes.
    Identity(String),
}

impl SaltSource {
    /// Build a deterministic salt from an account identity string.
    ///
    /// The string is used byte-for-byte: no trimming, no case folding.
    pub fn identity(email: impl Into<String>) -> Self {
        SaltSource::Identity(email.into())
    }

    /// Generate a fresh random salt.
    pub fn random() -> Self {
        SaltSource::Random(generate_salt().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SaltSource::Random(bytes) => bytes,
            SaltSource::Identity(email) => email.as_bytes(),
        }
    }
}

/// Derive the vault key from a master secret and salt with default params.
pub fn derive(secret: &MasterSecret, salt: &SaltSource) -> Result<VaultKey> {
    derive_with_params(secret, salt, &KdfParams::default())
}

/// Derive the vault key with explicit PBKDF2 parameters.
///
/// Same secret + salt + params always yields the same key.  Rejects an
/// empty secret, an empty salt, or an iteration count below the floor.
pub fn derive_with_params(
    secret: &MasterSecret,
    salt: &SaltSource,
    params: &KdfParams,
) -> Result<VaultKey> {
    if secret.is_empty() {
        return Err(VaultError::Derivation("master password is empty".into()));
    }
    let salt = salt.as_bytes();
    if salt.is_empty() {
        return Err(VaultError::Derivation("salt is empty".into()));
    }
    if params.iterations < PBKDF2_ITERATIONS {
        return Err(VaultError::Derivation(format!(
            "PBKDF2 iterations must be at least {PBKDF2_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut okm = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret.as_bytes(), salt, params.iterations, &mut okm)
        .map_err(|e| VaultError::Derivation(format!("PBKDF2 failed: {e}")))?;

    let key = VaultKey::from_bytes(okm);
    okm.zeroize();
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
