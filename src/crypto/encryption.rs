//! AES-256-GCM authenticated encryption of a single blob.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce.  Unlike a
//! single nonce-prefixed buffer, the nonce and ciphertext are kept apart in
//! an [`Envelope`] because they are persisted as separate fields
//! (`iv` and `ciphertext`).
//!
//! Layout of `Envelope::ciphertext`:
//!   [ ciphertext | 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::keys::VaultKey;
use crate::errors::{DecryptError, Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// One encrypted blob: the nonce it was sealed under plus the
/// ciphertext with its tag appended.  Neither field is secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Rebuild an envelope from raw stored parts.
    ///
    /// Fails if the nonce is not exactly 12 bytes.
    pub fn from_parts(nonce: &[u8], ciphertext: Vec<u8>) -> std::result::Result<Self, DecryptError> {
        let nonce: [u8; NONCE_LEN] = nonce.try_into().map_err(|_| {
            DecryptError::Encoding(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce.len()
            ))
        })?;
        Ok(Self { nonce, ciphertext })
    }
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
pub fn seal(plaintext: &[u8], key: &VaultKey) -> Result<Envelope> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("encryption error: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&nonce);

    Ok(Envelope {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt and verify an envelope.
///
/// A tag mismatch is the only signal of a wrong master password, so every
/// failure here maps to `DecryptError::Authentication`.
pub fn open(
    envelope: &Envelope,
    key: &VaultKey,
) -> std::result::Result<Zeroizing<Vec<u8>>, DecryptError> {
    if envelope.ciphertext.len() < TAG_LEN {
        return Err(DecryptError::Authentication);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| DecryptError::Authentication)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), envelope.ciphertext.as_slice())
        .map_err(|_| DecryptError::Authentication)?;

    Ok(Zeroizing::new(plaintext))
}
