//! In-memory key material: the derived `VaultKey` and the typed
//! `MasterSecret`.
//!
//! Both wrap their bytes so that the backing memory is zeroed when the
//! value is dropped.  Neither type implements `Clone`, `Serialize`, or a
//! `Debug` that reveals its contents.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of the vault key in bytes (256 bits, for AES-256-GCM).
pub const KEY_LEN: usize = 32;

/// A 256-bit AES-256-GCM key derived from the master password.
///
/// Only [`crate::crypto::kdf::derive`] can build one, and only the session
/// is expected to hold it.  The bytes never leave the crate: the cipher
/// borrows them for the duration of a single seal/open call.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Constant-time comparison, so tests and callers can check key identity
/// without a timing side channel.
impl PartialEq for VaultKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for VaultKey {}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}

/// The user's typed master password.
///
/// Held only for the duration of a derive or unlock call and wiped on drop.
pub struct MasterSecret(Zeroizing<String>);

impl MasterSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Zeroizing<String>> for MasterSecret {
    fn from(secret: Zeroizing<String>) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_shows_key_bytes() {
        let key = VaultKey::from_bytes([0xAB; KEY_LEN]);
        let rendered = format!("{key:?}");
        assert_eq!(rendered, "VaultKey(<redacted>)");
        assert!(!rendered.contains("171"));
    }

    #[test]
    fn debug_output_never_shows_master_secret() {
        let secret = MasterSecret::new("Tr0ub4dor&3");
        assert!(!format!("{secret:?}").contains("Tr0ub4dor"));
    }

    #[test]
    fn keys_compare_by_value() {
        assert_eq!(
            VaultKey::from_bytes([1; KEY_LEN]),
            VaultKey::from_bytes([1; KEY_LEN])
        );
        assert_ne!(
            VaultKey::from_bytes([1; KEY_LEN]),
            VaultKey::from_bytes([2; KEY_LEN])
        );
    }

    #[test]
    fn zeroize_clears_key_bytes() {
        let mut key = VaultKey::from_bytes([0x5A; KEY_LEN]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }
}
