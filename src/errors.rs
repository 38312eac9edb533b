use thiserror::Error;

/// Why a single stored item could not be turned back into plaintext.
///
/// These are recoverable per item: bulk decryption records them next to
/// the item's metadata and carries on with the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// The AEAD tag did not verify: wrong key, wrong nonce, or tampered data.
    #[error("Decryption failed — wrong master password or corrupted data")]
    Authentication,

    /// Authentication succeeded but the plaintext is not a valid record.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The stored nonce or ciphertext could not be decoded.
    #[error("Invalid encoding: {0}")]
    Encoding(String),
}

/// All errors that can occur in OpenSesame.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    // --- Session errors ---
    #[error("Not signed in — log in first")]
    NotAuthenticated,

    #[error("Vault is locked — unlock it with your master password")]
    VaultLocked,

    // --- Vault errors ---
    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl VaultError {
    /// Returns `true` when the error means the tag did not verify.
    ///
    /// Callers use this to show "check your master password" rather than a
    /// generic failure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, VaultError::Decrypt(DecryptError::Authentication))
    }
}

/// Convenience type alias for OpenSesame results.
pub type Result<T> = std::result::Result<T, VaultError>;
