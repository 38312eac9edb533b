//! Cryptographic primitives for OpenSesame.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The zeroizing `VaultKey` and `MasterSecret` types (`keys`)
//! - AES-256-GCM sealing and opening of envelopes (`encryption`)
//! - Base64 transcoding for persisted bytes (`codec`)

pub mod codec;
pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive, seal, open, Envelope, ...};
pub use codec::{from_text, to_text};
pub use encryption::{open, seal, Envelope, NONCE_LEN};
pub use kdf::{derive, derive_with_params, generate_salt, KdfParams, SaltSource};
pub use keys::{MasterSecret, VaultKey};
