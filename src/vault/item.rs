//! Vault item types.
//!
//! `ItemFields` is the secret part of an item and the only thing that
//! gets encrypted.  Its JSON form (`title`, `username`, `password`, `url`,
//! `notes`) is the canonical byte form sealed into every envelope.
//! `ItemMeta` is what the storage layer contributes and can see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::DecryptError;

/// The decrypted, structured content of a vault item.
///
/// Wiped from memory on drop.  Missing fields parse as empty strings.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ItemFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub username: String,
    /// The stored password.
    #[serde(default, rename = "password")]
    pub secret: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
}

impl ItemFields {
    pub fn new(title: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            username: String::new(),
            secret: secret.into(),
            url: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Only the title is printed; the rest may be secret.
impl std::fmt::Debug for ItemFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemFields")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Non-secret metadata contributed by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMeta {
    pub id: String,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
}

/// A fully decrypted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultItem {
    pub meta: ItemMeta,
    pub fields: ItemFields,
}

impl VaultItem {
    pub fn id(&self) -> &str {
        &self.meta.id
    }
}

/// Placeholder for an item whose envelope did not open.
///
/// Carries the plaintext title from storage and the metadata, but no
/// secret fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undecryptable {
    pub meta: ItemMeta,
    pub title: String,
    pub reason: DecryptError,
}

/// One slot of a bulk decryption result.
pub type BatchEntry = Result<VaultItem, Undecryptable>;
