//! Vault module — encrypted item storage.
//!
//! This module provides:
//! - `ItemFields`, `VaultItem`, and the `Undecryptable` placeholder (`item`)
//! - The persisted record layout (`record`)
//! - Item ⇄ envelope conversion with per-item failure isolation (`protocol`)
//! - The `EnvelopeStore` trait and its memory / JSON-file backends (`store`)
//! - The high-level `Vault` used by front ends (`service`)
//! - Plaintext JSON export / import (`backup`)
//! - Weak / reused password detection and search (`health`)

pub mod backup;
pub mod health;
pub mod item;
pub mod protocol;
pub mod record;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use item::{BatchEntry, ItemFields, ItemMeta, Undecryptable, VaultItem};
pub use record::{NewRecord, StoredRecord};
pub use service::Vault;
pub use store::{EnvelopeStore, JsonFileStore, MemoryStore};
