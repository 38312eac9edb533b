//! Turning structured items into envelopes and back.
//!
//! `lock_item` serializes `ItemFields` to canonical JSON and seals it.
//! `unlock_item` opens and parses.  `decrypt_batch` applies `open_record`
//! to every stored record and never fails as a whole: an item that does
//! not open becomes an `Undecryptable` in the same position.
//!
//! None of these functions keep the key; they borrow it for one call.

use zeroize::Zeroizing;

use super::item::{BatchEntry, ItemFields, Undecryptable, VaultItem};
use super::record::StoredRecord;
use crate::crypto::{open, seal, Envelope, VaultKey};
use crate::errors::{DecryptError, Result, VaultError};

/// Serialize and encrypt one item.
pub fn lock_item(fields: &ItemFields, key: &VaultKey) -> Result<Envelope> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(fields)
            .map_err(|e| VaultError::Serialization(format!("item JSON: {e}")))?,
    );
    seal(&plaintext, key)
}

/// Decrypt and parse one envelope.
///
/// A parse failure after a successful open means the plaintext is not in
/// the canonical form; that is a format mismatch, not a security event.
pub fn unlock_item(envelope: &Envelope, key: &VaultKey) -> std::result::Result<ItemFields, DecryptError> {
    let plaintext = open(envelope, key)?;
    serde_json::from_slice(&plaintext).map_err(|e| {
        // The serde message can quote input; keep only the position.
        DecryptError::MalformedRecord(format!(
            "not a vault item (line {}, column {})",
            e.line(),
            e.column()
        ))
    })
}

/// Decode, decrypt, and parse one stored record.
pub fn open_record(record: &StoredRecord, key: &VaultKey) -> std::result::Result<VaultItem, DecryptError> {
    let envelope = record.envelope()?;
    let fields = unlock_item(&envelope, key)?;
    Ok(VaultItem {
        meta: record.meta(),
        fields,
    })
}

/// Decrypt every record, isolating failures per item.
///
/// The output has one entry per input record, in input order.
pub fn decrypt_batch(records: &[StoredRecord], key: &VaultKey) -> Vec<BatchEntry> {
    records
        .iter()
        .map(|record| {
            open_record(record, key).map_err(|reason| {
                tracing::warn!(item = %record.id, error = %reason, "item could not be decrypted");
                Undecryptable {
                    meta: record.meta(),
                    title: record.title.clone(),
                    reason,
                }
            })
        })
        .collect()
}
