//! Plaintext JSON backups.
//!
//! Export writes every decryptable item as a JSON array:
//!
//! ```json
//! [{ "id": "...", "title": "...", "username": "...", "password": "...",
//!    "url": "...", "notes": "...", "updatedAt": "..." }]
//! ```
//!
//! Import accepts the same shape.  Entries without a `title` or
//! `password` are skipped; everything else is sealed and stored as a new
//! item under the signed-in owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::item::{BatchEntry, ItemFields};
use super::service::Vault;
use super::store::EnvelopeStore;
use crate::errors::{Result, VaultError};

/// One exported item.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEntry<'a> {
    id: &'a str,
    #[serde(flatten)]
    fields: &'a ItemFields,
    updated_at: DateTime<Utc>,
}

/// One imported item.  Every field is optional on the way in.
#[derive(Deserialize)]
struct ImportEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Outcome of an export.
pub struct ExportSummary {
    /// The JSON document.  Contains plaintext secrets.
    pub json: Zeroizing<String>,
    pub exported: usize,
    /// Items left out because they could not be decrypted.
    pub skipped: usize,
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Render a batch of decrypted items as a backup document.
pub fn export_entries(entries: &[BatchEntry]) -> Result<ExportSummary> {
    let items: Vec<ExportEntry<'_>> = entries
        .iter()
        .filter_map(|entry| entry.as_ref().ok())
        .map(|item| ExportEntry {
            id: &item.meta.id,
            fields: &item.fields,
            updated_at: item.meta.updated_at,
        })
        .collect();

    let json = serde_json::to_string_pretty(&items)
        .map_err(|e| VaultError::Serialization(format!("backup JSON: {e}")))?;

    Ok(ExportSummary {
        exported: items.len(),
        skipped: entries.len() - items.len(),
        json: Zeroizing::new(json),
    })
}

/// Decrypt the whole vault and render it as a backup document.
pub fn export<S: EnvelopeStore>(vault: &Vault<S>) -> Result<ExportSummary> {
    let entries = vault.list_items()?;
    export_entries(&entries)
}

/// Parse a backup document into item fields, dropping incomplete entries.
///
/// Returns the usable items and the number skipped.
pub fn parse_backup(json: &str) -> Result<(Vec<ItemFields>, usize)> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| VaultError::Serialization(format!("backup is not valid JSON: {e}")))?;
    let serde_json::Value::Array(raw) = value else {
        return Err(VaultError::Serialization(
            "backup must be a JSON array of items".into(),
        ));
    };

    let mut items = Vec::with_capacity(raw.len());
    let mut skipped = 0;
    for value in raw {
        let Ok(entry) = serde_json::from_value::<ImportEntry>(value) else {
            skipped += 1;
            continue;
        };
        match (entry.title, entry.password) {
            (Some(title), Some(password)) if !title.is_empty() && !password.is_empty() => {
                items.push(
                    ItemFields::new(title, password)
                        .with_username(entry.username.unwrap_or_default())
                        .with_url(entry.url.unwrap_or_default())
                        .with_notes(entry.notes.unwrap_or_default()),
                );
            }
            _ => skipped += 1,
        }
    }
    Ok((items, skipped))
}

/// Import a backup document into the vault.
pub fn import<S: EnvelopeStore>(vault: &mut Vault<S>, json: &str) -> Result<ImportSummary> {
    let (items, skipped) = parse_backup(json)?;
    let mut imported = 0;
    for fields in &items {
        vault.add_item(fields)?;
        imported += 1;
    }
    tracing::info!(imported, skipped, "backup imported");
    Ok(ImportSummary { imported, skipped })
}
