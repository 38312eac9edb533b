//! The persisted per-item layout.
//!
//! ```json
//! { "id": "...", "title": "GitHub", "iv": "<base64>", "ciphertext": "<base64>",
//!   "updatedAt": "2026-01-01T00:00:00Z", "ownerId": "..." }
//! ```
//!
//! `title` is stored in plaintext so items can be listed without the key.
//! `iv` and `ciphertext` stay as strings here and are decoded per item, so
//! one bad record cannot poison a whole listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ItemMeta;
use crate::crypto::codec::{from_text, to_text};
use crate::crypto::Envelope;
use crate::errors::DecryptError;

/// A vault item as the storage layer holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: String,
    pub title: String,
    pub iv: String,
    pub ciphertext: String,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub envelope: Envelope,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
}

impl NewRecord {
    /// Attach the id chosen by the store.
    pub fn into_stored(self, id: String) -> StoredRecord {
        StoredRecord {
            id,
            title: self.title,
            iv: to_text(&self.envelope.nonce),
            ciphertext: to_text(&self.envelope.ciphertext),
            updated_at: self.updated_at,
            owner_id: self.owner_id,
        }
    }
}

impl StoredRecord {
    /// Decode the base64 nonce and ciphertext back into an envelope.
    pub fn envelope(&self) -> Result<Envelope, DecryptError> {
        let nonce = from_text(&self.iv)?;
        let ciphertext = from_text(&self.ciphertext)?;
        Envelope::from_parts(&nonce, ciphertext)
    }

    pub fn meta(&self) -> ItemMeta {
        ItemMeta {
            id: self.id.clone(),
            updated_at: self.updated_at,
            owner_id: self.owner_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::NONCE_LEN;

    fn sample() -> NewRecord {
        NewRecord {
            title: "GitHub".into(),
            envelope: Envelope {
                nonce: [9; NONCE_LEN],
                ciphertext: vec![1, 2, 3, 4],
            },
            updated_at: DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            owner_id: "uid-1".into(),
        }
    }

    #[test]
    fn serializes_persisted_layout() {
        let stored = sample().into_stored("abc".into());
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["title"], "GitHub");
        assert_eq!(value["iv"], "CQkJCQkJCQkJCQkJ");
        assert_eq!(value["ciphertext"], "AQIDBA==");
        assert_eq!(value["updatedAt"], "2026-03-01T12:00:00Z");
        assert_eq!(value["ownerId"], "uid-1");
    }

    #[test]
    fn envelope_decodes_back() {
        let new = sample();
        let expected = new.envelope.clone();
        let stored = new.into_stored("abc".into());
        assert_eq!(stored.envelope().unwrap(), expected);
    }

    #[test]
    fn bad_base64_is_an_encoding_error() {
        let mut stored = sample().into_stored("abc".into());
        stored.ciphertext = "%%%".into();
        assert!(matches!(stored.envelope(), Err(DecryptError::Encoding(_))));
    }
}
