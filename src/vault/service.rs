//! High-level vault operations used by the CLI (or any other front end).
//!
//! `Vault` pairs the process's `Session` with an `EnvelopeStore`.  Every
//! operation that needs the key asks the session for it and borrows it for
//! that call only.

use chrono::Utc;

use super::item::{BatchEntry, ItemFields, VaultItem};
use super::protocol::{decrypt_batch, lock_item, open_record};
use super::record::{NewRecord, StoredRecord};
use super::store::EnvelopeStore;
use crate::crypto::{Envelope, MasterSecret};
use crate::errors::{DecryptError, Result, VaultError};
use crate::session::{AuthenticationFailurePossible, Session};

/// The main vault handle.
pub struct Vault<S: EnvelopeStore> {
    session: Session,
    store: S,
}

impl<S: EnvelopeStore> Vault<S> {
    /// Build a vault around an already constructed session and store.
    pub fn new(session: Session, store: S) -> Self {
        Self { session, store }
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Session transitions driven by identity events go through here.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Derive and install the key for the signed-in identity.
    ///
    /// Succeeds for any non-empty password; see
    /// `AuthenticationFailurePossible`.
    pub fn unlock(&mut self, secret: &MasterSecret) -> Result<AuthenticationFailurePossible> {
        self.session.unlock(secret)
    }

    pub fn lock(&mut self) {
        self.session.lock();
    }

    /// Check the installed key against the owner's stored items.
    ///
    /// Passes if the vault is empty or any record opens.  Fails with the
    /// authentication error only when every record fails the tag check,
    /// so one corrupted item is not mistaken for a wrong password.  A
    /// malformed (but authentic) record counts as a pass.  The session
    /// state is left as it is either way.
    pub fn verify_unlock(&self) -> Result<()> {
        let key = self.session.key()?;
        let records = self.list_records()?;

        let mut all_rejected = !records.is_empty();
        for record in &records {
            match open_record(record, key) {
                Ok(_) => return Ok(()),
                Err(e @ DecryptError::MalformedRecord(_)) => {
                    tracing::warn!(item = %record.id, error = %e, "authentic item is malformed");
                    return Ok(());
                }
                Err(DecryptError::Authentication) => {}
                Err(e) => {
                    tracing::warn!(item = %record.id, error = %e, "skipping unreadable item");
                    all_rejected = false;
                }
            }
        }

        if all_rejected {
            return Err(DecryptError::Authentication.into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Envelope operations
    // ------------------------------------------------------------------

    /// Seal an item without storing it.
    pub fn encrypt_item(&self, fields: &ItemFields) -> Result<Envelope> {
        lock_item(fields, self.session.key()?)
    }

    /// Decrypt a single stored record.
    pub fn decrypt_item(&self, record: &StoredRecord) -> Result<VaultItem> {
        let key = self.session.key()?;
        Ok(open_record(record, key)?)
    }

    /// Decrypt many records.  Per-item failures come back in place; only a
    /// missing identity or key fails the call.
    pub fn decrypt_batch(&self, records: &[StoredRecord]) -> Result<Vec<BatchEntry>> {
        let key = self.session.key()?;
        Ok(decrypt_batch(records, key))
    }

    // ------------------------------------------------------------------
    // Stored items
    // ------------------------------------------------------------------

    /// The raw records of the signed-in owner.  Needs no key.
    pub fn list_records(&self) -> Result<Vec<StoredRecord>> {
        let owner = self.session.require_identity()?;
        self.store.list_envelopes(&owner.stable_id)
    }

    /// Decrypt every item of the signed-in owner.
    pub fn list_items(&self) -> Result<Vec<BatchEntry>> {
        let records = self.list_records()?;
        self.decrypt_batch(&records)
    }

    /// Decrypt one item by id.
    pub fn get_item(&self, id: &str) -> Result<VaultItem> {
        let record = self.find_record(id)?;
        self.decrypt_item(&record)
    }

    /// Encrypt and store a new item.  Returns the assigned id.
    pub fn add_item(&mut self, fields: &ItemFields) -> Result<String> {
        let record = self.seal_record(fields)?;
        let id = self.store.put_envelope(record)?;
        tracing::info!(item = %id, "item added");
        Ok(id)
    }

    /// Re-encrypt an existing item with new contents.
    pub fn update_item(&mut self, id: &str, fields: &ItemFields) -> Result<()> {
        self.find_record(id)?;
        let record = self.seal_record(fields)?;
        self.store.update_envelope(id, record)?;
        tracing::info!(item = %id, "item updated");
        Ok(())
    }

    /// Remove an item.  Needs an identity but not the key.
    pub fn delete_item(&mut self, id: &str) -> Result<()> {
        self.find_record(id)?;
        self.store.delete_envelope(id)?;
        tracing::info!(item = %id, "item deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn find_record(&self, id: &str) -> Result<StoredRecord> {
        self.list_records()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))
    }

    fn seal_record(&self, fields: &ItemFields) -> Result<NewRecord> {
        let owner = self.session.require_identity()?;
        let envelope = lock_item(fields, self.session.key()?)?;
        Ok(NewRecord {
            title: fields.title.clone(),
            envelope,
            updated_at: Utc::now(),
            owner_id: owner.stable_id.clone(),
        })
    }
}
