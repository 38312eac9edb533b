//! Storage for encrypted records.
//!
//! The store only ever sees `StoredRecord`s: opaque base64 envelopes plus
//! the plaintext title, timestamp, and owner.  Two implementations:
//! - `MemoryStore`: in-process, for tests and embedders.
//! - `JsonFileStore`: a single JSON array on disk, written atomically.

use std::fs;
use std::path::{Path, PathBuf};

use rand::distr::Alphanumeric;
use rand::Rng;

use super::record::{NewRecord, StoredRecord};
use crate::errors::{Result, VaultError};

/// Length of generated record ids.
const ID_LEN: usize = 20;

/// The remote (or local) persistence layer for envelopes.
pub trait EnvelopeStore {
    /// All records belonging to `owner_id`, oldest first.
    fn list_envelopes(&self, owner_id: &str) -> Result<Vec<StoredRecord>>;

    /// Store a new record and return the id assigned to it.
    fn put_envelope(&mut self, record: NewRecord) -> Result<String>;

    /// Replace an existing record, keeping its id.
    fn update_envelope(&mut self, id: &str, record: NewRecord) -> Result<()>;

    /// Remove a record.
    fn delete_envelope(&mut self, id: &str) -> Result<()>;
}

/// Generate a random alphanumeric record id.
pub fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Shared record-list operations
// ---------------------------------------------------------------------------

fn list_for_owner(records: &[StoredRecord], owner_id: &str) -> Vec<StoredRecord> {
    records
        .iter()
        .filter(|r| r.owner_id == owner_id)
        .cloned()
        .collect()
}

fn replace(records: &mut [StoredRecord], id: &str, record: NewRecord) -> Result<()> {
    let slot = records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;
    if slot.owner_id != record.owner_id {
        return Err(VaultError::ItemNotFound(id.to_string()));
    }
    *slot = record.into_stored(id.to_string());
    Ok(())
}

fn remove(records: &mut Vec<StoredRecord>, id: &str) -> Result<()> {
    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
        return Err(VaultError::ItemNotFound(id.to_string()));
    }
    Ok(())
}

/// Write `data` to `path`, readable by the owner only on Unix.
///
/// A new file is created with mode 0o600, so the contents are never
/// visible under the umask default.  An existing file is truncated and
/// its mode tightened before anything is written.
pub(crate) fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(data)?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store.  Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record, regardless of owner.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Mutable access to the raw records, e.g. to simulate corruption.
    pub fn records_mut(&mut self) -> &mut Vec<StoredRecord> {
        &mut self.records
    }
}

impl EnvelopeStore for MemoryStore {
    fn list_envelopes(&self, owner_id: &str) -> Result<Vec<StoredRecord>> {
        Ok(list_for_owner(&self.records, owner_id))
    }

    fn put_envelope(&mut self, record: NewRecord) -> Result<String> {
        let id = generate_id();
        self.records.push(record.into_stored(id.clone()));
        Ok(id)
    }

    fn update_envelope(&mut self, id: &str, record: NewRecord) -> Result<()> {
        replace(&mut self.records, id, record)
    }

    fn delete_envelope(&mut self, id: &str) -> Result<()> {
        remove(&mut self.records, id)
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// A store backed by one JSON file holding every record.
///
/// The file is re-read on every call so that separate processes see each
/// other's writes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<StoredRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        let records: Vec<StoredRecord> = serde_json::from_slice(&data).map_err(|e| {
            VaultError::Storage(format!("{} is not a valid store: {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded store");
        Ok(records)
    }

    /// Write all records atomically: temp file in the same directory, then
    /// rename over the target.
    fn save(&self, records: &[StoredRecord]) -> Result<()> {
        let buf = serde_json::to_vec_pretty(records)
            .map_err(|e| VaultError::Serialization(format!("store: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        write_private(&tmp_path, &buf)?;
        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved store");
        Ok(())
    }
}

impl EnvelopeStore for JsonFileStore {
    fn list_envelopes(&self, owner_id: &str) -> Result<Vec<StoredRecord>> {
        Ok(list_for_owner(&self.load()?, owner_id))
    }

    fn put_envelope(&mut self, record: NewRecord) -> Result<String> {
        let mut records = self.load()?;
        let id = generate_id();
        records.push(record.into_stored(id.clone()));
        self.save(&records)?;
        Ok(id)
    }

    fn update_envelope(&mut self, id: &str, record: NewRecord) -> Result<()> {
        let mut records = self.load()?;
        replace(&mut records, id, record)?;
        self.save(&records)
    }

    fn delete_envelope(&mut self, id: &str) -> Result<()> {
        let mut records = self.load()?;
        remove(&mut records, id)?;
        self.save(&records)
    }
}
