//! The CLI's stand-in for an external identity provider.
//!
//! A signed-in account is recorded as `identity.json` in the vault
//! directory.  Deleting the file is a logout.  There is no account
//! password here; the file only says *who* is signed in.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::errors::{Result, VaultError};
use crate::session::{Identity, IdentityProvider};

/// File name of the profile inside the vault directory.
const PROFILE_FILE: &str = "identity.json";

/// Length of the hex stable id derived from the email.
const STABLE_ID_LEN: usize = 28;

/// Build an identity for an email address.
///
/// The stable id is the first 28 hex characters of SHA-256(email).  The
/// email is validated but never normalized, because it is the KDF salt.
pub fn identity_for_email(email: &str) -> Result<Identity> {
    if email.is_empty() {
        return Err(VaultError::CommandFailed("email cannot be empty".into()));
    }
    if email.trim() != email {
        return Err(VaultError::CommandFailed(
            "email cannot start or end with whitespace".into(),
        ));
    }
    if !email.contains('@') {
        return Err(VaultError::CommandFailed(format!(
            "'{email}' is not an email address"
        )));
    }

    let digest = Sha256::digest(email.as_bytes());
    let mut stable_id: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    stable_id.truncate(STABLE_ID_LEN);
    Ok(Identity::new(stable_id, email))
}

/// Identity profile stored on disk.
pub struct ProfileFile {
    path: PathBuf,
}

impl ProfileFile {
    pub fn new(vault_dir: &Path) -> Self {
        Self {
            path: vault_dir.join(PROFILE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved identity, if any.
    pub fn load(&self) -> Result<Option<Identity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)?;
        let identity = serde_json::from_slice(&data).map_err(|e| {
            VaultError::Config(format!("{} is corrupted: {e}", self.path.display()))
        })?;
        Ok(Some(identity))
    }

    /// Record `identity` as signed in.
    pub fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(identity)
            .map_err(|e| VaultError::Serialization(format!("profile: {e}")))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Forget the signed-in identity.  Returns `false` if nobody was.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

impl IdentityProvider for ProfileFile {
    fn current_identity(&self) -> Option<Identity> {
        match self.load() {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable identity profile");
                None
            }
        }
    }
}
