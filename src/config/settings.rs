use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.opensesame.toml`.
///
/// Every field has a sensible default so OpenSesame works out-of-the-box
/// without any config file at all.  KDF parameters are deliberately not
/// here: changing them would make every existing item undecryptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the store
    /// and the identity profile.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the encrypted record store inside `vault_dir`.
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Passwords shorter than this are flagged as weak.
    #[serde(default = "default_weak_password_len")]
    pub weak_password_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".opensesame".to_string()
}

fn default_store_file() -> String {
    "vault.json".to_string()
}

fn default_log_filter() -> String {
    "opensesame=warn".to_string()
}

fn default_weak_password_len() -> usize {
    crate::vault::health::DEFAULT_WEAK_LEN
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            store_file: default_store_file(),
            log_filter: default_log_filter(),
            weak_password_len: default_weak_password_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".opensesame.toml";

    /// Load settings from `<project_dir>/.opensesame.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.store_file.is_empty() || settings.store_file.contains(['/', '\\']) {
            return Err(VaultError::Config(format!(
                "store_file '{}' must be a plain file name",
                settings.store_file
            )));
        }

        Ok(settings)
    }

    /// Full path to the vault directory.
    ///
    /// Example: `project_dir/.opensesame`
    pub fn vault_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Full path to the record store.
    ///
    /// Example: `project_dir/.opensesame/vault.json`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        self.vault_dir_path(project_dir).join(&self.store_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
