//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod profile;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::MasterSecret;
use crate::errors::{Result, VaultError};
use crate::session::{Session, SessionStatus};
use crate::vault::{JsonFileStore, Vault};

use self::profile::ProfileFile;

/// Environment variable that supplies the master password non-interactively.
pub const MASTER_PASSWORD_ENV: &str = "OPENSESAME_MASTER_PASSWORD";

/// Minimum master password length enforced when a vault is first used.
const MIN_PASSWORD_LEN: usize = 8;

/// OpenSesame CLI: client-side encrypted password vault.
#[derive(Parser)]
#[command(
    name = "opensesame",
    about = "Client-side encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .opensesame, or `vault_dir` from .opensesame.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Sign in with an account email and unlock the vault
    Login {
        /// Account email; also the key derivation salt, so it must never change
        #[arg(long)]
        email: String,
    },

    /// Sign out and forget the key
    Logout,

    /// Show who is signed in and how many items are stored
    Status,

    /// Add a new item (password is prompted or read from stdin)
    Add {
        /// Item title (stored unencrypted for listing)
        #[arg(long)]
        title: String,
        /// Username or login
        #[arg(long, default_value = "")]
        username: String,
        /// Site URL
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List all items
    List {
        /// Only show items whose title or username contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single item
    Show {
        /// Item id
        id: String,
        /// Print the password as well
        #[arg(long)]
        reveal: bool,
    },

    /// Change an existing item
    Edit {
        /// Item id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Prompt for (or read from stdin) a new password
        #[arg(long)]
        password: bool,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export all items as a PLAINTEXT JSON backup
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import items from a JSON backup
    Import {
        /// Path to the backup file
        file: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved locations for this invocation.
pub struct Paths {
    pub settings: Settings,
    pub vault_dir: PathBuf,
    pub store: PathBuf,
}

/// Load settings and resolve the vault directory and store file.
pub fn resolve_paths(cli: &Cli) -> Result<Paths> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir.clone_from(dir);
    }
    let vault_dir = settings.vault_dir_path(&cwd);
    let store = settings.store_path(&cwd);
    Ok(Paths {
        settings,
        vault_dir,
        store,
    })
}

/// Build the vault for this process, re-attached to the saved identity.
///
/// The session comes back `Locked` (or `LoggedOut` if nobody signed in).
pub fn open_vault(paths: &Paths) -> Result<Vault<JsonFileStore>> {
    let profile = ProfileFile::new(&paths.vault_dir);
    let mut session = Session::new();
    session.attach(&profile);
    Ok(Vault::new(session, JsonFileStore::new(&paths.store)))
}

/// Open the vault and unlock it with the master password.
///
/// Opens the owner's first item as a check, so a wrong password is
/// reported here instead of as a list full of undecryptable items.
pub fn unlock_vault(paths: &Paths) -> Result<Vault<JsonFileStore>> {
    let mut vault = open_vault(paths)?;
    if vault.session().status() == SessionStatus::LoggedOut {
        return Err(VaultError::NotAuthenticated);
    }

    let secret = prompt_master_password()?;
    let _unverified = vault.unlock(&secret)?;
    check_unlock(&vault)?;
    Ok(vault)
}

/// Turn a failed post-unlock check into a user-facing error.
pub fn check_unlock(vault: &Vault<JsonFileStore>) -> Result<()> {
    vault.verify_unlock().map_err(|e| {
        if e.is_authentication_failure() {
            VaultError::CommandFailed(
                "failed to unlock vault — check your master password".into(),
            )
        } else {
            e
        }
    })
}

/// Get the master password, trying in order:
/// 1. `OPENSESAME_MASTER_PASSWORD` env var (scripts, CI)
/// 2. Interactive prompt
pub fn prompt_master_password() -> Result<MasterSecret> {
    if let Some(pw) = password_from_env() {
        return Ok(MasterSecret::from(pw));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(MasterSecret::from(Zeroizing::new(pw)))
}

/// Prompt for a master password with confirmation (first login on an
/// empty vault).  Enforces a minimum length.
pub fn prompt_new_master_password() -> Result<MasterSecret> {
    if let Some(pw) = password_from_env() {
        if pw.chars().count() < MIN_PASSWORD_LEN {
            return Err(VaultError::CommandFailed(format!(
                "master password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        return Ok(MasterSecret::from(pw));
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(MasterSecret::from(Zeroizing::new(password)));
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(MASTER_PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Read an item password from piped stdin, or prompt for it.
pub fn read_item_password(label: &str) -> Result<Zeroizing<String>> {
    use std::io::{self, IsTerminal, Read};

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        return Ok(trimmed);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {label}"))
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
