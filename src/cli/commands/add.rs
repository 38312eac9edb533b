//! `opensesame add` — encrypt and store a new item.

use crate::cli::output;
use crate::cli::{read_item_password, resolve_paths, unlock_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::health;
use crate::vault::ItemFields;

/// Execute the `add` command.
pub fn execute(cli: &Cli, title: &str, username: &str, url: &str, notes: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(VaultError::CommandFailed("title cannot be empty".into()));
    }

    let paths = resolve_paths(cli)?;

    // Read the item password before unlocking so piped input is consumed
    // even when the master password comes from the environment.
    let secret = read_item_password(title)?;
    if secret.is_empty() {
        return Err(VaultError::CommandFailed("password cannot be empty".into()));
    }

    let mut vault = unlock_vault(&paths)?;

    let fields = ItemFields::new(title, secret.as_str())
        .with_username(username)
        .with_url(url)
        .with_notes(notes);
    let id = vault.add_item(&fields)?;

    output::success(&format!("Added '{title}' ({id})"));
    if health::is_weak(&secret, paths.settings.weak_password_len) {
        output::warning("This password is shorter than the recommended length.");
    }
    Ok(())
}
