//! `opensesame edit` — change fields of an existing item.
//!
//! The item is decrypted, the given fields are replaced, and the whole
//! record is sealed again under a fresh nonce.

use crate::cli::output;
use crate::cli::{read_item_password, resolve_paths, unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Field changes requested on the command line.
pub struct Changes<'a> {
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub password: bool,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, changes: &Changes<'_>) -> Result<()> {
    if changes.title.is_none()
        && changes.username.is_none()
        && changes.url.is_none()
        && changes.notes.is_none()
        && !changes.password
    {
        return Err(VaultError::CommandFailed(
            "nothing to change — pass at least one of --title, --username, --url, --notes, --password".into(),
        ));
    }
    if changes.title.is_some_and(|t| t.trim().is_empty()) {
        return Err(VaultError::CommandFailed("title cannot be empty".into()));
    }

    let paths = resolve_paths(cli)?;

    let new_secret = if changes.password {
        let secret = read_item_password(id)?;
        if secret.is_empty() {
            return Err(VaultError::CommandFailed("password cannot be empty".into()));
        }
        Some(secret)
    } else {
        None
    };

    let mut vault = unlock_vault(&paths)?;
    let mut fields = vault.get_item(id)?.fields;

    if let Some(title) = changes.title {
        fields.title = title.to_string();
    }
    if let Some(username) = changes.username {
        fields.username = username.to_string();
    }
    if let Some(url) = changes.url {
        fields.url = url.to_string();
    }
    if let Some(notes) = changes.notes {
        fields.notes = notes.to_string();
    }
    if let Some(secret) = &new_secret {
        fields.secret = secret.as_str().to_owned();
    }

    vault.update_item(id, &fields)?;
    output::success(&format!("Updated '{}' ({id})", fields.title));
    Ok(())
}
