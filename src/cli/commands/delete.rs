//! `opensesame delete` — remove an item.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, resolve_paths, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
///
/// Deleting needs a signed-in identity but not the master password: the
/// record is opaque to the store anyway.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let mut vault = open_vault(&paths)?;

    let record = vault
        .list_records()?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}' ({id})?", record.title))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete_item(id)?;
    output::success(&format!("Deleted '{}' ({id})", record.title));
    Ok(())
}
