//! `opensesame export` — write a PLAINTEXT JSON backup of every item.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{resolve_paths, unlock_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::backup;
use crate::vault::store::write_private;

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let vault = unlock_vault(&paths)?;

    let summary = backup::export(&vault)?;

    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);

            // Refuse to clobber the encrypted store with plaintext.
            if std::env::current_dir()?.join(dest_path) == paths.store {
                return Err(VaultError::CommandFailed(
                    "refusing to export over the vault store".into(),
                ));
            }

            if dest_path.exists() {
                let overwrite = Confirm::new()
                    .with_prompt(format!("{dest} exists. Overwrite?"))
                    .default(false)
                    .interact()
                    .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;
                if !overwrite {
                    return Err(VaultError::UserCancelled);
                }
            }

            // Owner-only on Unix: the file holds plaintext passwords.
            write_private(dest_path, summary.json.as_bytes()).map_err(|e| {
                VaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!("Exported {} item(s) to {dest}", summary.exported));
            output::warning("The backup is NOT encrypted. Keep it safe and delete it when done.");
        }
        None => {
            // Write to stdout (no success message, just raw output).
            println!("{}", summary.json.as_str());
        }
    }

    if summary.skipped > 0 {
        output::warning(&format!(
            "{} item(s) could not be decrypted and were left out.",
            summary.skipped
        ));
    }
    Ok(())
}
