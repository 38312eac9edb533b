//! `opensesame logout` — forget the signed-in identity.

use crate::cli::output;
use crate::cli::profile::ProfileFile;
use crate::cli::{open_vault, resolve_paths, Cli};
use crate::errors::Result;

/// Execute the `logout` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let mut vault = open_vault(&paths)?;

    let profile = ProfileFile::new(&paths.vault_dir);
    let was_signed_in = profile.clear()?;
    vault.session_mut().identity_cleared();

    if was_signed_in {
        output::success("Signed out.");
    } else {
        output::info("Nobody was signed in.");
    }
    Ok(())
}
