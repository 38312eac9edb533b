//! `opensesame status` — who is signed in.  Never asks for a password.

use crate::cli::output;
use crate::cli::{open_vault, resolve_paths, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let vault = open_vault(&paths)?;

    match vault.session().identity() {
        Some(identity) => {
            let count = vault.list_records()?.len();
            output::info(&format!("Signed in as {}", identity.email));
            output::info(&format!("{count} item(s) in {}", paths.store.display()));
        }
        None => {
            output::info("Not signed in.");
            output::tip("Run `opensesame login --email <EMAIL>` to get started.");
        }
    }
    Ok(())
}
