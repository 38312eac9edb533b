//! `opensesame login` — sign in and unlock the vault in one step.

use crate::cli::output;
use crate::cli::profile::{identity_for_email, ProfileFile};
use crate::cli::{
    check_unlock, open_vault, prompt_master_password, prompt_new_master_password, resolve_paths,
    Cli,
};
use crate::errors::Result;

/// Execute the `login` command.
pub fn execute(cli: &Cli, email: &str) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let identity = identity_for_email(email)?;

    // 1. Record the identity (the "identity established" event).
    let profile = ProfileFile::new(&paths.vault_dir);
    profile.save(&identity)?;

    // 2. First use of an empty vault asks for confirmation, like a signup.
    let mut vault = open_vault(&paths)?;
    let is_new = vault.list_records()?.is_empty();
    let secret = if is_new {
        output::info(&format!("No items stored for {email} yet."));
        prompt_new_master_password()?
    } else {
        prompt_master_password()?
    };

    // 3. Derive the key from the master password and the email.
    let _unverified = vault
        .session_mut()
        .identity_established(identity, Some(&secret))?;

    // 4. Surface a wrong password now rather than on the first `list`.
    check_unlock(&vault)?;

    output::success(&format!("Signed in as {email}"));
    if !is_new {
        let failed = vault.list_items()?.iter().filter(|e| e.is_err()).count();
        if failed > 0 {
            output::warning(&format!("{failed} item(s) could not be decrypted."));
        }
    }
    if is_new {
        output::tip("Your email is the key salt: always sign in with exactly the same address.");
        output::tip("Run `opensesame add --title <TITLE>` to add your first item.");
    }
    Ok(())
}
