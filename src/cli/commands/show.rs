//! `opensesame show` — print one decrypted item.

use crate::cli::output;
use crate::cli::{resolve_paths, unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let vault = unlock_vault(&paths)?;

    let item = vault.get_item(id)?;
    let fields = &item.fields;

    println!("Title:    {}", fields.title);
    println!("Username: {}", fields.username);
    if reveal {
        println!("Password: {}", fields.secret);
    } else {
        println!("Password: ********");
    }
    if !fields.url.is_empty() {
        println!("URL:      {}", fields.url);
    }
    if !fields.notes.is_empty() {
        println!("Notes:    {}", fields.notes);
    }
    println!(
        "Updated:  {}",
        item.meta.updated_at.format("%Y-%m-%d %H:%M:%S")
    );

    if !reveal {
        output::tip("Pass --reveal to print the password.");
    }
    Ok(())
}
