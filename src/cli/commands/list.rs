//! `opensesame list` — decrypt and display all items.

use crate::cli::output;
use crate::cli::{resolve_paths, unlock_vault, Cli};
use crate::errors::Result;
use crate::vault::health::{self, HealthReport};

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let vault = unlock_vault(&paths)?;

    let entries = vault.list_items()?;
    let report = HealthReport::new(&entries, paths.settings.weak_password_len);

    let query = search.unwrap_or("");
    let shown: Vec<_> = entries
        .iter()
        .filter(|e| health::matches(e, query))
        .collect();

    output::info(&format!("{} of {} item(s)", shown.len(), entries.len()));
    output::print_items_table(&shown, &report);

    let failed = entries.iter().filter(|e| e.is_err()).count();
    if failed > 0 {
        output::warning(&format!("{failed} item(s) could not be decrypted."));
    }
    Ok(())
}
