//! `opensesame import` — add items from a JSON backup.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{resolve_paths, unlock_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::backup;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str) -> Result<()> {
    let source = Path::new(file_path);
    if !source.exists() {
        return Err(VaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let paths = resolve_paths(cli)?;
    let json = Zeroizing::new(fs::read_to_string(source)?);
    let mut vault = unlock_vault(&paths)?;

    let summary = backup::import(&mut vault, &json)?;

    if summary.imported == 0 {
        output::warning("No usable items found in the import file.");
    } else {
        output::success(&format!(
            "Imported {} item(s) from {}",
            summary.imported,
            source.display()
        ));
    }
    if summary.skipped > 0 {
        output::info(&format!(
            "Skipped {} entr(ies) without a title or password.",
            summary.skipped
        ));
    }
    Ok(())
}
