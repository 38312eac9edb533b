//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::health::HealthReport;
use crate::vault::BatchEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of items (Id, Title, Username, Health, Updated).
///
/// Undecryptable items are listed with their stored title and a
/// "cannot decrypt" marker instead of a username.
pub fn print_items_table(entries: &[&BatchEntry], report: &HealthReport<'_>) {
    if entries.is_empty() {
        info("No items found.");
        tip("Run `opensesame add --title <TITLE>` to add your first item.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Username", "Health", "Updated"]);

    for entry in entries {
        let row = match entry {
            Ok(item) => vec![
                item.meta.id.clone(),
                item.fields.title.clone(),
                item.fields.username.clone(),
                report
                    .assess(item)
                    .map(|h| h.label().to_string())
                    .unwrap_or_default(),
                item.meta.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
            Err(failed) => vec![
                failed.meta.id.clone(),
                failed.title.clone(),
                style("<cannot decrypt>").red().to_string(),
                String::new(),
                failed.meta.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        };
        table.add_row(row);
    }

    println!("{table}");
}
