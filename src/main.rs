use clap::Parser;
use tracing_subscriber::EnvFilter;

use opensesame::cli::commands::edit::Changes;
use opensesame::cli::{Cli, Commands};
use opensesame::config::Settings;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Login { ref email } => opensesame::cli::commands::login::execute(&cli, email),
        Commands::Logout => opensesame::cli::commands::logout::execute(&cli),
        Commands::Status => opensesame::cli::commands::status::execute(&cli),
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
        } => opensesame::cli::commands::add::execute(&cli, title, username, url, notes),
        Commands::List { ref search } => {
            opensesame::cli::commands::list::execute(&cli, search.as_deref())
        }
        Commands::Show { ref id, reveal } => {
            opensesame::cli::commands::show::execute(&cli, id, reveal)
        }
        Commands::Edit {
            ref id,
            ref title,
            ref username,
            ref url,
            ref notes,
            password,
        } => {
            let changes = Changes {
                title: title.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                password,
            };
            opensesame::cli::commands::edit::execute(&cli, id, &changes)
        }
        Commands::Delete { ref id, force } => {
            opensesame::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Export { ref output } => {
            opensesame::cli::commands::export::execute(&cli, output.as_deref())
        }
        Commands::Import { ref file } => opensesame::cli::commands::import_cmd::execute(&cli, file),
        Commands::Completions { shell } => opensesame::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        opensesame::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr so command output on stdout stays clean.
/// `RUST_LOG` wins over `log_filter` from `.opensesame.toml`.
fn init_tracing() {
    let fallback = std::env::current_dir()
        .ok()
        .and_then(|cwd| Settings::load(&cwd).ok())
        .unwrap_or_default()
        .log_filter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
