//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import_cmd;
pub mod list;
pub mod login;
pub mod logout;
pub mod show;
pub mod status;
