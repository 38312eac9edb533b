//! Configuration loaded from `.opensesame.toml`.

pub mod settings;

pub use settings::Settings;
