//! SQLite-backed persistence for tasks and completions.
//!
//! The engine never touches storage directly; it consumes the snapshots
//! this module loads. Creating and deleting completions in response to
//! user actions happens here.

pub mod database;

pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/habitkit[-dev]/` based on HABITKIT_ENV.
///
/// Set HABITKIT_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITKIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitkit-dev")
    } else {
        base_dir.join("habitkit")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
