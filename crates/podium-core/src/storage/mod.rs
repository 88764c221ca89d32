mod settings;
mod store;

pub use settings::Settings;
pub use store::Store;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/podium-timer[-dev]/` based on PODIUM_TIMER_ENV.
///
/// Set PODIUM_TIMER_ENV=dev to keep development data separate.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PODIUM_TIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("podium-timer-dev")
    } else {
        base_dir.join("podium-timer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
