//! TOML-based user settings.
//!
//! Flat display preferences: theme, the overtime flash, stage-indicator
//! dimming, speaker identifiers, side colors, and the warning/danger time
//! thresholds. Stored at `~/.config/podium-timer/config.toml`. Every field
//! has a default, so a missing or partial file always loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{CoreError, Result};

/// Appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Hex display color for the affirmative side.
    #[serde(default = "default_aff_color")]
    pub aff_color: String,
    /// Hex display color for the negative side.
    #[serde(default = "default_neg_color")]
    pub neg_color: String,
    /// Pulse the background when a timer goes into overtime.
    #[serde(default = "default_true")]
    pub overtime_flash: bool,
    /// Dim non-current capsules in the stage indicator.
    #[serde(default = "default_true")]
    pub stage_dimming: bool,
    /// Show speaker labels on segments that have them.
    #[serde(default = "default_true")]
    pub speaker_identifier: bool,
}

/// Remaining-time thresholds that re-tint the countdown in the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_warning_secs")]
    pub warning_secs: u32,
    #[serde(default = "default_danger_secs")]
    pub danger_secs: u32,
}

/// User settings, serialized to/from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

fn default_theme() -> String {
    "Dark".into()
}
fn default_aff_color() -> String {
    "#0D6FDE".into()
}
fn default_neg_color() -> String {
    "#C42329".into()
}
fn default_true() -> bool {
    true
}
fn default_warning_secs() -> u32 {
    30
}
fn default_danger_secs() -> u32 {
    10
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            aff_color: default_aff_color(),
            neg_color: default_neg_color(),
            overtime_flash: true,
            stage_dimming: true,
            speaker_identifier: true,
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            warning_secs: default_warning_secs(),
            danger_secs: default_danger_secs(),
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed or defaults
    /// cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| CoreError::Settings {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| CoreError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Read a value as a string by dot-separated key ("ui.theme").
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = lookup(&json, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key and persist. The new value must
    /// parse as the field's existing type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        assign(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()
    }
}

fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn assign(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(CoreError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| CoreError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| CoreError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| CoreError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value.parse::<u64>().map_err(|e| CoreError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                    serde_json::Value::Number(n.into())
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| CoreError::UnknownKey(key.to_string()))?;
    }

    Err(CoreError::UnknownKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.ui.theme, "Dark");
        assert_eq!(parsed.ui.aff_color, "#0D6FDE");
        assert_eq!(parsed.ui.neg_color, "#C42329");
        assert!(parsed.ui.overtime_flash);
        assert!(parsed.ui.stage_dimming);
        assert_eq!(parsed.thresholds.warning_secs, 30);
        assert_eq!(parsed.thresholds.danger_secs, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Settings = toml::from_str("[ui]\ntheme = \"Light\"\n").unwrap();
        assert_eq!(parsed.ui.theme, "Light");
        assert!(parsed.ui.speaker_identifier);
        assert_eq!(parsed.thresholds.warning_secs, 30);
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let home = tempfile::tempdir().unwrap();
        // No other test in this crate reads HOME or touches the disk.
        std::env::set_var("HOME", home.path());
        std::env::set_var("PODIUM_TIMER_ENV", "dev");

        let mut settings = Settings::default();
        settings.ui.theme = "Light".into();
        settings.thresholds.warning_secs = 45;
        settings.save().unwrap();

        let loaded = Settings::load().unwrap();
        assert_eq!(loaded.ui.theme, "Light");
        assert_eq!(loaded.thresholds.warning_secs, 45);
        assert!(home
            .path()
            .join(".config/podium-timer-dev/config.toml")
            .exists());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("ui.theme").as_deref(), Some("Dark"));
        assert_eq!(settings.get("ui.overtime_flash").as_deref(), Some("true"));
        assert_eq!(settings.get("thresholds.danger_secs").as_deref(), Some("10"));
        assert!(settings.get("ui.missing").is_none());
        assert!(settings.get("").is_none());
    }

    #[test]
    fn assign_updates_each_value_kind() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        assign(&mut json, "ui.stage_dimming", "false").unwrap();
        assign(&mut json, "thresholds.warning_secs", "45").unwrap();
        assign(&mut json, "ui.aff_color", "#336699").unwrap();
        let parsed: Settings = serde_json::from_value(json).unwrap();
        assert!(!parsed.ui.stage_dimming);
        assert_eq!(parsed.thresholds.warning_secs, 45);
        assert_eq!(parsed.ui.aff_color, "#336699");
    }

    #[test]
    fn assign_rejects_unknown_key_and_bad_type() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        assert!(matches!(
            assign(&mut json, "ui.nope", "x"),
            Err(CoreError::UnknownKey(_))
        ));
        assert!(matches!(
            assign(&mut json, "ui.overtime_flash", "maybe"),
            Err(CoreError::InvalidValue { .. })
        ));
    }
}
