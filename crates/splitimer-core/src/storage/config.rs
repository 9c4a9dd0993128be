//! TOML-based application settings.
//!
//! Stores user preferences including:
//! - Default exercise, rest and warmup durations for new workouts
//! - Countdown cue behaviour and tone profile
//! - Clock driver cadence
//!
//! Settings live at `~/.config/splitimer/config.toml`. Saved workouts are
//! kept separately in `workouts.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::cues::{CueProfile, DEFAULT_COUNTDOWN_SECS};
use crate::error::ConfigError;
use crate::workout::WorkoutConfig;

/// Durations applied to newly created workouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_exercise_secs")]
    pub exercise_secs: u32,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u32,
    /// Applied when a workout file has no warmup of its own. 0 = none.
    #[serde(default)]
    pub warmup_secs: u32,
}

/// Audio cue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
    /// Tone set named in cue output: clean, pixel or serenity.
    #[serde(default)]
    pub profile: CueProfile,
}

/// Clock driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Interval between ticks in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/splitimer/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub cues: CuesConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

fn default_exercise_secs() -> u32 {
    45
}
fn default_rest_secs() -> u32 {
    30
}
fn default_true() -> bool {
    true
}
fn default_countdown_secs() -> u32 {
    DEFAULT_COUNTDOWN_SECS
}
fn default_tick_ms() -> u64 {
    1000
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            exercise_secs: default_exercise_secs(),
            rest_secs: default_rest_secs(),
            warmup_secs: 0,
        }
    }
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            countdown_secs: default_countdown_secs(),
            profile: CueProfile::default(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| load_failed(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a leaf value by dot-separated key, keeping the existing type.
    /// Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Every leaf key with its value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// An empty workout carrying the configured default durations.
    pub fn new_workout(&self) -> WorkoutConfig {
        WorkoutConfig {
            splits: Vec::new(),
            default_rest_secs: self.defaults.rest_secs,
            warmup_secs: self.defaults.warmup_secs,
            default_exercise_secs: self.defaults.exercise_secs,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.defaults.exercise_secs, 45);
        assert_eq!(cfg.defaults.rest_secs, 30);
        assert_eq!(cfg.defaults.warmup_secs, 0);
        assert!(cfg.cues.enabled);
        assert_eq!(cfg.cues.countdown_secs, 3);
        assert_eq!(cfg.clock.tick_ms, 1000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[cues]\nenabled = false\n").unwrap();
        assert!(!cfg.cues.enabled);
        assert_eq!(cfg.cues.countdown_secs, 3);
        assert_eq!(cfg.defaults, DefaultsConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("cues.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("defaults.rest_secs").as_deref(), Some("30"));
        assert!(cfg.get("cues.missing_key").is_none());
        assert!(cfg.get("cues").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("defaults.rest_secs", "15").unwrap();
        cfg.set("cues.enabled", "false").unwrap();
        assert_eq!(cfg.defaults.rest_secs, 15);
        assert!(!cfg.cues.enabled);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("cues.volume", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "3"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("cues", "3"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("cues.enabled", "sometimes"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("defaults.rest_secs", "-5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_cue_profile_by_name() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("cues.profile").as_deref(), Some("clean"));
        cfg.set("cues.profile", "pixel").unwrap();
        assert_eq!(cfg.cues.profile, CueProfile::Pixel);
        assert!(matches!(
            cfg.set("cues.profile", "8bit"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.cues.profile, CueProfile::Pixel);
    }

    #[test]
    fn entries_lists_every_leaf() {
        let keys: Vec<String> = Config::default().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 7);
        assert!(keys.contains(&"cues.profile".to_string()));
        assert!(keys.contains(&"clock.tick_ms".to_string()));
        assert!(keys.contains(&"defaults.warmup_secs".to_string()));
    }

    #[test]
    fn new_workout_uses_defaults() {
        let mut cfg = Config::default();
        cfg.defaults.rest_secs = 20;
        cfg.defaults.warmup_secs = 60;
        let workout = cfg.new_workout();
        assert!(workout.splits.is_empty());
        assert_eq!(workout.default_rest_secs, 20);
        assert_eq!(workout.warmup_secs, 60);
        assert_eq!(workout.default_exercise_secs, 45);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("clock.tick_ms", "250").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().clock.tick_ms, 250);
    }

    #[test]
    fn load_from_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "defaults = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
