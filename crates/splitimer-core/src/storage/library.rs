//! TOML file storage for the saved workout library.
//!
//! The library lives next to the settings at
//! `~/.config/splitimer/workouts.toml`. A missing file reads as the seeded
//! default library and is only written on the first save.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;
use crate::workout::WorkoutLibrary;

impl WorkoutLibrary {
    /// Default location of the library file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("workouts.toml"))
    }

    /// Load from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`; a missing file gives the seeded library.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
