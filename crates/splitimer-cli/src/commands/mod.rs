pub mod config;
pub mod plan;
pub mod preset;
pub mod run;
pub mod workout;

use std::path::PathBuf;

use clap::Args;
use splitimer_core::error::{CoreError, Result};
use splitimer_core::{WorkoutConfig, WorkoutLibrary};

/// Workout source and overrides shared by `plan`, `run` and `workout save`.
#[derive(Args, Debug)]
pub struct WorkoutArgs {
    /// Workout file (.toml or .json). Defaults to the current saved workout,
    /// then to the built-in calisthenics routine.
    pub file: Option<PathBuf>,
    /// Use a saved workout, by id or name
    #[arg(long, short = 's', conflicts_with = "file")]
    pub saved: Option<String>,
    /// Override the rest between exercises, in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Override the warmup, in seconds (0 disables it)
    #[arg(long)]
    pub warmup: Option<u32>,
}

impl WorkoutArgs {
    /// Load the workout and apply overrides. A workout without a warmup of
    /// its own picks up `default_warmup_secs` from the settings.
    pub fn resolve(&self, default_warmup_secs: u32) -> Result<WorkoutConfig> {
        let mut workout = match (&self.file, &self.saved) {
            (Some(path), _) => WorkoutConfig::from_file(path)?,
            (None, Some(key)) => {
                let library = WorkoutLibrary::load()?;
                library
                    .find(key)
                    .map(|saved| saved.workout.clone())
                    .ok_or_else(|| CoreError::UnknownWorkout(key.clone()))?
            }
            (None, None) => WorkoutLibrary::load()?
                .current()
                .map(|saved| saved.workout.clone())
                .unwrap_or_else(splitimer_core::workout::calisthenics),
        };
        if workout.warmup_secs == 0 {
            workout.warmup_secs = default_warmup_secs;
        }
        if let Some(rest) = self.rest {
            workout.default_rest_secs = rest;
        }
        if let Some(warmup) = self.warmup {
            workout.warmup_secs = warmup;
        }
        workout.validate()?;
        Ok(workout)
    }
}
