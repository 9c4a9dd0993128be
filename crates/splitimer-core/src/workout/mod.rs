//! Workout configuration: splits of exercises repeated for a number of sets.
//!
//! A [`WorkoutConfig`] is plain data. The editing helpers here mirror what a
//! configuration screen does before a run starts; once a config is handed to
//! [`crate::TimerEngine::initialize`] the engine owns its own copy and later
//! edits have no effect on the run in progress.

mod library;
mod presets;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};
use crate::timer::sequence;

pub use library::{SavedWorkout, WorkoutLibrary, WorkoutUpdate, DEFAULT_WORKOUT_ID};
pub use presets::calisthenics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(alias = "duration")]
    pub duration_secs: u32,
    /// Performed on both sides: expands to a left and a right segment.
    #[serde(default, alias = "left_right", alias = "leftRight")]
    pub bilateral: bool,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            duration_secs,
            bilateral: false,
        }
    }

    pub fn bilateral(mut self) -> Self {
        self.bilateral = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub id: String,
    pub name: String,
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Split {
    pub fn new(name: impl Into<String>, sets: u32) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            sets,
            exercises: Vec::new(),
        }
    }

    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }
}

/// Optional fields for [`WorkoutConfig::update_split`].
#[derive(Debug, Clone, Default)]
pub struct SplitUpdate {
    pub name: Option<String>,
    pub sets: Option<u32>,
}

/// Optional fields for [`WorkoutConfig::update_exercise`].
#[derive(Debug, Clone, Default)]
pub struct ExerciseUpdate {
    pub name: Option<String>,
    pub duration_secs: Option<u32>,
    pub bilateral: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    #[serde(default = "default_rest_secs", alias = "default_rest_duration")]
    pub default_rest_secs: u32,
    /// 0 disables the warmup segment.
    #[serde(default)]
    pub warmup_secs: u32,
    /// Duration given to newly added exercises. Not used by the sequence builder.
    #[serde(default = "default_exercise_secs", alias = "default_exercise_duration")]
    pub default_exercise_secs: u32,
    #[serde(default)]
    pub splits: Vec<Split>,
}

fn default_sets() -> u32 {
    1
}
fn default_rest_secs() -> u32 {
    30
}
fn default_exercise_secs() -> u32 {
    45
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            splits: Vec::new(),
            default_rest_secs: default_rest_secs(),
            warmup_secs: 0,
            default_exercise_secs: default_exercise_secs(),
        }
    }
}

impl WorkoutConfig {
    pub fn new(splits: Vec<Split>, default_rest_secs: u32, warmup_secs: u32) -> Self {
        Self {
            splits,
            default_rest_secs,
            warmup_secs,
            ..Self::default()
        }
    }

    /// Read a workout from a TOML or JSON file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::WorkoutFile {
            path: path.to_path_buf(),
            source,
        })?;
        let workout = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        Ok(workout)
    }

    /// Check the structural rules the sequence builder relies on.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty id, a split with zero sets,
    /// or a duplicated split/exercise id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut split_ids = HashSet::new();
        for split in &self.splits {
            if split.id.is_empty() {
                return Err(ValidationError::EmptyId(format!("split '{}'", split.name)));
            }
            if !split_ids.insert(split.id.as_str()) {
                return Err(ValidationError::DuplicateSplit(split.id.clone()));
            }
            if split.sets == 0 {
                return Err(ValidationError::ZeroSets {
                    split_id: split.id.clone(),
                });
            }
            let mut exercise_ids = HashSet::new();
            for exercise in &split.exercises {
                if exercise.id.is_empty() {
                    return Err(ValidationError::EmptyId(format!(
                        "exercise '{}'",
                        exercise.name
                    )));
                }
                if !exercise_ids.insert(exercise.id.as_str()) {
                    return Err(ValidationError::DuplicateExercise {
                        split_id: split.id.clone(),
                        exercise_id: exercise.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Sum of all segment durations the workout expands to.
    pub fn total_duration_secs(&self) -> u64 {
        sequence::build(self)
            .iter()
            .map(|s| u64::from(s.duration_secs))
            .sum()
    }

    pub fn segment_count(&self) -> usize {
        sequence::build(self).len()
    }

    pub fn split(&self, split_id: &str) -> Option<&Split> {
        self.splits.iter().find(|s| s.id == split_id)
    }

    fn split_mut(&mut self, split_id: &str) -> Option<&mut Split> {
        self.splits.iter_mut().find(|s| s.id == split_id)
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Append an empty split and return its generated id.
    pub fn add_split(&mut self, name: impl Into<String>, sets: u32) -> String {
        let split = Split::new(name, sets);
        let id = split.id.clone();
        self.splits.push(split);
        id
    }

    pub fn remove_split(&mut self, split_id: &str) -> bool {
        let before = self.splits.len();
        self.splits.retain(|s| s.id != split_id);
        self.splits.len() != before
    }

    pub fn update_split(&mut self, split_id: &str, update: SplitUpdate) -> bool {
        let Some(split) = self.split_mut(split_id) else {
            return false;
        };
        if let Some(name) = update.name {
            split.name = name;
        }
        if let Some(sets) = update.sets {
            split.sets = sets;
        }
        true
    }

    /// Append an exercise to a split. `duration_secs = None` uses
    /// `default_exercise_secs`. Returns the new exercise id, or `None` if the
    /// split does not exist.
    pub fn add_exercise(
        &mut self,
        split_id: &str,
        name: impl Into<String>,
        duration_secs: Option<u32>,
        bilateral: bool,
    ) -> Option<String> {
        let duration = duration_secs.unwrap_or(self.default_exercise_secs);
        let split = self.split_mut(split_id)?;
        let mut exercise = Exercise::new(name, duration);
        exercise.bilateral = bilateral;
        let id = exercise.id.clone();
        split.exercises.push(exercise);
        Some(id)
    }

    pub fn remove_exercise(&mut self, split_id: &str, exercise_id: &str) -> bool {
        let Some(split) = self.split_mut(split_id) else {
            return false;
        };
        let before = split.exercises.len();
        split.exercises.retain(|e| e.id != exercise_id);
        split.exercises.len() != before
    }

    pub fn update_exercise(
        &mut self,
        split_id: &str,
        exercise_id: &str,
        update: ExerciseUpdate,
    ) -> bool {
        let Some(exercise) = self
            .split_mut(split_id)
            .and_then(|s| s.exercises.iter_mut().find(|e| e.id == exercise_id))
        else {
            return false;
        };
        if let Some(name) = update.name {
            exercise.name = name;
        }
        if let Some(duration) = update.duration_secs {
            exercise.duration_secs = duration;
        }
        if let Some(bilateral) = update.bilateral {
            exercise.bilateral = bilateral;
        }
        true
    }

    /// Change the default durations. Exercises still set to the old default
    /// exercise duration follow the new one; customised exercises keep theirs.
    pub fn set_default_durations(&mut self, exercise_secs: u32, rest_secs: u32) {
        let old = self.default_exercise_secs;
        self.default_exercise_secs = exercise_secs;
        self.default_rest_secs = rest_secs;
        if old == exercise_secs {
            return;
        }
        for exercise in self.splits.iter_mut().flat_map(|s| s.exercises.iter_mut()) {
            if exercise.duration_secs == old {
                exercise.duration_secs = exercise_secs;
            }
        }
    }

    /// Drop every split, keeping the default durations.
    pub fn clear(&mut self) {
        self.splits.clear();
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
