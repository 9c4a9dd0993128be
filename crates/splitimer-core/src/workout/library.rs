//! Named collection of saved workouts.
//!
//! A fresh library holds the built-in calisthenics routine. Saving copies
//! the given workout, so later edits to the caller's config do not leak into
//! the library. Reading and writing the library file lives in `storage`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{calisthenics, new_id, Split, WorkoutConfig};

/// Id of the seeded calisthenics routine.
pub const DEFAULT_WORKOUT_ID: &str = "default-calisthenics";
pub const DEFAULT_WORKOUT_NAME: &str = "r/calisthenics recommended routine";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkout {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub workout: WorkoutConfig,
}

/// Optional fields for [`WorkoutLibrary::update`].
#[derive(Debug, Clone, Default)]
pub struct WorkoutUpdate {
    pub name: Option<String>,
    pub splits: Option<Vec<Split>>,
    pub default_exercise_secs: Option<u32>,
    pub default_rest_secs: Option<u32>,
    pub warmup_secs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLibrary {
    /// The workout last loaded for a run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_id: Option<String>,
    #[serde(default)]
    workouts: Vec<SavedWorkout>,
}

impl Default for WorkoutLibrary {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            current_id: None,
            workouts: vec![SavedWorkout {
                id: DEFAULT_WORKOUT_ID.to_string(),
                name: DEFAULT_WORKOUT_NAME.to_string(),
                created_at: now,
                updated_at: now,
                workout: calisthenics(),
            }],
        }
    }
}

impl WorkoutLibrary {
    /// A library seeded with the calisthenics routine.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library with no workouts at all.
    pub fn empty() -> Self {
        Self {
            current_id: None,
            workouts: Vec::new(),
        }
    }

    pub fn workouts(&self) -> &[SavedWorkout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedWorkout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Look up by id first, then by exact name.
    pub fn find(&self, id_or_name: &str) -> Option<&SavedWorkout> {
        self.get(id_or_name)
            .or_else(|| self.workouts.iter().find(|w| w.name == id_or_name))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&SavedWorkout> {
        self.current_id.as_deref().and_then(|id| self.get(id))
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut SavedWorkout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// Store a copy of `workout` under `name`, make it current, and return
    /// its generated id.
    pub fn save(&mut self, name: impl Into<String>, workout: &WorkoutConfig) -> String {
        let now = Utc::now();
        let saved = SavedWorkout {
            id: new_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            workout: workout.clone(),
        };
        let id = saved.id.clone();
        debug!(id = %id, name = %saved.name, "workout saved");
        self.workouts.push(saved);
        self.current_id = Some(id.clone());
        id
    }

    pub fn update(&mut self, id: &str, update: WorkoutUpdate) -> bool {
        let Some(saved) = self.get_mut(id) else {
            return false;
        };
        if let Some(name) = update.name {
            saved.name = name;
        }
        if let Some(splits) = update.splits {
            saved.workout.splits = splits;
        }
        if let Some(secs) = update.default_exercise_secs {
            saved.workout.default_exercise_secs = secs;
        }
        if let Some(secs) = update.default_rest_secs {
            saved.workout.default_rest_secs = secs;
        }
        if let Some(secs) = update.warmup_secs {
            saved.workout.warmup_secs = secs;
        }
        saved.updated_at = Utc::now();
        true
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> bool {
        let Some(saved) = self.get_mut(id) else {
            return false;
        };
        saved.name = name.into();
        saved.updated_at = Utc::now();
        true
    }

    /// Remove a workout. Clears the current selection if it pointed there.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        self.workouts.len() != before
    }

    /// Select the current workout. `None` clears the selection; an unknown
    /// id is rejected and leaves the selection unchanged.
    pub fn set_current(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.current_id = None;
                true
            }
            Some(id) if self.get(id).is_some() => {
                self.current_id = Some(id.to_string());
                true
            }
            Some(_) => false,
        }
    }
}
