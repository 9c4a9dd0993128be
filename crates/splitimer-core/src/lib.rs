//! # Splitimer Core Library
//!
//! This library provides the core logic for the Splitimer interval workout
//! timer. Workouts are groups of exercises ("splits") repeated for a number of
//! sets; a run alternates exercise and rest periods with audio cues at the
//! transitions.
//!
//! ## Architecture
//!
//! - **Sequence builder**: expands a [`WorkoutConfig`] into a flat list of
//!   timed [`Segment`]s (warmup, exercises, rests, split rests)
//! - **Timer Engine**: a synchronous state machine over that sequence. The
//!   caller owns the clock and invokes `tick()` while running
//! - **Cues**: turns consecutive engine observations into audio cue decisions
//! - **Library**: named saved workouts, seeded with a calisthenics routine
//! - **Storage**: TOML-based application settings and workout library
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`WorkoutConfig`]: Workout definition and editing helpers
//! - [`WorkoutLibrary`]: Saved workouts
//! - [`CueTracker`]: Audio cue decisions for hosts
//! - [`Config`]: Application configuration management

pub mod cues;
pub mod error;
pub mod events;
pub mod format;
pub mod storage;
pub mod timer;
pub mod workout;

pub use cues::{Cue, CueProfile, CueTracker};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use format::format_clock;
pub use storage::Config;
pub use timer::{Segment, SegmentKind, TimerEngine, TimerSnapshot, TimerStatus};
pub use workout::{
    Exercise, ExerciseUpdate, SavedWorkout, Split, SplitUpdate, WorkoutConfig, WorkoutLibrary,
    WorkoutUpdate,
};
