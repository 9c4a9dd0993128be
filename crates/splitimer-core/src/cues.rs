//! Audio cue decisions.
//!
//! The engine only reports state; deciding which sound is due is done here by
//! comparing consecutive observations. Tone synthesis belongs to the host.

use serde::{Deserialize, Serialize};

use crate::timer::{SegmentKind, TimerEngine, TimerStatus};

/// Seconds before a segment ends at which the countdown beeps begin.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    WorkoutStart,
    ExerciseStart,
    RestStart,
    /// One beep of the final countdown. `ascending` is set when an exercise
    /// follows.
    Countdown { remaining_secs: u32, ascending: bool },
    WorkoutComplete,
}

/// Named tone set the host plays cues with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueProfile {
    #[default]
    Clean,
    Pixel,
    Serenity,
}

impl CueProfile {
    pub const ALL: [CueProfile; 3] = [CueProfile::Clean, CueProfile::Pixel, CueProfile::Serenity];

    pub fn name(self) -> &'static str {
        match self {
            CueProfile::Clean => "clean",
            CueProfile::Pixel => "pixel",
            CueProfile::Serenity => "serenity",
        }
    }
}

impl std::fmt::Display for CueProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remembers the previous observation of an engine and turns differences
/// into cues. Call [`CueTracker::observe`] after every engine command.
#[derive(Debug, Clone)]
pub struct CueTracker {
    countdown_secs: u32,
    last_status: TimerStatus,
    last_index: Option<usize>,
    last_remaining: Option<u32>,
}

impl Default for CueTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}

impl CueTracker {
    pub fn new(countdown_secs: u32) -> Self {
        Self {
            countdown_secs,
            last_status: TimerStatus::Idle,
            last_index: None,
            last_remaining: None,
        }
    }

    pub fn observe(&mut self, engine: &TimerEngine) -> Vec<Cue> {
        let mut cues = Vec::new();
        let status = engine.status();
        let current = engine.current_segment();
        let index = current.map(|s| s.index);
        let remaining = engine.current_remaining_secs();

        match status {
            TimerStatus::Completed if self.last_status != TimerStatus::Completed => {
                cues.push(Cue::WorkoutComplete);
            }
            TimerStatus::Running => {
                let moved = index != self.last_index;
                if self.last_status == TimerStatus::Idle {
                    cues.push(Cue::WorkoutStart);
                } else if moved {
                    match current.map(|s| s.kind) {
                        Some(SegmentKind::Exercise) => cues.push(Cue::ExerciseStart),
                        Some(SegmentKind::Rest) => cues.push(Cue::RestStart),
                        None => {}
                    }
                }

                // One beep per second crossed since the last observation.
                let upper = match self.last_remaining {
                    _ if moved => current
                        .map_or(remaining, |s| s.duration_secs.max(remaining))
                        .saturating_add(1),
                    Some(last) if last >= remaining => last,
                    _ => remaining.saturating_add(1),
                };
                let upper = upper.min(self.countdown_secs.saturating_add(1));
                if remaining.max(1) < upper {
                    let ascending = engine
                        .upcoming_segment()
                        .is_some_and(|s| s.kind == SegmentKind::Exercise);
                    for secs in (remaining.max(1)..upper).rev() {
                        cues.push(Cue::Countdown {
                            remaining_secs: secs,
                            ascending,
                        });
                    }
                }
            }
            _ => {}
        }

        self.last_status = status;
        self.last_index = index;
        self.last_remaining = Some(remaining);
        cues
    }
}
