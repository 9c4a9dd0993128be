//! Timer engine implementation.
//!
//! The engine is a synchronous state machine over a built segment sequence.
//! It does not own a clock: the caller invokes `tick(elapsed_secs)` while the
//! engine is running, typically once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v
//!       Completed
//! ```
//!
//! `reset()` returns to an empty `Idle` from anywhere.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.initialize(config);
//! engine.start();
//! // Once per second:
//! for event in engine.tick(1) { /* cue audio */ }
//! ```
//!
//! After every command `total_remaining_secs` equals the current segment's
//! remaining time plus the durations of everything still queued.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::sequence::{self, Segment};
use crate::error::ValidationError;
use crate::events::Event;
use crate::workout::WorkoutConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Point-in-time copy of the engine's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub current: Option<Segment>,
    pub current_remaining_secs: u32,
    pub total_remaining_secs: u64,
    pub queue: Vec<Segment>,
    pub position: usize,
}

/// Interval workout engine.
///
/// Holds an owned copy of the workout it was initialized with so the
/// sequence can be rebuilt for backward navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerEngine {
    config: Option<WorkoutConfig>,
    status: TimerStatus,
    current: Option<Segment>,
    current_remaining_secs: u32,
    total_remaining_secs: u64,
    queue: VecDeque<Segment>,
    position: usize,
    /// Duration of the whole sequence, for progress reporting.
    #[serde(default)]
    sequence_secs: u64,
    #[serde(default)]
    sequence_len: usize,
}

impl TimerEngine {
    /// An empty, idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `new()` followed by `initialize(config)`.
    pub fn with_config(config: WorkoutConfig) -> Self {
        let mut engine = Self::new();
        engine.initialize(config);
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.current.as_ref()
    }

    pub fn current_remaining_secs(&self) -> u32 {
        self.current_remaining_secs
    }

    pub fn total_remaining_secs(&self) -> u64 {
        self.total_remaining_secs
    }

    pub fn queue(&self) -> &VecDeque<Segment> {
        &self.queue
    }

    pub fn upcoming_segment(&self) -> Option<&Segment> {
        self.queue.front()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    pub fn config(&self) -> Option<&WorkoutConfig> {
        self.config.as_ref()
    }

    /// 0.0 .. 1.0 elapsed fraction of the current segment.
    pub fn segment_progress(&self) -> f64 {
        let Some(duration) = self.current.as_ref().map(|s| s.duration_secs) else {
            return 0.0;
        };
        if duration == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.current_remaining_secs) / f64::from(duration)
    }

    /// 0.0 .. 100.0 progress across the entire sequence.
    pub fn workout_progress_pct(&self) -> f64 {
        if self.status == TimerStatus::Completed {
            return 100.0;
        }
        if self.sequence_secs == 0 {
            return 0.0;
        }
        let done = self.sequence_secs.saturating_sub(self.total_remaining_secs);
        (done as f64 / self.sequence_secs as f64 * 100.0).min(100.0)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status,
            current: self.current.clone(),
            current_remaining_secs: self.current_remaining_secs,
            total_remaining_secs: self.total_remaining_secs,
            queue: self.queue.iter().cloned().collect(),
            position: self.position,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            position: self.position,
            segment_kind: self.current.as_ref().map(|s| s.kind),
            segment_name: self.current.as_ref().map(|s| s.name.clone()),
            current_remaining_secs: self.current_remaining_secs,
            total_remaining_secs: self.total_remaining_secs,
            upcoming_kind: self.upcoming_segment().map(|s| s.kind),
            workout_progress_pct: self.workout_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load a workout and position at its first segment, idle.
    pub fn initialize(&mut self, config: WorkoutConfig) -> Event {
        let segments = sequence::build(&config);
        let total = sequence::total_secs(&segments);
        let segment_count = segments.len();

        *self = Self {
            config: Some(config),
            total_remaining_secs: total,
            sequence_secs: total,
            sequence_len: segment_count,
            ..Self::default()
        };
        self.queue = segments.into();
        if let Some(first) = self.queue.pop_front() {
            self.current_remaining_secs = first.duration_secs;
            self.current = Some(first);
        }

        debug!(segment_count, total_secs = total, "timer initialized");
        Event::TimerInitialized {
            segment_count,
            total_secs: total,
            at: Utc::now(),
        }
    }

    /// Validate `config` before loading it.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the engine is left untouched.
    pub fn try_initialize(&mut self, config: WorkoutConfig) -> Result<Event, ValidationError> {
        config.validate()?;
        Ok(self.initialize(config))
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Idle => {
                let current = self.current.as_ref()?;
                let event = Event::TimerStarted {
                    position: self.position,
                    segment_kind: current.kind,
                    segment_name: current.name.clone(),
                    remaining_secs: self.current_remaining_secs,
                    at: Utc::now(),
                };
                self.status = TimerStatus::Running;
                Some(event)
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.current_remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerStatus::Running | TimerStatus::Completed => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.status = TimerStatus::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.current_remaining_secs,
            at: Utc::now(),
        })
    }

    /// Consume `elapsed_secs` of running time.
    ///
    /// Time left over after the current segment runs out flows into the
    /// following segments, so one call may pass several transitions.
    /// Zero-length segments are passed through as soon as they are reached.
    /// Ignored unless running.
    pub fn tick(&mut self, elapsed_secs: u32) -> Vec<Event> {
        let mut events = Vec::new();
        if self.status != TimerStatus::Running {
            return events;
        }

        let mut left = elapsed_secs;
        while self.current.is_some() {
            let take = left.min(self.current_remaining_secs);
            self.current_remaining_secs -= take;
            self.total_remaining_secs = self.total_remaining_secs.saturating_sub(u64::from(take));
            left -= take;

            if self.current_remaining_secs > 0 {
                break;
            }
            events.push(self.advance());
            if left == 0 && self.current_remaining_secs > 0 {
                break;
            }
        }
        events
    }

    /// Restart the current segment's countdown, crediting the consumed time
    /// back to the total.
    pub fn reset_current_countdown(&mut self) -> Option<Event> {
        let duration = self.current.as_ref()?.duration_secs;
        let restored = duration.saturating_sub(self.current_remaining_secs);
        self.current_remaining_secs = duration;
        self.total_remaining_secs += u64::from(restored);
        Some(Event::CountdownReset {
            position: self.position,
            restored_secs: restored,
            at: Utc::now(),
        })
    }

    /// Step back to the previous segment with its full duration.
    ///
    /// The sequence is rebuilt from the stored workout and the current
    /// segment is located by its index. No-op on the first segment.
    pub fn go_to_previous(&mut self) -> Option<Event> {
        let Some(current) = self.current.as_ref() else {
            debug!("go_to_previous ignored: no current segment");
            return None;
        };
        let Some(config) = self.config.as_ref() else {
            warn!("go_to_previous ignored: no workout configuration stored");
            return None;
        };

        let segments = sequence::build(config);
        let Some(found) = segments.iter().position(|s| s.index == current.index) else {
            warn!(
                index = current.index,
                "go_to_previous ignored: current segment missing from rebuilt sequence"
            );
            return None;
        };
        if found == 0 {
            return None;
        }

        let from = self.position;
        let target = found - 1;
        let mut rest = segments.into_iter().skip(target);
        let previous = rest.next()?;
        self.queue = rest.collect();
        self.current_remaining_secs = previous.duration_secs;
        self.total_remaining_secs =
            u64::from(previous.duration_secs) + sequence::total_secs(&self.queue);
        self.position = target;

        let event = Event::SegmentRewound {
            from_position: from,
            to_position: target,
            segment_kind: previous.kind,
            segment_name: previous.name.clone(),
            at: Utc::now(),
        };
        self.current = Some(previous);
        Some(event)
    }

    /// Skip to the next segment. The current segment's remaining time is
    /// forfeited; skipping the last segment completes the workout.
    pub fn go_to_next(&mut self) -> Option<Event> {
        self.current.as_ref()?;
        let from = self.position;
        let forfeited = self.current_remaining_secs;
        self.total_remaining_secs = self.total_remaining_secs.saturating_sub(u64::from(forfeited));
        self.current_remaining_secs = 0;

        let event = self.advance();
        let Some(next) = self.current.as_ref() else {
            return Some(event);
        };
        Some(Event::SegmentSkipped {
            from_position: from,
            to_position: self.position,
            segment_kind: next.kind,
            segment_name: next.name.clone(),
            forfeited_secs: forfeited,
            at: Utc::now(),
        })
    }

    /// Discard the workout and return to a fresh idle engine.
    pub fn reset(&mut self) -> Option<Event> {
        *self = Self::default();
        Some(Event::TimerReset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let Some(next) = self.queue.pop_front() else {
            return self.complete();
        };
        self.current_remaining_secs = next.duration_secs;
        self.position += 1;
        debug!(position = self.position, name = %next.name, "segment advanced");
        let event = Event::SegmentAdvanced {
            position: self.position,
            segment_kind: next.kind,
            segment_name: next.name.clone(),
            duration_secs: next.duration_secs,
            upcoming_kind: self.queue.front().map(|s| s.kind),
            at: Utc::now(),
        };
        self.current = Some(next);
        event
    }

    fn complete(&mut self) -> Event {
        self.status = TimerStatus::Completed;
        self.current = None;
        self.current_remaining_secs = 0;
        self.total_remaining_secs = 0;
        info!("workout completed");
        Event::WorkoutCompleted { at: Utc::now() }
    }
}
