use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SegmentKind, TimerStatus};

/// Every engine command reports what changed as events.
/// Hosts use them to drive audio cues and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerInitialized {
        segment_count: usize,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        position: usize,
        segment_kind: SegmentKind,
        segment_name: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The current segment ran out and the next one took its place.
    SegmentAdvanced {
        position: usize,
        segment_kind: SegmentKind,
        segment_name: String,
        duration_secs: u32,
        upcoming_kind: Option<SegmentKind>,
        at: DateTime<Utc>,
    },
    /// The user skipped ahead, forfeiting the remaining time.
    SegmentSkipped {
        from_position: usize,
        to_position: usize,
        segment_kind: SegmentKind,
        segment_name: String,
        forfeited_secs: u32,
        at: DateTime<Utc>,
    },
    /// The user stepped back to the previous segment.
    SegmentRewound {
        from_position: usize,
        to_position: usize,
        segment_kind: SegmentKind,
        segment_name: String,
        at: DateTime<Utc>,
    },
    CountdownReset {
        position: usize,
        restored_secs: u32,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        position: usize,
        segment_kind: Option<SegmentKind>,
        segment_name: Option<String>,
        current_remaining_secs: u32,
        total_remaining_secs: u64,
        upcoming_kind: Option<SegmentKind>,
        workout_progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for events that move the run onto a different segment or end it.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Event::SegmentAdvanced { .. }
                | Event::SegmentSkipped { .. }
                | Event::SegmentRewound { .. }
                | Event::WorkoutCompleted { .. }
        )
    }
}
