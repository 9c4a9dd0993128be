//! Expansion of a [`WorkoutConfig`] into the flat list of timed segments the
//! engine runs through.
//!
//! ```text
//! [Warmup] -> split 1 { set 1 { ex, rest, ex, rest } .. set N { ex, rest, ex } }
//!          -> Split Rest -> split 2 { .. } -> .. -> last exercise
//! ```
//!
//! Building is pure and deterministic: the same config always yields the same
//! segments, including their `index`. The engine relies on this to rebuild
//! the sequence when navigating backwards.

use serde::{Deserialize, Serialize};

use crate::workout::{Exercise, Split, WorkoutConfig};

pub const WARMUP_SPLIT_ID: &str = "system-warmup";
pub const WARMUP_NAME: &str = "Warmup";
pub const REST_NAME: &str = "Rest";
pub const SPLIT_REST_NAME: &str = "Split Rest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Exercise,
    Rest,
}

/// One timed unit of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in the built sequence, assigned in emission order.
    pub index: usize,
    pub kind: SegmentKind,
    pub split_id: String,
    /// `None` for rests and the warmup.
    pub exercise_id: Option<String>,
    pub name: String,
    pub duration_secs: u32,
    /// 0-based set within the split.
    pub set_index: u32,
    /// 0-based exercise within the split.
    pub exercise_index: u32,
    /// 1-based set across the whole workout; 0 for the warmup.
    pub global_set: u32,
}

impl Segment {
    pub fn is_exercise(&self) -> bool {
        self.kind == SegmentKind::Exercise
    }

    pub fn is_rest(&self) -> bool {
        self.kind == SegmentKind::Rest
    }
}

/// Where in the workout a segment is emitted from.
#[derive(Clone, Copy)]
struct Slot<'a> {
    split: &'a Split,
    set_index: u32,
    exercise_index: u32,
    global_set: u32,
}

struct SequenceWriter {
    segments: Vec<Segment>,
    rest_secs: u32,
}

impl SequenceWriter {
    fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn next_index(&self) -> usize {
        self.segments.len()
    }

    fn exercise(&mut self, slot: Slot<'_>, exercise: &Exercise, name: String) {
        let segment = Segment {
            index: self.next_index(),
            kind: SegmentKind::Exercise,
            split_id: slot.split.id.clone(),
            exercise_id: Some(exercise.id.clone()),
            name,
            duration_secs: exercise.duration_secs,
            set_index: slot.set_index,
            exercise_index: slot.exercise_index,
            global_set: slot.global_set,
        };
        self.push(segment);
    }

    fn rest(&mut self, slot: Slot<'_>, name: &str) {
        let segment = Segment {
            index: self.next_index(),
            kind: SegmentKind::Rest,
            split_id: slot.split.id.clone(),
            exercise_id: None,
            name: name.to_string(),
            duration_secs: self.rest_secs,
            set_index: slot.set_index,
            exercise_index: slot.exercise_index,
            global_set: slot.global_set,
        };
        self.push(segment);
    }
}

/// Expand `config` into its ordered segments.
///
/// Splits without exercises produce no segments, but their sets still count
/// towards the global set number. A split rest only separates splits that
/// emitted segments.
pub fn build(config: &WorkoutConfig) -> Vec<Segment> {
    let mut out = SequenceWriter {
        segments: Vec::new(),
        rest_secs: config.default_rest_secs,
    };

    if config.warmup_secs > 0 {
        let segment = Segment {
            index: 0,
            kind: SegmentKind::Exercise,
            split_id: WARMUP_SPLIT_ID.to_string(),
            exercise_id: None,
            name: WARMUP_NAME.to_string(),
            duration_secs: config.warmup_secs,
            set_index: 0,
            exercise_index: 0,
            global_set: 0,
        };
        out.push(segment);
    }

    let mut global_set = 0;
    let mut previous: Option<Slot<'_>> = None;
    for split in &config.splits {
        if split.exercises.is_empty() {
            global_set += split.sets;
            continue;
        }
        if split.sets == 0 {
            continue;
        }
        if let Some(slot) = previous {
            out.rest(slot, SPLIT_REST_NAME);
        }

        let last_set = split.sets - 1;
        let last_exercise = split.exercises.len() - 1;

        for set_index in 0..split.sets {
            global_set += 1;
            for (exercise_index, exercise) in split.exercises.iter().enumerate() {
                let slot = Slot {
                    split,
                    set_index,
                    exercise_index: exercise_index as u32,
                    global_set,
                };

                if exercise.bilateral {
                    out.exercise(slot, exercise, format!("{} (Left)", exercise.name));
                    out.rest(slot, REST_NAME);
                    out.exercise(slot, exercise, format!("{} (Right)", exercise.name));
                } else {
                    out.exercise(slot, exercise, exercise.name.clone());
                }

                if !(set_index == last_set && exercise_index == last_exercise) {
                    out.rest(slot, REST_NAME);
                }
            }
        }

        previous = Some(Slot {
            split,
            set_index: last_set,
            exercise_index: last_exercise as u32,
            global_set,
        });
    }

    out.segments
}

/// Sum of segment durations.
pub fn total_secs<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> u64 {
    segments
        .into_iter()
        .map(|s| u64::from(s.duration_secs))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SegmentKind::{Exercise as Ex, Rest};

    fn split(id: &str, sets: u32, exercises: Vec<Exercise>) -> Split {
        Split {
            id: id.into(),
            name: id.to_uppercase(),
            sets,
            exercises,
        }
    }

    fn exercise(id: &str, name: &str, secs: u32) -> Exercise {
        Exercise {
            id: id.into(),
            name: name.into(),
            duration_secs: secs,
            bilateral: false,
        }
    }

    fn shape(segments: &[Segment]) -> Vec<(SegmentKind, u32)> {
        segments.iter().map(|s| (s.kind, s.duration_secs)).collect()
    }

    #[test]
    fn empty_config_builds_nothing() {
        let config = WorkoutConfig::new(vec![], 30, 0);
        assert!(build(&config).is_empty());
    }

    #[test]
    fn two_sets_two_exercises() {
        let config = WorkoutConfig::new(
            vec![split(
                "a",
                2,
                vec![exercise("x", "X", 10), exercise("y", "Y", 20)],
            )],
            5,
            0,
        );
        let seq = build(&config);
        assert_eq!(
            shape(&seq),
            vec![
                (Ex, 10),
                (Rest, 5),
                (Ex, 20),
                (Rest, 5),
                (Ex, 10),
                (Rest, 5),
                (Ex, 20)
            ]
        );
        assert_eq!(total_secs(&seq), 75);

        let sets: Vec<u32> = seq.iter().map(|s| s.set_index).collect();
        assert_eq!(sets, vec![0, 0, 0, 0, 1, 1, 1]);
        let exercises: Vec<u32> = seq.iter().map(|s| s.exercise_index).collect();
        assert_eq!(exercises, vec![0, 0, 1, 1, 0, 0, 1]);
        assert_eq!(seq[4].global_set, 2);
    }

    #[test]
    fn bilateral_expands_left_and_right() {
        let mut ex = exercise("x", "X", 15);
        ex.bilateral = true;
        let config = WorkoutConfig::new(vec![split("a", 1, vec![ex])], 10, 0);
        let seq = build(&config);

        let names: Vec<&str> = seq.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["X (Left)", "Rest", "X (Right)"]);
        assert_eq!(shape(&seq), vec![(Ex, 15), (Rest, 10), (Ex, 15)]);
        assert_eq!(seq[0].exercise_id.as_deref(), Some("x"));
        assert_eq!(seq[1].exercise_id, None);
    }

    #[test]
    fn split_rest_between_splits_only() {
        let config = WorkoutConfig::new(
            vec![
                split("a", 1, vec![exercise("x", "X", 10)]),
                split("b", 1, vec![exercise("y", "Y", 10)]),
            ],
            5,
            0,
        );
        let seq = build(&config);
        assert_eq!(shape(&seq), vec![(Ex, 10), (Rest, 5), (Ex, 10)]);
        assert_eq!(seq[1].name, SPLIT_REST_NAME);
        assert_eq!(seq[1].split_id, "a");
        assert_eq!(total_secs(&seq), 25);
    }

    #[test]
    fn global_set_continues_across_splits() {
        let config = WorkoutConfig::new(
            vec![
                split("a", 2, vec![exercise("x", "X", 10)]),
                split("b", 2, vec![exercise("y", "Y", 10)]),
            ],
            5,
            0,
        );
        let sets: Vec<u32> = build(&config)
            .iter()
            .filter(|s| s.is_exercise())
            .map(|s| s.global_set)
            .collect();
        assert_eq!(sets, vec![1, 2, 3, 4]);
    }

    #[test]
    fn warmup_only() {
        let config = WorkoutConfig::new(vec![], 5, 30);
        let seq = build(&config);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].name, WARMUP_NAME);
        assert_eq!(seq[0].split_id, WARMUP_SPLIT_ID);
        assert_eq!(seq[0].global_set, 0);
        assert_eq!(seq[0].kind, Ex);
    }

    #[test]
    fn warmup_is_followed_directly_by_first_exercise() {
        let config = WorkoutConfig::new(vec![split("a", 1, vec![exercise("x", "X", 10)])], 5, 20);
        let seq = build(&config);
        assert_eq!(shape(&seq), vec![(Ex, 20), (Ex, 10)]);
        assert_eq!(seq[1].global_set, 1);
    }

    #[test]
    fn empty_split_still_counts_its_sets() {
        let config = WorkoutConfig::new(
            vec![
                split("a", 1, vec![exercise("x", "X", 10)]),
                split("empty", 2, vec![]),
                split("b", 1, vec![exercise("y", "Y", 10)]),
            ],
            5,
            0,
        );
        let seq = build(&config);
        let names: Vec<&str> = seq.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["X", SPLIT_REST_NAME, "Y"]);
        assert_eq!(seq[0].global_set, 1);
        assert_eq!(seq[1].split_id, "a");
        assert_eq!(seq[2].global_set, 4);
    }

    #[test]
    fn empty_split_contributes_nothing() {
        let config = WorkoutConfig::new(
            vec![
                split("a", 1, vec![exercise("x", "X", 10)]),
                split("empty", 3, vec![]),
            ],
            5,
            0,
        );
        let seq = build(&config);
        assert_eq!(shape(&seq), vec![(Ex, 10)]);
    }

    #[test]
    fn zero_rest_still_emits_segments() {
        let config = WorkoutConfig::new(
            vec![split("a", 2, vec![exercise("x", "X", 10)])],
            0,
            0,
        );
        assert_eq!(shape(&build(&config)), vec![(Ex, 10), (Rest, 0), (Ex, 10)]);
    }

    #[test]
    fn indices_are_sequential() {
        let config = crate::workout::calisthenics();
        let seq = build(&config);
        assert!(seq.iter().enumerate().all(|(i, s)| s.index == i));
        assert!(seq.last().is_some_and(Segment::is_exercise));
    }

    #[test]
    fn build_is_deterministic() {
        let config = crate::workout::calisthenics();
        assert_eq!(build(&config), build(&config.clone()));
    }
}
