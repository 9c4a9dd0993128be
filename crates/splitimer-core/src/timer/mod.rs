mod engine;
pub mod sequence;

pub use engine::{TimerEngine, TimerSnapshot, TimerStatus};
pub use sequence::{build, Segment, SegmentKind};
