use clap::Args;
use splitimer_core::timer::sequence;
use splitimer_core::{format_clock, Config, Segment, SegmentKind};

use super::WorkoutArgs;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
    /// Print the sequence as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Config::load_or_default();
    let workout = args.workout.resolve(settings.defaults.warmup_secs)?;
    let segments = sequence::build(&workout);
    let total_secs = sequence::total_secs(&segments);

    if args.json {
        let out = serde_json::json!({
            "segments": segments,
            "segment_count": segments.len(),
            "total_secs": total_secs,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{:>4}  {:<8}  {:>3}  {:<32}  {:>6}  {:>6}",
        "#", "kind", "set", "name", "length", "at"
    );
    let mut at = 0u64;
    for segment in &segments {
        println!("{}", plan_line(segment, at));
        at += u64::from(segment.duration_secs);
    }
    println!(
        "\n{} segments, {} total",
        segments.len(),
        format_clock(total_secs)
    );
    Ok(())
}

/// One table row; `at` is the offset of the segment from the start.
fn plan_line(segment: &Segment, at: u64) -> String {
    let kind = match segment.kind {
        SegmentKind::Exercise => "exercise",
        SegmentKind::Rest => "rest",
    };
    let set = if segment.global_set == 0 {
        "-".to_string()
    } else {
        segment.global_set.to_string()
    };
    format!(
        "{:>4}  {:<8}  {:>3}  {:<32}  {:>6}  {:>6}",
        segment.index,
        kind,
        set,
        segment.name,
        format_clock(u64::from(segment.duration_secs)),
        format_clock(at),
    )
}
