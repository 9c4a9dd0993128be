//! Live workout run: drives a `TimerEngine` from a wall clock.
//!
//! Ticks are scheduled on a tokio interval but the elapsed time handed to the
//! engine is measured, so a late wakeup is corrected on the next tick rather
//! than lost. Single-letter commands on stdin control the run:
//! `p` pause/resume, `n` next, `b` back, `r` restart segment, `q` quit.

use std::time::{Duration, Instant};

use clap::Args;
use splitimer_core::{
    format_clock, Config, Cue, CueProfile, CueTracker, Event, SegmentKind, TimerEngine,
    TimerStatus,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::WorkoutArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
    /// Print engine events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
    /// Do not print audio cues
    #[arg(long)]
    pub quiet: bool,
}

/// Whole seconds elapsed on a monotonic clock, carrying the remainder.
#[derive(Debug)]
struct WallClock {
    last: Instant,
    carry: Duration,
}

impl WallClock {
    fn new(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    /// Forget time that passed while the engine was not running.
    fn restart(&mut self, now: Instant) {
        self.last = now;
        self.carry = Duration::ZERO;
    }

    fn elapsed_secs(&mut self, now: Instant) -> u32 {
        self.carry += now.saturating_duration_since(self.last);
        self.last = now;
        let whole = self.carry.as_secs();
        self.carry -= Duration::from_secs(whole);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}

enum Control {
    TogglePause,
    Next,
    Back,
    Restart,
    Quit,
}

fn parse_control(line: &str) -> Option<Control> {
    match line.trim() {
        "p" | "pause" | "" => Some(Control::TogglePause),
        "n" | "next" => Some(Control::Next),
        "b" | "back" => Some(Control::Back),
        "r" | "restart" => Some(Control::Restart),
        "q" | "quit" => Some(Control::Quit),
        _ => None,
    }
}

struct Reporter {
    json: bool,
    cues_enabled: bool,
    profile: CueProfile,
}

impl Reporter {
    fn event(&self, engine: &TimerEngine, event: &Event) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        let remaining = format_clock(engine.total_remaining_secs());
        match event {
            Event::TimerInitialized {
                segment_count,
                total_secs,
                ..
            } => println!(
                "workout loaded: {segment_count} segments, {}",
                format_clock(*total_secs)
            ),
            Event::TimerStarted {
                segment_name,
                remaining_secs,
                ..
            } => println!(
                "start  {segment_name} ({})",
                format_clock(u64::from(*remaining_secs))
            ),
            Event::TimerPaused { .. } => println!("paused"),
            Event::TimerResumed { .. } => println!("resumed"),
            Event::SegmentAdvanced {
                segment_kind,
                segment_name,
                ..
            }
            | Event::SegmentSkipped {
                segment_kind,
                segment_name,
                ..
            } => {
                let marker = match segment_kind {
                    SegmentKind::Exercise => ">>",
                    SegmentKind::Rest => "..",
                };
                println!(
                    "{marker} {segment_name} ({}) [{remaining} left]",
                    format_clock(u64::from(engine.current_remaining_secs()))
                );
            }
            Event::SegmentRewound { segment_name, .. } => {
                println!("<< {segment_name} [{remaining} left]");
            }
            Event::CountdownReset { .. } => println!("segment restarted [{remaining} left]"),
            Event::WorkoutCompleted { .. } => println!("workout complete"),
            Event::TimerReset { .. } => println!("stopped"),
            Event::StateSnapshot { .. } => println!("{}", serde_json::to_string(event)?),
        }
        Ok(())
    }

    fn cues(&self, cues: &[Cue]) -> Result<(), serde_json::Error> {
        if !self.cues_enabled {
            return Ok(());
        }
        for cue in cues {
            if self.json {
                println!("{}", serde_json::to_string(&self.cue_json(cue)?)?);
                continue;
            }
            let profile = self.profile;
            match cue {
                Cue::Countdown {
                    remaining_secs,
                    ascending,
                } => {
                    let dir = if *ascending { "up" } else { "down" };
                    println!("   beep {remaining_secs} ({dir}, {profile})");
                }
                Cue::WorkoutStart => println!("   ding: workout start ({profile})"),
                Cue::ExerciseStart => println!("   ding: exercise ({profile})"),
                Cue::RestStart => println!("   ding: rest ({profile})"),
                Cue::WorkoutComplete => println!("   ding: done ({profile})"),
            }
        }
        Ok(())
    }

    /// The cue as JSON with the configured tone profile attached.
    fn cue_json(&self, cue: &Cue) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = serde_json::to_value(cue)?;
        if let Some(map) = value.as_object_mut() {
            map.insert("profile".to_string(), serde_json::to_value(self.profile)?);
        }
        Ok(value)
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Config::load_or_default();
    let workout = args.workout.resolve(settings.defaults.warmup_secs)?;
    let reporter = Reporter {
        json: args.json,
        cues_enabled: settings.cues.enabled && !args.quiet,
        profile: settings.cues.profile,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(workout, &settings, &reporter))
}

async fn drive(
    workout: splitimer_core::WorkoutConfig,
    settings: &Config,
    reporter: &Reporter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new();
    let mut tracker = CueTracker::new(settings.cues.countdown_secs);

    let init = engine.try_initialize(workout)?;
    reporter.event(&engine, &init)?;
    if engine.current_segment().is_none() {
        println!("nothing to run");
        return Ok(());
    }
    if let Some(event) = engine.start() {
        reporter.event(&engine, &event)?;
    }
    reporter.cues(&tracker.observe(&engine))?;

    let period = Duration::from_millis(settings.clock.tick_ms.max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    let mut clock = WallClock::new(Instant::now());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                if engine.status() != TimerStatus::Running {
                    clock.restart(now);
                    continue;
                }
                let secs = clock.elapsed_secs(now);
                for event in engine.tick(secs) {
                    reporter.event(&engine, &event)?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) | Err(_) => {
                        stdin_open = false;
                        continue;
                    }
                };
                let Some(control) = parse_control(&line) else {
                    debug!(input = %line, "unrecognised control");
                    continue;
                };
                let event = match control {
                    Control::TogglePause if engine.status() == TimerStatus::Running => {
                        engine.pause()
                    }
                    Control::TogglePause => {
                        clock.restart(Instant::now());
                        engine.start()
                    }
                    Control::Next => engine.go_to_next(),
                    Control::Back => engine.go_to_previous(),
                    Control::Restart => engine.reset_current_countdown(),
                    Control::Quit => engine.reset(),
                };
                if let Some(event) = event {
                    reporter.event(&engine, &event)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if let Some(event) = engine.reset() {
                    reporter.event(&engine, &event)?;
                }
            }
        }

        reporter.cues(&tracker.observe(&engine))?;
        if matches!(engine.status(), TimerStatus::Completed) || engine.config().is_none() {
            break;
        }
    }
    Ok(())
}
