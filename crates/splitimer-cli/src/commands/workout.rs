use clap::Subcommand;
use splitimer_core::error::CoreError;
use splitimer_core::{format_clock, Config, SavedWorkout, WorkoutLibrary};

use super::WorkoutArgs;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List saved workouts
    List {
        /// Print the library as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a workout file (or the current workout) under a name
    Save {
        /// Name for the saved workout
        name: String,
        #[command(flatten)]
        workout: WorkoutArgs,
    },
    /// Print a saved workout as TOML
    Show {
        /// Saved workout id or name
        key: String,
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Rename a saved workout
    Rename {
        /// Saved workout id or name
        key: String,
        /// New name
        name: String,
    },
    /// Delete a saved workout
    Rm {
        /// Saved workout id or name
        key: String,
    },
    /// Make a saved workout the default for `plan` and `run`
    Use {
        /// Saved workout id or name; omit to clear the selection
        key: Option<String>,
    },
}

fn lookup<'a>(library: &'a WorkoutLibrary, key: &str) -> Result<&'a SavedWorkout, CoreError> {
    library
        .find(key)
        .ok_or_else(|| CoreError::UnknownWorkout(key.to_string()))
}

fn list_line(saved: &SavedWorkout, current: bool) -> String {
    let marker = if current { "*" } else { " " };
    format!(
        "{marker} {:<36}  {:<36}  {:>3} segments  {}",
        saved.id,
        saved.name,
        saved.workout.segment_count(),
        format_clock(saved.workout.total_duration_secs()),
    )
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut library = WorkoutLibrary::load()?;
    match action {
        WorkoutAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&library)?);
            } else if library.is_empty() {
                println!("no saved workouts");
            } else {
                for saved in library.workouts() {
                    let current = library.current_id() == Some(saved.id.as_str());
                    println!("{}", list_line(saved, current));
                }
            }
        }
        WorkoutAction::Save { name, workout } => {
            let settings = Config::load_or_default();
            let config = workout.resolve(settings.defaults.warmup_secs)?;
            let id = library.save(name, &config);
            library.save()?;
            println!("{id}");
        }
        WorkoutAction::Show { key, json } => {
            let saved = lookup(&library, &key)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&saved.workout)?);
            } else {
                print!("{}", toml::to_string_pretty(&saved.workout)?);
            }
        }
        WorkoutAction::Rename { key, name } => {
            let id = lookup(&library, &key)?.id.clone();
            library.rename(&id, name);
            library.save()?;
            println!("ok");
        }
        WorkoutAction::Rm { key } => {
            let id = lookup(&library, &key)?.id.clone();
            library.delete(&id);
            library.save()?;
            println!("deleted {id}");
        }
        WorkoutAction::Use { key } => {
            let id = match key {
                Some(key) => Some(lookup(&library, &key)?.id.clone()),
                None => None,
            };
            library.set_current(id.as_deref());
            library.save()?;
            println!("ok");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_line_marks_current() {
        let library = WorkoutLibrary::new();
        let saved = &library.workouts()[0];
        let line = list_line(saved, true);
        assert!(line.starts_with('*'));
        assert!(line.contains("59 segments"));
        assert!(line.contains("37:00"));
        assert!(list_line(saved, false).starts_with(' '));
    }

    #[test]
    fn lookup_reports_unknown_workout() {
        let library = WorkoutLibrary::new();
        let err = lookup(&library, "nope").unwrap_err();
        assert_eq!(err.to_string(), "No saved workout named 'nope'");
    }
}
