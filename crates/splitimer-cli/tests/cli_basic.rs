//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_splitimer-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("SPLITIMER_ENV")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn write_workout(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("short.toml");
    std::fs::write(
        &path,
        r#"
default_rest_secs = 1

[[splits]]
id = "a"
name = "A"
sets = 1

[[splits.exercises]]
id = "hop"
name = "Hop"
duration_secs = 1

[[splits.exercises]]
id = "skip"
name = "Skip"
duration_secs = 1
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let file = write_workout(home.path());
    let (code, stdout, stderr) = run_cli(home.path(), &["plan", file.to_str().unwrap(), "--json"]);
    assert_eq!(code, 0, "plan failed: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_secs"], 3);
    let segments = parsed["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1]["kind"], "rest");
}

#[test]
fn test_plan_default_preset() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["plan"]);
    assert_eq!(code, 0, "plan failed");
    assert!(stdout.contains("Pull-up"));
    assert!(stdout.contains("Split Rest"));
}

#[test]
fn test_plan_rest_override() {
    let home = tempfile::tempdir().unwrap();
    let file = write_workout(home.path());
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", file.to_str().unwrap(), "--rest", "0", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_secs"], 2);
}

#[test]
fn test_plan_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["plan", "/nonexistent/workout.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_preset_toml_parses_back() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["preset"]);
    assert_eq!(code, 0, "preset failed");

    let path = home.path().join("preset.toml");
    std::fs::write(&path, &stdout).unwrap();
    let (code, plan, _) = run_cli(home.path(), &["plan", path.to_str().unwrap(), "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&plan).unwrap();
    assert_eq!(parsed["segments"].as_array().unwrap().len(), 59);
}

#[test]
fn test_config_set_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "defaults.rest_secs", "20"]);
    assert_eq!(code, 0, "config set failed");

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "defaults.rest_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");
}

#[test]
fn test_config_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_path_is_under_home() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with(home.path().to_str().unwrap()));
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_run_short_workout_json() {
    let home = tempfile::tempdir().unwrap();
    let file = write_workout(home.path());
    let (code, stdout, stderr) = run_cli(home.path(), &["run", file.to_str().unwrap(), "--json"]);
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("\"TimerInitialized\""));
    assert!(stdout.contains("\"WorkoutCompleted\""));
    assert!(stdout.contains("workout_complete"));
    assert!(stdout.contains("\"profile\":\"clean\""));
}

#[test]
fn test_workout_list_has_seeded_routine() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(home.path(), &["workout", "list"]);
    assert_eq!(code, 0, "workout list failed: {stderr}");
    assert!(stdout.contains("default-calisthenics"));
    assert!(stdout.contains("r/calisthenics recommended routine"));
}

#[test]
fn test_workout_save_use_and_remove() {
    let home = tempfile::tempdir().unwrap();
    let file = write_workout(home.path());

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["workout", "save", "Hops", file.to_str().unwrap()],
    );
    assert_eq!(code, 0, "workout save failed: {stderr}");
    let id = stdout.trim().to_string();

    // A saved workout becomes the default for plan.
    let (code, plan, _) = run_cli(home.path(), &["plan", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&plan).unwrap();
    assert_eq!(parsed["total_secs"], 3);

    let (code, _, _) = run_cli(home.path(), &["workout", "use", "default-calisthenics"]);
    assert_eq!(code, 0);
    let (_, plan, _) = run_cli(home.path(), &["plan", "--saved", "Hops", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&plan).unwrap();
    assert_eq!(parsed["segment_count"], 3);

    let (code, _, _) = run_cli(home.path(), &["workout", "rename", &id, "Jumps"]);
    assert_eq!(code, 0);
    let (code, shown, _) = run_cli(home.path(), &["workout", "show", "Jumps"]);
    assert_eq!(code, 0);
    assert!(shown.contains("name = \"Hop\""));

    let (code, _, _) = run_cli(home.path(), &["workout", "rm", "Jumps"]);
    assert_eq!(code, 0);
    let (code, _, stderr) = run_cli(home.path(), &["workout", "show", "Jumps"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No saved workout named 'Jumps'"));
}

#[test]
fn test_config_set_cue_profile() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "cues.profile", "serenity"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "cues.profile"]);
    assert_eq!(stdout.trim(), "serenity");

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "cues.profile", "chiptune"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cues.profile"));
}
