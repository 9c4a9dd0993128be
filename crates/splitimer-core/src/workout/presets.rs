use super::{Exercise, Split, WorkoutConfig};

/// The r/calisthenics recommended routine: three paired strength splits and
/// a core split, three sets each, 45 s per exercise and 30 s rest.
pub fn calisthenics() -> WorkoutConfig {
    let pair = |name: &str, a: &str, b: &str| {
        Split::new(name, 3)
            .with_exercise(Exercise::new(a, 45))
            .with_exercise(Exercise::new(b, 45))
    };
    let core = Split::new("Core", 3)
        .with_exercise(Exercise::new("Plank", 45))
        .with_exercise(Exercise::new("Copenhagen plank", 45).bilateral())
        .with_exercise(Exercise::new("Reverse hyperextension", 45));

    let mut config = WorkoutConfig::new(
        vec![
            pair("Split 1", "Pull-up", "Squat"),
            pair("Split 2", "Dips", "Hinge"),
            pair("Split 3", "Row", "Push-up"),
            core,
        ],
        30,
        0,
    );
    config.default_exercise_secs = 45;
    config
}
