use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "splitimer-cli", version, about = "Splitimer interval workout timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the segment sequence a workout expands to
    Plan(commands::plan::PlanArgs),
    /// Run a workout with a live countdown
    Run(commands::run::RunArgs),
    /// Print the built-in calisthenics workout
    Preset {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Manage saved workouts
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("SPLITIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Preset { json } => commands::preset::run(json),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
