use clap::Subcommand;
use splitimer_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "defaults.rest_secs", "cues.enabled")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List {
        /// Print the whole config as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    Path,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                for (key, value) in config.entries() {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
