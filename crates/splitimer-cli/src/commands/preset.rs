use splitimer_core::workout::calisthenics;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workout = calisthenics();
    if json {
        println!("{}", serde_json::to_string_pretty(&workout)?);
    } else {
        println!("{}", toml::to_string_pretty(&workout)?);
    }
    Ok(())
}
