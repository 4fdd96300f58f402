use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the meal log, with its header line
pub fn handle(cli: &Cli) -> AppResult<()> {
    let log_path = Config::init_all(cli.log.clone(), cli.test)?;

    println!("⚙️  Initializing mealtimelogger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🍛 Meal log    : {}", log_path.display());

    let store = LogStore::open(&log_path);
    // `open` only logs a creation failure; here it is fatal.
    if !store.path().exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("could not create meal log {}", log_path.display()),
        )
        .into());
    }
    let meals = store.read_all()?;

    success(format!(
        "Meal log ready at {} ({} meals)",
        log_path.display(),
        meals.len()
    ));
    Ok(())
}
