use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::meal::MealLogic;
use crate::errors::AppResult;
use crate::store::LogStore;

/// Handle `start`, `end` and `undo`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = LogStore::open(cfg.log_path());

    match cmd {
        Commands::Start => MealLogic::start(&store),
        Commands::End => MealLogic::end(&store),
        Commands::Undo => MealLogic::undo(&store),
        _ => Ok(()),
    }
}
