use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{BackupLogic, list_backups};
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        list,
    } = cmd
    {
        let log = cfg.log_path();

        if *list {
            let backups = list_backups(&log);
            if backups.is_empty() {
                info(format!("No snapshots next to {}", log.display()));
            }
            for b in backups {
                let size = std::fs::metadata(&b).map(|m| m.len()).unwrap_or(0);
                println!("{}  ({} bytes)", b.display(), size);
            }
        }

        if let Some(file) = file {
            BackupLogic::backup(&log, file, *compress)?;
        }
    }

    Ok(())
}
