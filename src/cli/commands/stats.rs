use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats;
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::utils::colors::{CYAN, RESET, YELLOW};
use crate::utils::format_hms;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { window } = cmd {
        let window = window.unwrap_or(cfg.stats_window).max(1);
        let store = LogStore::open(cfg.log_path());
        let records = store.read_newest_first()?;
        let s = stats::compute(&records, window);

        println!("📊 Meal statistics (latest {} meals)\n", window.min(records.len()));
        println!("{CYAN}• Interval{RESET} ({} samples)", s.interval_count);
        println!("    average: {YELLOW}{}{RESET}", format_hms(s.interval_avg));
        println!("    median:  {YELLOW}{}{RESET}", format_hms(s.interval_median));
        println!("{CYAN}• Duration{RESET} ({} samples)", s.duration_count);
        println!("    average: {YELLOW}{}{RESET}", format_hms(s.duration_avg));
        println!("    median:  {YELLOW}{}{RESET}", format_hms(s.duration_median));
    }
    Ok(())
}
