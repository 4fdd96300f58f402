use crate::config::Config;
use crate::core::status::MealStatus;
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREY, RESET, paint_elapsed};
use crate::utils::format_hms;
use crate::utils::time::{format_short, now};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = LogStore::open(cfg.log_path());
    let records = store.read_newest_first()?;
    let status = MealStatus::from_latest(records.first(), now());

    let (Some(meal), Some(elapsed), Some(band)) = (status.latest, status.elapsed_secs, status.band)
    else {
        info("No meals recorded yet.");
        return Ok(());
    };

    let end = meal
        .end_time
        .map(|t| format_short(&t))
        .unwrap_or_else(|| format!("{GREY}--/-- --:--:--{RESET}"));

    println!("{CYAN}• Last start:{RESET} {}", format_short(&meal.start_time));
    println!("{CYAN}• Last end:{RESET}   {}", end);

    let label = if status.in_progress {
        "Eating for"
    } else {
        "Since last meal started"
    };
    println!(
        "{CYAN}• {label}:{RESET} {}",
        paint_elapsed(band, &format_hms(elapsed as f64))
    );
    Ok(())
}
