use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::{self, HistoryRow};
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::messages::info;
use crate::utils::colors::{colorize_optional, duration_colour, interval_colour, paint_date};
use crate::utils::format_hms;
use crate::utils::table::Table;
use crate::utils::time::format_short;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit, all } = cmd {
        let store = LogStore::open(cfg.log_path());
        let records = store.read_newest_first()?;

        if records.is_empty() {
            info("No meals recorded yet.");
            return Ok(());
        }

        let limit = if *all {
            records.len()
        } else {
            limit.unwrap_or(cfg.history_limit)
        };
        let rows = history::build_rows(&records, limit);

        println!("📅 Meal history (latest {} of {}):\n", rows.len(), records.len());
        print!("{}", render(&rows));
    }
    Ok(())
}

fn render(rows: &[HistoryRow]) -> String {
    let mut table = Table::new(vec!["Start", "Duration", "Interval"]);

    for row in rows {
        let start = paint_date(row.date_colour, &format_short(&row.meal.start_time));

        let duration = match (row.duration_secs, row.duration_band) {
            (Some(secs), Some(band)) => duration_colour(band)
                .paint(format_hms(secs as f64))
                .to_string(),
            _ => colorize_optional("--:--:--"),
        };

        let interval = match (row.interval_secs, row.interval_band) {
            (Some(secs), Some(band)) => interval_colour(band)
                .paint(format_hms(secs as f64))
                .to_string(),
            _ => colorize_optional("first"),
        };

        table.add_row(vec![start, duration, interval]);
    }

    table.render()
}
