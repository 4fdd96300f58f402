use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for mealtimelogger
#[derive(Parser)]
#[command(
    name = "mealtimelogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small meal-time logger: record meal start/end times, browse the history and statistics",
    long_about = None
)]
pub struct Cli {
    /// Override the meal log path (useful for tests or a custom file)
    #[arg(global = true, long = "log")]
    pub log: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the meal log
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record the start of a meal (now)
    Start,

    /// Record the end of the current meal (now)
    End,

    /// Revert the last start or end
    Undo,

    /// Show the meal history, newest first
    List {
        #[arg(long, short = 'n', help = "Number of meals to show (default: history_limit)")]
        limit: Option<usize>,

        #[arg(long = "all", conflicts_with = "limit", help = "Show every recorded meal")]
        all: bool,
    },

    /// Show interval and duration statistics over the recent meals
    Stats {
        #[arg(long, short = 'w', help = "Number of recent meals to consider (default: stats_window)")]
        window: Option<usize>,
    },

    /// Show the latest meal and the time elapsed since it started
    Status,

    /// Create a backup copy of the meal log, or list the rotated snapshots
    Backup {
        #[arg(long, value_name = "FILE", required_unless_present = "list")]
        file: Option<String>,

        #[arg(long, requires = "file")]
        compress: bool,

        #[arg(long = "list", help = "List the automatic .bak1/.bak2/.bak3 snapshots")]
        list: bool,
    },

    /// Export the meal history
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Serve the action endpoint over HTTP
    Serve {
        #[arg(long, value_name = "ADDR", help = "Listen address (default: config `listen`)")]
        listen: Option<String>,
    },
}
