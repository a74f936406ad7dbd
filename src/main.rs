mod cmd;
mod ui;

use clap::{Parser, Subcommand};
use datepick::data::{persistence, ViewMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datepick", about = "calendar date and range picker")]
struct Cli {
    /// Directory holding picker.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default picker.yaml into the config directory
    Init,
    /// Print the day, month or year grid for a date
    Grid {
        /// Grid to print (default: the configured view_mode)
        #[arg(long, value_enum)]
        view: Option<ViewMode>,
        /// View date, YYYY-MM-DD (default: date.initial, then today)
        #[arg(long)]
        date: Option<String>,
        /// Emit the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay date clicks through the selection rules and print the result
    Select {
        /// Dates to click, in order (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<String>,
        /// Pick a start/end range instead of a single date
        #[arg(long)]
        range: bool,
        /// Emit the resulting state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the locale descriptor handed to renderers
    Locale {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so later file I/O does not depend
    // on the working directory.
    let config_dir = if cli.config_dir.is_absolute() {
        cli.config_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.config_dir)
    };
    log::debug!("config dir: {}", config_dir.display());
    persistence::set_config_dir(config_dir);

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Grid { view, date, json }) => cmd::grid::run(view, date.as_deref(), json),
        Some(Commands::Select { dates, range, json }) => cmd::select::run(&dates, range, json),
        Some(Commands::Locale { json }) => cmd::locale::run(json),
    }
}
