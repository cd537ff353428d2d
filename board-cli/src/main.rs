//! `board`: renders a sample board through the adaptive grid and prints each
//! step of a scripted scroll and edit session.

mod error;
mod paths;
mod session;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use board_grid::GridConfig;
use board_lib::fixtures;
use board_lib::store::InMemoryBoard;
use clap::Parser;
use log::{error, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::CliError;
use crate::session::Session;

/// Board grid demo.
#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(about = "Scripted scroll and edit session against the board grid")]
#[command(version)]
struct Args {
    /// Grid config file (defaults to config.json in the platform config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate a board with this many groups instead of the sample board
    #[arg(short, long)]
    groups: Option<usize>,

    /// Items per generated group
    #[arg(short, long, default_value_t = 20)]
    items: usize,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 400)]
    viewport: u32,

    /// Log level written to the log file
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        eprintln!("No cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(e) = fs::create_dir_all(dir)
    {
        eprintln!("Failed to create {}: {e}", dir.display());
        return;
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {e}", path.display()),
    }
}

/// Loads the grid config.
///
/// An explicit path must load. The default location is optional: a missing
/// or unreadable file falls back to defaults.
fn load_config(explicit: Option<PathBuf>) -> Result<GridConfig, CliError> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return Ok(GridConfig::load(&path)?);
    }

    let Some(path) = paths::config_file().filter(|path| path.exists()) else {
        info!("No config file, using defaults");
        return Ok(GridConfig::default());
    };
    match GridConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!("Ignoring config file {}: {e}", path.display());
            Ok(GridConfig::default())
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config)?;
    let board = match args.groups {
        Some(groups) => fixtures::generated_board(groups, args.items),
        None => fixtures::sample_board(),
    };
    info!(
        "Board {} with {} groups and {} items",
        board.name,
        board.groups.len(),
        board.item_count()
    );

    let mut session = Session::new(InMemoryBoard::new(board), config, args.viewport);
    let mut stdout = std::io::stdout().lock();
    session.run(&mut stdout).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
