mod app;
mod args;
mod command;
mod config;
mod consts;
mod game;
mod grid;
mod leaderboard;
mod menu;
mod scores;
mod util;
mod warning;
use crate::app::{App, Outcome};
use crate::args::{Cli, RunArgs};
use crate::config::{Config, Settings};
use crate::grid::Grid;
use crate::scores::ScoreStore;
use anyhow::Context;
use ratatui::DefaultTerminal;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    match Cli::from_env() {
        Ok(Cli::Run(args)) => run(&args),
        Ok(Cli::Help) => {
            print!("{}", args::USAGE);
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("{}", args::VERSION);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            eprintln!("Run with --help for usage information");
            ExitCode::from(2)
        }
    }
}

fn run(args: &RunArgs) -> ExitCode {
    let app = match prepare(args) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e:#}");
            eprintln!("{}: {e:?}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let r = match TerminalGuard::acquire() {
        Ok(mut guard) => app.run(&mut guard.0),
        Err(e) => {
            tracing::error!(error = %e, "Could not set up terminal");
            eprintln!("{}: could not set up terminal: {e}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    io_exit(r)
}

/// Set up logging, read the configuration, and build the initial program
/// state
fn prepare(args: &RunArgs) -> anyhow::Result<App> {
    if let Some(ref path) = args.log_file {
        init_logging(path, args.log_level.unwrap_or(LevelFilter::INFO))?;
    }
    let config = Config::load_for(args.config.as_deref())
        .context("failed to load configuration")?;
    let settings = Settings::resolve(args, config)?;
    let grid = Grid::from_resolution(settings.resolution, consts::CELL_SIZE)?;
    tracing::info!(
        resolution = %settings.resolution,
        grid_width = grid.width(),
        grid_height = grid.height(),
        tick_period = ?settings.tick_period,
        scores_file = %settings.scores_file.display(),
        keep_scores = settings.keep_scores,
        "Starting {}",
        args::VERSION
    );
    let store = ScoreStore::new(settings.scores_file);
    if !settings.keep_scores {
        match store.clear() {
            Ok(()) => tracing::info!("Cleared scores from earlier runs"),
            #[allow(trivial_casts)]
            Err(e) => tracing::warn!(
                error = &e as &dyn std::error::Error,
                "Could not clear scores from earlier runs"
            ),
        }
    }
    Ok(App::new(grid, store, settings.tick_period, rand::rng()))
}

fn init_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let fp = fs_err::File::create(path).context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(fp))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// Holds the terminal in raw mode on the alternate screen, restoring it when
/// dropped
#[derive(Debug)]
struct TerminalGuard(DefaultTerminal);

impl TerminalGuard {
    fn acquire() -> io::Result<TerminalGuard> {
        ratatui::try_init().map(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

fn io_exit(r: io::Result<Outcome>) -> ExitCode {
    match r {
        Ok(Outcome::Quit) => ExitCode::SUCCESS,
        Ok(Outcome::Exit) => ExitCode::FAILURE,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Terminal I/O failed");
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            ExitCode::from(2)
        }
    }
}
