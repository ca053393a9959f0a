mod app;
mod config;
mod kanban_board;
mod modal;
mod task;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use kanban_board::KanbanBoard;

#[derive(Parser)]
#[command(name = "taskboard", about = "A three-column kanban task board for the terminal")]
struct Cli {
    /// JSON config file (column labels, log file, seed file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of tasks to start from instead of the built-in board
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_cli(cli.seed, cli.log_file);

    init_logging(config.log_file.as_deref())?;

    let board = match &config.seed {
        Some(path) => KanbanBoard::with_tasks(config::load_tasks(path)?)
            .wrap_err_with(|| format!("bad seed file {}", path.display()))?,
        None => KanbanBoard::seeded(),
    };
    info!(tasks = board.len(), "board loaded");
    let mut app = App::new(board, config.labels);

    // Terminal setup; the guard restores it on every exit path
    let mut stdout = io::stdout();
    let guard = TerminalGuard::enter(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run_app(&mut terminal, &mut app);

    drop(terminal);
    drop(guard);

    result.wrap_err("event loop failed")?;
    info!(tasks = app.board.len(), "session ended");
    Ok(())
}

/// Raw mode plus the alternate screen. Dropping it puts the terminal back,
/// including when setup fails partway through.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
    }
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
}

/// Logs go to a file because the terminal belongs to the board.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
