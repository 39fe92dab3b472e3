//! Scrim TUI - team management screen
//!
//! Create or join a team, then edit its profile from the terminal.

mod app;
mod keybindings;
mod mode;
mod views;
mod widgets;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use scrim_core::{ScrimConfig, Store};

use app::App;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SCRIM_LOG";

/// How long to wait for input before applying finished effects
const TICK: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
enum SetupError {
    #[error("No data directory available for the log file")]
    NoDataDir,

    #[error("Cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    let log_path = init_logging()?;
    tracing::info!(path = %log_path.display(), "scrim starting");

    let config = ScrimConfig::load()?;
    let username = std::env::var("USER").unwrap_or_else(|_| "player".to_string());
    let api = scrim_core::connect(&config.api, &username)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(Store::new(api, &config));
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("terminal loop failed: {}", err);
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Send tracing output to `scrim.log` in the data directory
fn init_logging() -> Result<PathBuf, SetupError> {
    let dir = dirs::data_dir().ok_or(SetupError::NoDataDir)?.join("scrim");
    let path = dir.join("scrim.log");

    let file = fs::create_dir_all(&dir)
        .and_then(|_| File::options().create(true).append(true).open(&path))
        .map_err(|source| SetupError::LogFile {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
