use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_table::tui::{app::AppState, controller};
use log::LevelFilter;
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Env var holding a log level (`info`, `debug`, ...). Unset means no log file.
const LOG_ENV: &str = "HOLDEM_LOG";

/// File-only logging: the terminal belongs to the TUI.
fn init_logging() -> io::Result<()> {
    let Some(level) = std::env::var(LOG_ENV).ok().and_then(|v| v.parse::<LevelFilter>().ok())
    else {
        return Ok(());
    };
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let time = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let file = std::fs::File::create(format!("logs/holdem-{time}.log"))?;
    simplelog::WriteLogger::init(level, config, file)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "holdem-table needs a real terminal (TTY).\nRun it in a terminal and press q in the menu to quit. Version: {}",
            holdem_table::VERSION
        );
        return Ok(());
    }
    init_logging()?;
    log::info!("holdem-table {} starting", holdem_table::VERSION);
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
