// flashback-ui - terminal preview of the code-built scene
//
// Builds the full panel set into a live scene graph and lets you click
// through it from the keyboard. An optional first argument sets the icon
// directory.

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flashback_ui::app::{
    event::handle_key_event, prefs::MemoryPreferences, AppState, BuildConfig,
};
use flashback_ui::managers::ManagerGraph;
use flashback_ui::view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

const LOG_FILE: &str = "flashback-ui.log";
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // The terminal belongs to the preview, so logs go to a file.
    // RUST_LOG controls the level.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("cannot open {}", LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = BuildConfig::default();
    if let Some(dir) = std::env::args().nth(1) {
        config.icon_dir = PathBuf::from(dir);
    }
    let app = AppState::build(
        config,
        Box::new(MemoryPreferences::new()),
        ManagerGraph::with_defaults(),
    )
    .context("initial scene build failed")?;
    tracing::info!(nodes = app.graph.len(), "Scene built");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: AppState,
) -> Result<()> {
    loop {
        let now = Local::now();
        app.set_clock(now.hour(), now.minute());
        terminal.draw(|f| view::draw(f, &app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app, key.code);
                }
            }
        }
    }
}
