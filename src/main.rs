// rackmap - Interactive data-center floor plan for the terminal
// Racks colored by power draw, filterable by power, selection and server name.

mod app;
mod filter;
mod interaction;
mod layout;
mod model;
mod source;
mod stats;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::config::{DEFAULT_FLOORS, DEFAULT_SEED, POLL_INTERVAL, POWER_SCALE};
use app::event::{handle_key_event, handle_mouse_event};
use app::{AppState, GridConfig, ViewSettings};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use filter::SelectionMode;
use model::FloorPlan;
use ratatui::{backend::CrosstermBackend, Terminal};
use source::{FixtureSource, FloorSource, SyntheticSource};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Interactive data-center floor plan.
///
/// Without --fixture, floors are generated from --seed so the same seed
/// always shows the same data center.
#[derive(Parser, Debug)]
#[command(name = "rackmap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON floor document to load instead of generated floors
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Seed for generated floors
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of generated floors
    #[arg(long, default_value_t = DEFAULT_FLOORS, value_parser = clap::value_parser!(u32).range(1..))]
    floors: u32,

    /// Rack rows per generated floor (1-26)
    #[arg(long, default_value_t = 16)]
    rows: u16,

    /// Rack columns per generated floor
    #[arg(long, default_value_t = 16)]
    cols: u16,

    /// Require racks to match both the rack and the server selection
    #[arg(long)]
    strict_selection: bool,

    /// Write logs here; nothing is logged without it
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn source(&self) -> Box<dyn FloorSource> {
        match &self.fixture {
            Some(path) => Box::new(FixtureSource::new(path.clone())),
            None => {
                let grid = GridConfig {
                    rows: self.rows,
                    cols: self.cols,
                    ..GridConfig::default()
                };
                Box::new(SyntheticSource::new(self.seed, self.floors, grid, POWER_SCALE))
            }
        }
    }

    fn view_settings(&self) -> ViewSettings {
        let selection_mode = if self.strict_selection {
            SelectionMode::Both
        } else {
            SelectionMode::Either
        };
        ViewSettings {
            selection_mode,
            ..ViewSettings::default()
        }
    }
}

/// Route tracing output to `path`; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rackmap=info")))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Load before touching the terminal so errors print normally
    let source = cli.source();
    let inventory = source
        .load()
        .with_context(|| format!("loading floors from {}", source.describe()))?;
    let plan = FloorPlan::new(inventory).context("invalid floor data")?;
    let mut app = AppState::new(plan, source.describe(), cli.view_settings());
    tracing::info!(source = %source.describe(), "Starting rackmap");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "UI loop failed");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // a fresh key press clears the last notice
                    app.notice = None;
                    handle_key_event(app, key.code);
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }
}
