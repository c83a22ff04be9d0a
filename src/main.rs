//! scanform - terminal form for warehouse task updates
//!
//! Loads dropdown options from a form backend (`GET /config`) and submits
//! task updates (`POST /submit`), as JSON or, with a photo attached, as
//! multipart form data.

mod app;
mod backend;
mod config;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use backend::HttpBackendClient;
use clap::Parser;
use config::{ClientSettings, FormConfig, Overrides};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scanform")]
#[command(version)]
#[command(about = "Scan a task, pick options, submit an update", long_about = None)]
struct Cli {
    /// Backend base URL (used when the form's backend field is blank)
    #[arg(long, env = "SCANFORM_BACKEND")]
    backend: Option<String>,

    /// Task ID to pre-fill
    #[arg(long)]
    task: Option<String>,

    /// Link the form was opened with, e.g. a scanned QR code (`?task=...`)
    #[arg(long)]
    link: Option<String>,

    /// Photo to attach
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Do not load dropdown options at start-up
    #[arg(long)]
    no_auto_load: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let file_config = match &cli.config {
        Some(path) => FormConfig::load_from(path)?,
        None => FormConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config file: {e}");
            FormConfig::default()
        }),
    };
    let settings = ClientSettings::resolve(
        file_config,
        Overrides {
            backend_url: cli.backend,
            task_id: cli.task,
            launch_link: cli.link,
            photo: cli.photo,
            no_auto_load: cli.no_auto_load,
        },
    );
    tracing::info!("Default backend: {}", settings.default_backend);

    let client = HttpBackendClient::new()?;
    let mut app = App::new(settings, Arc::new(client));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let poll_duration = std::time::Duration::from_millis(50);

    loop {
        // Apply finished requests before drawing
        app.poll_backend_events();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // crossterm's poll blocks the worker thread; yield so spawned requests progress
        let has_event = tokio::task::block_in_place(|| event::poll(poll_duration))?;
        if has_event {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
