//! Aura TUI Entry Point
//!
//! Launches the sentiment analyzer in the terminal.
//!
//! Configuration comes from `~/.config/aura/config.toml` and `AURA_*`
//! environment variables. Set `AURA_LOG_FILE` to capture logs (filtered by
//! `RUST_LOG`); the terminal itself belongs to the UI.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aura_conductor::{
    load_config, AmbientEngine, AnalysisController, AuraConfig, HttpClassifier, Session,
};
use aura_tui::widgets::ambient::viewport_for;
use aura_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: aura-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Piped stdin/stdout");
        eprintln!("  • SSH without -t flag");
        std::process::exit(1);
    }

    let config = load_config()?;
    tracing::info!(
        source = %config.source(),
        endpoint = %config.endpoint,
        "Configuration loaded"
    );

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AuraConfig,
) -> anyhow::Result<()> {
    let size = crossterm::terminal::size()?;

    let classifier = HttpClassifier::new(config.endpoint.clone(), config.request_timeout)?;
    let controller = AnalysisController::new(classifier, config.analysis());
    let ambient = AmbientEngine::new(&config.ambient(), viewport_for(size.0, size.1));
    let session = Session::new(controller, ambient);

    let mut app = App::new(session, config.frame_interval, size);
    app.run(terminal).await
}

/// Log to `AURA_LOG_FILE` when set; otherwise stay silent
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os("AURA_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(&path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(())
}
