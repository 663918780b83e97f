mod app;
mod clock;
mod commands;
mod domain;
mod driver;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use commands::{SessionAction, SitesAction, TimerAction};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use driver::{TerminalTitle, TitleGuard, BASELINE_TITLE};
use notifications::DesktopNotifier;
use persistence::{ensure_focus_dir, init_local_focus, KvStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use ticker::Ticker;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "focus")]
#[command(about = "A terminal focus dashboard: pomodoro timer and website-blocking focus sessions", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .focus directory, then ~/.focus
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log debug output to focus.log
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focus directory in the current directory
    Init,
    /// Control the pomodoro timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
    /// Control the website-blocking focus session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Manage the blocked-site list
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },
    /// Check whether a site is blocked right now
    Check {
        /// Host or URL, e.g. www.youtube.com
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        // Initialize local .focus directory
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        let focus_dir = init_local_focus(&current_dir)?;
        println!("Initialized focus directory: {}", focus_dir.display());
        println!();
        println!("Focus will now keep its timer, session and sites here.");
        println!("Run 'focus' to open the dashboard.");
        return Ok(());
    }

    let focus_dir = ensure_focus_dir(cli.dir.as_deref())?;
    logging::init_logging(&focus_dir, cli.verbose)?;

    let store = KvStore::open(&focus_dir)?;
    info!(dir = %store.dir().display(), "Using focus directory");
    let mut app = AppState::load(store, Box::new(SystemClock), Box::new(DesktopNotifier));

    let output = match cli.command {
        None => return run_tui(&mut app),
        Some(Commands::Init) => return Ok(()),
        Some(Commands::Timer { action }) => commands::run_timer(&mut app, action),
        Some(Commands::Session { action }) => commands::run_session(&mut app, action),
        Some(Commands::Sites { action }) => commands::run_sites(&mut app, action),
        Some(Commands::Check { url }) => commands::run_check(&mut app, &url),
    };

    // Completions found while loading are saved even when the command itself failed
    if app.needs_save {
        app.save()?;
    }

    print!("{}", output?);
    Ok(())
}

fn run_tui(app: &mut AppState) -> Result<()> {
    // Restores the window title on every way out of this function
    let mut title = TitleGuard::new(TerminalTitle, BASELINE_TITLE);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, app, &mut title);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    title.restore();

    // Save on exit
    if let Err(e) = app.save() {
        error!(error = %e, "Failed to save state on exit");
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        error!(error = %err, "Dashboard stopped with an error");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    title: &mut TitleGuard<TerminalTitle>,
) -> Result<()> {
    let mut ticker = Ticker::new(ticker::tick_duration(), Instant::now());

    loop {
        if ticker.due(Instant::now()) {
            app.refresh();
        }

        title.show(app.window_title.as_deref());

        // Persist transitions in the same iteration they happened
        if app.needs_save {
            if let Err(e) = app.save() {
                error!(error = %e, "Failed to save state");
            }
        }

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input until the next display tick
        if event::poll(ticker.until_next(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }
    }
}
