use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use stockdesk::app::App;
use stockdesk::config::{self, Overrides};
use stockdesk::infrastructure::{ApiClient, RuntimeBridge, RuntimeEvent};
use stockdesk::notify::ToastLevel;
use stockdesk::session::SessionManager;
use stockdesk::store::{KeyValueStore, MemoryStore, SqliteStore};
use stockdesk::{input, logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "stockdesk",
    version,
    about = "Stockdesk: a terminal admin dashboard for an inventory REST API"
)]
struct Args {
    /// API base URL (e.g. http://localhost:3000/api)
    #[arg(long)]
    api: Option<String>,

    /// Log level or filter directive (RUST_LOG wins)
    #[arg(long)]
    log_level: Option<String>,

    /// SQLite file holding the persisted session
    #[arg(long)]
    session_db: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load().resolve(Overrides {
        api: args.api,
        log_level: args.log_level,
        session_db: args.session_db,
    });

    if let Some(log_path) = config::log_path() {
        if let Err(err) = logging::init_file_logging(&log_path, &settings.log_level) {
            eprintln!("logging disabled: {err:#}");
        }
    }
    info!(api = %settings.api_base_url, "starting stockdesk");

    let (store, store_warning) = open_store(settings.session_db.as_ref());
    let api = ApiClient::new(&settings.api_base_url)?;
    let runtime = RuntimeBridge::spawn(api)?;

    let mut app = App::new(SessionManager::new(store), settings.toast_ttl);
    app.api_endpoint = settings.api_base_url.clone();
    if let Some(warning) = store_warning {
        app.set_status(warning, ToastLevel::Warn);
    }
    app.start();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Open the session database, falling back to a process-local store
fn open_store(path: Option<&PathBuf>) -> (Box<dyn KeyValueStore>, Option<String>) {
    let Some(path) = path else {
        return (
            Box::new(MemoryStore::new()),
            Some("No data directory; session will not persist".to_string()),
        );
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match SqliteStore::open(path) {
        Ok(store) => (Box::new(store), None),
        Err(err) => {
            warn!("session db disabled: {err:#}");
            (
                Box::new(MemoryStore::new()),
                Some(format!("Session DB disabled: {err}")),
            )
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

/// Ship queued requests to the worker and apply whatever came back
fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for cmd in app.take_requests() {
        if let Err(err) = runtime.send(cmd) {
            app.apply_event(RuntimeEvent::Error {
                message: format!("{err:#}"),
            });
        }
    }

    for event in runtime.poll_events() {
        app.apply_event(event);
    }
}
