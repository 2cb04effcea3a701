use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statusboard::config::{Overrides, Settings};
use statusboard::data::{mock_backup_data, mock_service_data, BackupBoard, Board, ServiceBoard};
use statusboard::export::{build_export, write_export};
use statusboard::source::{Loader, MockFn, Origin, RefreshTask};
use statusboard::ui::{self, Theme};
use statusboard::{events, App, BackupSnapshot, Dashboard, ServiceSnapshot, View};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "statusboard", version)]
#[command(about = "Terminal dashboards for service uptime and database backup status")]
struct Args {
    /// Path or URL of the service status snapshot [default: status.json]
    #[arg(short, long)]
    status: Option<String>,

    /// Path or URL of the backup status snapshot [default: backup-status.json]
    #[arg(short, long)]
    backups: Option<String>,

    /// Service dashboard refresh period (e.g., "30s", "5m") [default: 5m]
    #[arg(long)]
    status_refresh: Option<String>,

    /// Backup dashboard refresh period (e.g., "1h", "24h") [default: 24h]
    #[arg(long)]
    backup_refresh: Option<String>,

    /// TOML config file [default: statusboard.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Load both dashboards once, write a JSON summary and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Report load failures instead of substituting mock data
    #[arg(long)]
    no_mock: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            status_source: self.status.clone(),
            status_refresh: self.status_refresh.clone(),
            backup_source: self.backups.clone(),
            backup_refresh: self.backup_refresh.clone(),
            mock_fallback: self.no_mock.then_some(false),
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

    initialize_tracing(settings.log_file.as_deref(), args.export.is_some())?;

    let rt = tokio::runtime::Runtime::new()?;
    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("statusboard/", env!("CARGO_PKG_VERSION")))
        .build()?;

    if let Some(ref export_path) = args.export {
        return rt.block_on(export_to_file(&settings, client, export_path));
    }

    // Refresh tasks are spawned onto the runtime; the TUI stays on this thread.
    let _guard = rt.enter();
    run_tui(&settings, client)
}

/// Initialize structured logging.
///
/// The TUI owns stdout, so logs only go to `log_file` there; export mode
/// logs to stderr.
fn initialize_tracing(log_file: Option<&Path>, export_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("statusboard=info"))?;

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        }
        None if export_mode => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        }
        None => {}
    }
    Ok(())
}

fn service_loader(settings: &Settings, client: Client) -> Result<Loader<ServiceSnapshot>> {
    let loader = Loader::new(settings.status_location()?, client);
    if !settings.mock_fallback {
        return Ok(loader);
    }
    let catalog = settings.services.clone();
    let mock: MockFn<ServiceSnapshot> =
        Arc::new(move || mock_service_data(&catalog, &mut rand::rng()));
    Ok(loader.with_mock(mock))
}

fn backup_loader(settings: &Settings, client: Client) -> Result<Loader<BackupSnapshot>> {
    let loader = Loader::new(settings.backup_location()?, client);
    if !settings.mock_fallback {
        return Ok(loader);
    }
    let catalog = settings.projects.clone();
    let mock: MockFn<BackupSnapshot> =
        Arc::new(move || mock_backup_data(&catalog, &mut rand::rng()));
    Ok(loader.with_mock(mock))
}

/// Run the TUI with both dashboards refreshing in the background
fn run_tui(settings: &Settings, client: Client) -> Result<()> {
    let (services, services_handle) = RefreshTask::spawn(
        service_loader(settings, client.clone())?,
        settings.status_interval()?,
    );
    let (backups, backups_handle) =
        RefreshTask::spawn(backup_loader(settings, client)?, settings.backup_interval()?);

    let mut app = App::from_dashboards(
        Dashboard::<ServiceBoard>::new(Box::new(services)).with_refresh(services_handle),
        Dashboard::<BackupBoard>::new(Box::new(backups)).with_refresh(backups_handle),
        Theme::auto_detect(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        app.reload_data();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let [header, tabs, content, status] = ui::screen_layout(area);

            ui::common::render_header(frame, app, header);
            ui::common::render_tabs(frame, app, tabs);

            match app.current_view {
                View::Services => ui::services::render(frame, app, content),
                View::Backups => ui::backups::render(frame, app, content),
            }

            ui::common::render_status_bar(frame, app, status);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    events::handle_mouse_event(app, mouse, ui::table_area(screen));
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Load both dashboards once and write them as JSON
async fn export_to_file(settings: &Settings, client: Client, export_path: &Path) -> Result<()> {
    let services = service_loader(settings, client.clone())?;
    let backups = backup_loader(settings, client)?;

    let (services, backups) = tokio::join!(services.load(), backups.load());
    let services = ServiceBoard::from_loaded(
        services.with_context(|| format!("Failed to load {}", settings.status_source))?,
    );
    let backups = BackupBoard::from_loaded(
        backups.with_context(|| format!("Failed to load {}", settings.backup_source))?,
    );

    for (title, origin) in [
        (ServiceBoard::TITLE, services.origin()),
        (BackupBoard::TITLE, backups.origin()),
    ] {
        if origin == Origin::Mock {
            warn!("{} exported from mock data", title);
        }
    }

    let export = build_export(Some(&services), Some(&backups))?;
    write_export(export_path, &export)?;

    info!("Exported dashboards to {}", export_path.display());
    println!("Exported dashboards to: {}", export_path.display());
    Ok(())
}
