//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use statusboard_types::{BackupSnapshot, ServiceSnapshot};
use tracing::info;

use crate::data::{BackupBoard, BackupCard, Board, ChartSlot, ServiceBoard, ServiceCard};
use crate::export::{build_export, write_export};
use crate::source::{DataSource, RefreshHandle};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current dashboard.
///
/// Card detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Service uptime.
    Services,
    /// Database backups.
    Backups,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Services => View::Backups,
            View::Backups => View::Services,
        }
    }

    /// Cycle to the previous view. With two views this is the same as `next`.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Services => ServiceBoard::TITLE,
            View::Backups => BackupBoard::TITLE,
        }
    }
}

/// One dashboard: where its snapshots come from, the board built from the
/// latest one, and the chart drawn from that board.
pub struct Dashboard<B: Board> {
    source: Box<dyn DataSource<Snapshot = B::Snapshot>>,
    refresh: Option<RefreshHandle>,
    pub board: Option<B>,
    pub chart: ChartSlot,
    pub load_error: Option<String>,
    pub selected: usize,
}

impl<B: Board> Dashboard<B> {
    pub fn new(source: Box<dyn DataSource<Snapshot = B::Snapshot>>) -> Self {
        Self {
            source,
            refresh: None,
            board: None,
            chart: ChartSlot::new(),
            load_error: None,
            selected: 0,
        }
    }

    /// Attach the handle of the task feeding this dashboard's source.
    pub fn with_refresh(mut self, handle: RefreshHandle) -> Self {
        self.refresh = Some(handle);
        self
    }

    /// Returns a description of the data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn refresh_period(&self) -> Option<Duration> {
        self.refresh.as_ref().map(RefreshHandle::period)
    }

    /// Poll the source and rebuild the board if a new snapshot arrived.
    ///
    /// A failed load keeps the previous board and records the error.
    pub fn reload(&mut self) -> bool {
        match self.source.poll() {
            Some(loaded) => {
                let board = B::from_loaded(loaded);
                self.chart.replace(board.chart());
                if self.selected >= board.card_count() {
                    self.selected = board.card_count().saturating_sub(1);
                }
                self.board = Some(board);
                self.load_error = None;
                true
            }
            None => {
                if let Some(err) = self.source.error() {
                    self.load_error = Some(err.to_string());
                }
                false
            }
        }
    }

    /// Ask the refresh task to load now. Returns false without a live task.
    pub fn refresh_now(&self) -> bool {
        match &self.refresh {
            Some(handle) if !handle.is_cancelled() => {
                handle.refresh_now();
                true
            }
            _ => false,
        }
    }

    /// Stop refreshing and release the chart. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.refresh.as_mut() {
            handle.cancel();
        }
        self.chart.release();
    }

    pub fn is_torn_down(&self) -> bool {
        self.refresh.as_ref().is_none_or(RefreshHandle::is_cancelled) && self.chart.is_empty()
    }

    fn card_count(&self) -> usize {
        self.board.as_ref().map_or(0, |b| b.card_count())
    }

    pub fn select_next_n(&mut self, n: usize) {
        let max = self.card_count().saturating_sub(1);
        self.selected = (self.selected + n).min(max);
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.card_count().saturating_sub(1);
    }

    /// Select a row if it exists.
    pub fn select(&mut self, index: usize) {
        if index < self.card_count() {
            self.selected = index;
        }
    }
}

impl Dashboard<ServiceBoard> {
    pub fn selected_card(&self) -> Option<&ServiceCard> {
        self.board.as_ref()?.cards.get(self.selected)
    }
}

impl Dashboard<BackupBoard> {
    pub fn selected_card(&self) -> Option<&BackupCard> {
        self.board.as_ref()?.cards.get(self.selected)
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    pub services: Dashboard<ServiceBoard>,
    pub backups: Dashboard<BackupBoard>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given sources.
    pub fn new(
        services: Box<dyn DataSource<Snapshot = ServiceSnapshot>>,
        backups: Box<dyn DataSource<Snapshot = BackupSnapshot>>,
        theme: Theme,
    ) -> Self {
        Self::from_dashboards(Dashboard::new(services), Dashboard::new(backups), theme)
    }

    /// Create an App from dashboards that may already have refresh tasks attached.
    pub fn from_dashboards(
        services: Dashboard<ServiceBoard>,
        backups: Dashboard<BackupBoard>,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Services,
            show_help: false,
            show_detail_overlay: false,
            services,
            backups,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current view's data source.
    pub fn source_description(&self) -> &str {
        match self.current_view {
            View::Services => self.services.source_description(),
            View::Backups => self.backups.source_description(),
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll both sources for new data.
    ///
    /// Returns true if either dashboard received a new snapshot.
    pub fn reload_data(&mut self) -> bool {
        let services = self.services.reload();
        let backups = self.backups.reload();
        services || backups
    }

    /// Reload the current dashboard now instead of waiting for its timer.
    pub fn request_refresh(&mut self) {
        let view = self.current_view;
        let requested = match view {
            View::Services => self.services.refresh_now(),
            View::Backups => self.backups.refresh_now(),
        };

        if requested {
            self.set_status_message(format!("Refreshing {}...", view.label()));
        } else {
            self.set_status_message("Refresh unavailable".to_string());
        }
    }

    /// Error from the current dashboard's last load, if any.
    pub fn load_error(&self) -> Option<&str> {
        match self.current_view {
            View::Services => self.services.load_error.as_deref(),
            View::Backups => self.backups.load_error.as_deref(),
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
        self.show_detail_overlay = false;
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
        self.show_detail_overlay = false;
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.show_detail_overlay = false;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Services => self.services.select_next_n(n),
            View::Backups => self.backups.select_next_n(n),
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Services => self.services.select_prev_n(n),
            View::Backups => self.backups.select_prev_n(n),
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Services => self.services.select_first(),
            View::Backups => self.backups.select_first(),
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Services => self.services.select_last(),
            View::Backups => self.backups.select_last(),
        }
    }

    /// Select a row of the current dashboard by position.
    pub fn select_row(&mut self, index: usize) {
        match self.current_view {
            View::Services => self.services.select(index),
            View::Backups => self.backups.select(index),
        }
    }

    /// Open the detail overlay for the selected card.
    pub fn enter_detail(&mut self) {
        let has_card = match self.current_view {
            View::Services => self.services.selected_card().is_some(),
            View::Backups => self.backups.selected_card().is_some(),
        };
        if has_card {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Services.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Services {
            self.current_view = View::Services;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch between the light and dark theme.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let name = if self.theme.is_light { "light" } else { "dark" };
        self.set_status_message(format!("Theme: {}", name));
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Cancel both refresh tasks and release both charts.
    ///
    /// Runs on quit and again on drop; the second call is a no-op.
    pub fn teardown(&mut self) {
        if self.services.is_torn_down() && self.backups.is_torn_down() {
            return;
        }
        info!("Stopping refresh tasks");
        self.services.teardown();
        self.backups.teardown();
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let export = build_export(self.services.board.as_ref(), self.backups.board.as_ref())?;
        write_export(path, &export)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelSource, Loaded, Loader, RefreshTask, SnapshotLocation, Update};
    use reqwest::Client;
    use statusboard_types::{BackupRecord, BackupStatus, HttpStatus, ServiceRecord};
    use tempfile::TempDir;
    use tokio::sync::watch;

    struct Harness {
        app: App,
        services_tx: watch::Sender<Update<ServiceSnapshot>>,
        backups_tx: watch::Sender<Update<BackupSnapshot>>,
    }

    fn harness() -> Harness {
        let (services_tx, services) = ChannelSource::create("status.json");
        let (backups_tx, backups) = ChannelSource::create("backup-status.json");
        Harness {
            app: App::new(Box::new(services), Box::new(backups), Theme::dark()),
            services_tx,
            backups_tx,
        }
    }

    fn services(n: usize) -> ServiceSnapshot {
        (0..n).fold(ServiceSnapshot::new("2025-03-01T09:00:00Z"), |snap, i| {
            snap.service(
                ServiceRecord::new(format!("svc-{}", i), "https://example.com")
                    .status(HttpStatus::OK)
                    .response_time(0.1),
            )
        })
    }

    fn backups() -> BackupSnapshot {
        BackupSnapshot::new("2025-03-01T02:15:00Z")
            .backup(BackupRecord::new("ChargeBook", "chargebook").status(BackupStatus::Success).size("1M"))
    }

    #[test]
    fn test_reload_builds_boards_and_charts() {
        let mut h = harness();
        assert!(!h.app.reload_data());
        assert!(h.app.services.board.is_none());

        h.services_tx.send(Update::Loaded(Loaded::live(services(3)))).unwrap();
        h.backups_tx.send(Update::Loaded(Loaded::live(backups()))).unwrap();
        assert!(h.app.reload_data());

        let board = h.app.services.board.as_ref().unwrap();
        assert_eq!(board.summary.online_count, 3);
        assert_eq!(h.app.services.chart.active().unwrap().bars.len(), 3);
        assert_eq!(h.app.backups.chart.active().unwrap().bars.len(), 1);

        // Reload replaces the chart rather than adding one
        h.services_tx.send(Update::Loaded(Loaded::live(services(1)))).unwrap();
        assert!(h.app.reload_data());
        assert_eq!(h.app.services.chart.active().unwrap().bars.len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_board() {
        let mut h = harness();
        h.services_tx.send(Update::Loaded(Loaded::live(services(2)))).unwrap();
        h.app.reload_data();

        h.services_tx.send(Update::Failed("Request timed out".to_string())).unwrap();
        assert!(!h.app.reload_data());
        assert_eq!(h.app.services.board.as_ref().unwrap().cards.len(), 2);
        assert_eq!(h.app.load_error(), Some("Request timed out"));
    }

    #[test]
    fn test_selection_clamps_to_cards() {
        let mut h = harness();
        h.services_tx.send(Update::Loaded(Loaded::live(services(3)))).unwrap();
        h.app.reload_data();

        h.app.select_next_n(10);
        assert_eq!(h.app.services.selected, 2);
        h.app.select_prev();
        assert_eq!(h.app.services.selected, 1);

        // Fewer cards after a reload pulls the selection back
        h.app.select_last();
        h.services_tx.send(Update::Loaded(Loaded::live(services(1)))).unwrap();
        h.app.reload_data();
        assert_eq!(h.app.services.selected, 0);

        h.app.select_row(5);
        assert_eq!(h.app.services.selected, 0);
    }

    #[test]
    fn test_navigation_and_overlays() {
        let mut h = harness();

        // No cards yet, so no detail overlay
        h.app.enter_detail();
        assert!(!h.app.show_detail_overlay);

        h.backups_tx.send(Update::Loaded(Loaded::live(backups()))).unwrap();
        h.app.reload_data();

        h.app.next_view();
        assert_eq!(h.app.current_view, View::Backups);
        assert_eq!(h.app.source_description(), "backup-status.json");
        h.app.enter_detail();
        assert!(h.app.show_detail_overlay);
        assert_eq!(h.app.backups.selected_card().unwrap().project, "ChargeBook");

        h.app.go_back();
        assert!(!h.app.show_detail_overlay);
        assert_eq!(h.app.current_view, View::Backups);
        h.app.go_back();
        assert_eq!(h.app.current_view, View::Services);
    }

    #[test]
    fn test_toggle_theme() {
        let mut h = harness();
        assert!(!h.app.theme.is_light);
        h.app.toggle_theme();
        assert!(h.app.theme.is_light);
        assert_eq!(h.app.get_status_message(), Some("Theme: light"));
    }

    #[test]
    fn test_refresh_without_task() {
        let mut h = harness();
        h.app.request_refresh();
        assert_eq!(h.app.get_status_message(), Some("Refresh unavailable"));
    }

    #[tokio::test]
    async fn test_teardown_cancels_refresh_and_releases_charts() {
        let dir = TempDir::new().unwrap();
        let status = dir.path().join("status.json");
        std::fs::write(&status, r#"{"updated": "now", "services": []}"#).unwrap();

        let loader = Loader::<ServiceSnapshot>::new(SnapshotLocation::file(&status), Client::new());
        let (source, handle) = RefreshTask::spawn(loader, Duration::from_secs(300));
        let (_backups_tx, backups) = ChannelSource::<BackupSnapshot>::create("backup-status.json");

        let mut app = App::from_dashboards(
            Dashboard::<ServiceBoard>::new(Box::new(source)).with_refresh(handle),
            Dashboard::<BackupBoard>::new(Box::new(backups)),
            Theme::dark(),
        );
        assert_eq!(app.services.refresh_period(), Some(Duration::from_secs(300)));

        for _ in 0..200 {
            if app.reload_data() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!app.services.chart.is_empty());

        app.request_refresh();
        assert_eq!(app.get_status_message(), Some("Refreshing Service Status..."));

        app.teardown();
        assert!(app.services.is_torn_down());
        assert!(app.backups.is_torn_down());
        assert!(!app.services.refresh_now());

        // Second call is a no-op
        app.teardown();
    }

    #[test]
    fn test_export_state() {
        let mut h = harness();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");

        assert!(h.app.export_state(&path).is_err());

        h.services_tx.send(Update::Loaded(Loaded::live(services(2)))).unwrap();
        h.app.reload_data();
        h.app.export_state(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["services"]["total"], 2);
    }
}
