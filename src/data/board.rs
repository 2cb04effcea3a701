//! Render-ready view models for the two dashboards.
//!
//! A board is built from exactly one loaded snapshot and replaced wholesale
//! on the next load. Everything the UI shows is computed here so the
//! renderer never re-derives a value.

use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use statusboard_types::{
    BackupRecord, BackupSnapshot, BackupStatus, HttpStatus, ServiceRecord, ServiceSnapshot,
};

use super::aggregate::{
    aggregate_backup_status, aggregate_service_status, BackupSummary, ServiceSummary,
};
use super::chart::{BarChartModel, ChartBar};
use crate::source::{Loaded, Origin};

const DEFAULT_SERVICE_ICON: &str = "🌐";
const DEFAULT_BACKUP_ICON: &str = "📦";
const DEFAULT_DESCRIPTION: &str = "Service";
const NOT_AVAILABLE: &str = "N/A";

/// Health of a card, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Warning => "!",
            HealthStatus::Critical => "✗",
        }
    }
}

impl From<BackupStatus> for HealthStatus {
    fn from(status: BackupStatus) -> Self {
        match status {
            BackupStatus::Success => HealthStatus::Healthy,
            BackupStatus::Warning => HealthStatus::Warning,
            BackupStatus::Error => HealthStatus::Critical,
        }
    }
}

/// How to show a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// Date and time in the local timezone.
    LocalDateTime,
    /// Time of day in the local timezone.
    LocalTime,
    /// Date and time in UTC.
    UtcDateTime,
}

/// Format an RFC 3339 timestamp. Unparseable input is returned verbatim.
pub fn format_timestamp(raw: &str, style: TimeStyle) -> String {
    let Ok(ts) = DateTime::parse_from_rfc3339(raw.trim()) else {
        return raw.to_string();
    };

    match style {
        TimeStyle::LocalDateTime => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        TimeStyle::LocalTime => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        TimeStyle::UtcDateTime => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

/// A dashboard view model built from one snapshot.
pub trait Board: Sized {
    type Snapshot;

    /// Dashboard title, e.g. "Service Status".
    const TITLE: &'static str;

    fn from_loaded(loaded: Loaded<Self::Snapshot>) -> Self;

    /// Build a fresh chart model for this board.
    fn chart(&self) -> BarChartModel;

    /// Number of cards on the board.
    fn card_count(&self) -> usize;

    fn origin(&self) -> Origin;

    /// When the snapshot behind this board was loaded.
    fn last_loaded(&self) -> Instant;

    /// The snapshot's own `updated` timestamp, formatted for display.
    fn updated(&self) -> &str;
}

/// One service card.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCard {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
    pub status: Option<HttpStatus>,
    pub online: bool,
    /// Response time in whole milliseconds, if the check reported one.
    pub response_ms: Option<u64>,
    /// Time of the last check, formatted.
    pub last_check: Option<String>,
}

impl ServiceCard {
    fn from_record(record: ServiceRecord) -> Self {
        let online = record.is_online();
        let response_ms = record.valid_response_time().map(|t| (t * 1000.0).round() as u64);
        let last_check = record
            .last_check
            .as_deref()
            .map(|ts| format_timestamp(ts, TimeStyle::LocalTime));

        Self {
            online,
            response_ms,
            last_check,
            status: record.status,
            icon: record.icon.unwrap_or_else(|| DEFAULT_SERVICE_ICON.to_string()),
            description: record.description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            name: record.name,
            url: record.url,
        }
    }

    pub fn health(&self) -> HealthStatus {
        if self.online {
            HealthStatus::Healthy
        } else {
            HealthStatus::Critical
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.online {
            "Online"
        } else {
            "Offline"
        }
    }

    /// "245ms", or "N/A" when no response time was reported.
    pub fn response_label(&self) -> String {
        self.response_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// The service uptime dashboard.
#[derive(Debug, Clone)]
pub struct ServiceBoard {
    pub updated: String,
    pub origin: Origin,
    /// Why the live snapshot could not be used, when `origin` is mock.
    pub fetch_error: Option<String>,
    pub summary: ServiceSummary,
    pub cards: Vec<ServiceCard>,
    pub last_loaded: Instant,
}

impl ServiceBoard {
    /// "3 / 4"
    pub fn online_label(&self) -> String {
        format!("{} / {}", self.summary.online_count, self.summary.total)
    }

    /// "245ms", or "-" before any service reported a response time.
    pub fn avg_response_label(&self) -> String {
        self.summary
            .avg_response_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "-".to_string())
    }
}

impl Board for ServiceBoard {
    type Snapshot = ServiceSnapshot;

    const TITLE: &'static str = "Service Status";

    fn from_loaded(loaded: Loaded<ServiceSnapshot>) -> Self {
        let Loaded {
            snapshot,
            origin,
            fetch_error,
            loaded_at,
        } = loaded;

        let summary = aggregate_service_status(&snapshot.services);
        let cards = snapshot.services.into_iter().map(ServiceCard::from_record).collect();

        Self {
            updated: format_timestamp(&snapshot.updated, TimeStyle::LocalDateTime),
            origin,
            fetch_error,
            summary,
            cards,
            last_loaded: loaded_at,
        }
    }

    fn chart(&self) -> BarChartModel {
        let mut chart = BarChartModel::new("Response time", "ms");
        for card in &self.cards {
            let ms = card.response_ms.unwrap_or(0);
            chart.push(ChartBar {
                label: card.name.clone(),
                value: ms as f64,
                text: format!("{}ms", ms),
                tone: card.health(),
            });
        }
        chart
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn origin(&self) -> Origin {
        self.origin
    }

    fn last_loaded(&self) -> Instant {
        self.last_loaded
    }

    fn updated(&self) -> &str {
        &self.updated
    }
}

/// One backup card.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupCard {
    pub project: String,
    pub icon: String,
    pub database: String,
    pub status: BackupStatus,
    /// Finish time of the backup, formatted in UTC.
    pub last_backup: Option<String>,
    /// Size as written by the job, or "N/A".
    pub size: String,
    pub size_bytes: f64,
    pub duration: String,
    pub message: Option<String>,
}

impl BackupCard {
    fn from_record(record: BackupRecord) -> Self {
        let size_bytes = record.size_bytes();
        let last_backup = record
            .last_backup
            .as_deref()
            .map(|ts| format_timestamp(ts, TimeStyle::UtcDateTime));

        Self {
            size_bytes,
            last_backup,
            status: record.status,
            icon: record.icon.unwrap_or_else(|| DEFAULT_BACKUP_ICON.to_string()),
            size: record.size.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            duration: record.duration.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            message: record.message,
            project: record.project,
            database: record.database,
        }
    }

    pub fn health(&self) -> HealthStatus {
        self.status.into()
    }

    pub fn status_label(&self) -> &'static str {
        match self.status {
            BackupStatus::Success => "Success",
            BackupStatus::Warning => "Warning",
            BackupStatus::Error => "Failed",
        }
    }

    /// Size in MiB rounded to two decimals, as charted.
    pub fn size_mb(&self) -> f64 {
        (self.size_bytes / (1024.0 * 1024.0) * 100.0).round() / 100.0
    }
}

/// The database backup dashboard.
#[derive(Debug, Clone)]
pub struct BackupBoard {
    pub updated: String,
    pub origin: Origin,
    pub fetch_error: Option<String>,
    pub summary: BackupSummary,
    pub cards: Vec<BackupCard>,
    pub last_loaded: Instant,
}

impl BackupBoard {
    /// "2 / 3"
    pub fn success_label(&self) -> String {
        format!("{} / {}", self.summary.success_count, self.summary.total)
    }
}

impl Board for BackupBoard {
    type Snapshot = BackupSnapshot;

    const TITLE: &'static str = "Backup Status";

    fn from_loaded(loaded: Loaded<BackupSnapshot>) -> Self {
        let Loaded {
            snapshot,
            origin,
            fetch_error,
            loaded_at,
        } = loaded;

        let summary = aggregate_backup_status(&snapshot.backups);
        let cards = snapshot.backups.into_iter().map(BackupCard::from_record).collect();

        Self {
            updated: format_timestamp(&snapshot.updated, TimeStyle::LocalDateTime),
            origin,
            fetch_error,
            summary,
            cards,
            last_loaded: loaded_at,
        }
    }

    fn chart(&self) -> BarChartModel {
        let mut chart = BarChartModel::new("Backup size", "MB");
        for card in &self.cards {
            let mb = card.size_mb();
            chart.push(ChartBar {
                label: card.project.clone(),
                value: mb,
                text: format!("{:.2} MB", mb),
                tone: card.health(),
            });
        }
        chart
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn origin(&self) -> Origin {
        self.origin
    }

    fn last_loaded(&self) -> Instant {
        self.last_loaded
    }

    fn updated(&self) -> &str {
        &self.updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_snapshot() -> ServiceSnapshot {
        ServiceSnapshot::new("2025-03-01T09:00:00Z")
            .service(
                ServiceRecord::new("ChargeBook", "https://ev.proudeng.com")
                    .status(HttpStatus::OK)
                    .response_time(0.2456)
                    .icon("⚡"),
            )
            .service(ServiceRecord::new("Broken", "https://broken.example").status(HttpStatus(502)))
    }

    #[test]
    fn test_service_board_cards() {
        let board = ServiceBoard::from_loaded(Loaded::live(service_snapshot()));

        assert_eq!(board.origin, Origin::Live);
        assert_eq!(board.online_label(), "1 / 2");
        assert_eq!(board.avg_response_label(), "246ms");

        let up = &board.cards[0];
        assert!(up.online);
        assert_eq!(up.icon, "⚡");
        assert_eq!(up.status_label(), "Online");
        assert_eq!(up.response_label(), "246ms");
        assert_eq!(up.description, "Service");

        let down = &board.cards[1];
        assert_eq!(down.health(), HealthStatus::Critical);
        assert_eq!(down.icon, "🌐");
        assert_eq!(down.response_label(), "N/A");
        assert!(down.last_check.is_none());
    }

    #[test]
    fn test_service_chart_uses_zero_for_missing_response() {
        let board = ServiceBoard::from_loaded(Loaded::live(service_snapshot()));
        let chart = board.chart();

        assert_eq!(chart.unit, "ms");
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].value, 246.0);
        assert_eq!(chart.bars[0].tone, HealthStatus::Healthy);
        assert_eq!(chart.bars[1].value, 0.0);
        assert_eq!(chart.bars[1].tone, HealthStatus::Critical);
    }

    #[test]
    fn test_backup_board_cards_and_chart() {
        let snapshot = BackupSnapshot::new("2025-03-01T02:15:00Z")
            .backup(
                BackupRecord::new("ChargeBook", "chargebook")
                    .status(BackupStatus::Success)
                    .size("2.1M")
                    .last_backup("2025-03-01T02:00:41Z")
                    .duration("2.4s"),
            )
            .backup(BackupRecord::new("Camping", "camping_alerts").status(BackupStatus::Warning))
            .backup(BackupRecord::new("Legacy", "legacy").size("nope"));

        let board = BackupBoard::from_loaded(Loaded::mock(snapshot, "Read error".to_string()));
        assert_eq!(board.origin, Origin::Mock);
        assert_eq!(board.fetch_error.as_deref(), Some("Read error"));
        assert_eq!(board.success_label(), "1 / 3");
        assert_eq!(board.summary.total_size(), "2.1 MB");

        let first = &board.cards[0];
        assert_eq!(first.last_backup.as_deref(), Some("2025-03-01 02:00 UTC"));
        assert_eq!(first.duration, "2.4s");
        assert_eq!(first.icon, "📦");

        let second = &board.cards[1];
        assert_eq!(second.size, "N/A");
        assert_eq!(second.duration, "N/A");
        assert_eq!(second.status_label(), "Warning");

        assert_eq!(board.cards[2].status_label(), "Failed");

        let chart = board.chart();
        assert_eq!(chart.bars[0].value, 2.1);
        assert_eq!(chart.bars[0].text, "2.10 MB");
        assert_eq!(chart.bars[1].tone, HealthStatus::Warning);
        assert_eq!(chart.bars[2].value, 0.0);
        assert_eq!(chart.bars[2].tone, HealthStatus::Critical);
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("yesterday", TimeStyle::LocalDateTime), "yesterday");
        assert_eq!(
            format_timestamp("2025-03-01T11:30:00+09:00", TimeStyle::UtcDateTime),
            "2025-03-01 02:30 UTC"
        );
    }
}
