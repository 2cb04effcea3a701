//! # statusboard
//!
//! Terminal dashboards for service uptime and nightly database backups.
//!
//! Two snapshot documents, produced by external jobs, are loaded from a
//! file or URL and refreshed on a timer: `status.json` (HTTP checks of a
//! list of services) and `backup-status.json` (the most recent backup of
//! each project database). When a snapshot cannot be loaded the dashboard
//! falls back to generated mock data and says so.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Application                         │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │ (boards) │    │(ratatui)│    │          │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── RefreshTask ◀── Loader ◀── file | URL | mock  │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, navigation and teardown
//! - **[`source`]**: Fetching, mock fallback, periodic refresh ([`DataSource`] trait)
//! - **[`data`]**: Aggregates, view models, chart models, mock generators
//! - **[`config`]**: Layered settings (defaults, TOML, environment, flags)
//! - **[`export`]**: JSON export of both dashboards
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Local snapshots, default refresh periods (5m / 24h)
//! statusboard
//!
//! # Remote snapshots, faster refresh
//! statusboard -s https://status.example.com/status.json --status-refresh 30s
//!
//! # Load once and write a JSON summary
//! statusboard --export summary.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use statusboard::{aggregate_service_status, ServiceRecord, HttpStatus};
//!
//! let services = vec![
//!     ServiceRecord::new("ChargeBook", "https://ev.proudeng.com")
//!         .status(HttpStatus::OK)
//!         .response_time(0.1),
//!     ServiceRecord::new("Proud English", "https://proudeng.com")
//!         .status(HttpStatus(502))
//!         .response_time(0.3),
//! ];
//!
//! let summary = aggregate_service_status(&services);
//! assert_eq!(summary.online_count, 1);
//! assert_eq!(summary.avg_response_ms, Some(200));
//! ```
//!
//! ### Loading with mock fallback
//!
//! ```no_run
//! use statusboard::data::{catalog, mock_service_data};
//! use statusboard::source::{load_or_mock, SnapshotLocation};
//!
//! # tokio_test::block_on(async {
//! let location = SnapshotLocation::parse("status.json").unwrap();
//! let loaded = load_or_mock(&location, &reqwest::Client::new(), || {
//!     mock_service_data(&catalog::default_services(), &mut rand::rng())
//! })
//! .await;
//! println!("{} services ({})", loaded.snapshot.services.len(), loaded.origin.label());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Dashboard, View};
pub use config::Settings;
pub use data::{
    aggregate_backup_status, aggregate_service_status, mock_backup_data, mock_service_data,
    BackupBoard, BackupSummary, ChartSlot, HealthStatus, ServiceBoard, ServiceSummary,
};
pub use source::{
    load_or_mock, ChannelSource, DataSource, FetchError, Loaded, Loader, Origin, RefreshHandle,
    RefreshTask, SnapshotLocation,
};
pub use statusboard_types::{
    format_bytes, parse_size_to_bytes, BackupRecord, BackupSnapshot, BackupStatus, HttpStatus,
    ServiceRecord, ServiceSnapshot,
};
