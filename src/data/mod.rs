//! Normalization of raw snapshots into display data.
//!
//! ## Submodules
//!
//! - [`aggregate`]: Online/success counts, average response time, total backup size
//! - [`board`]: Render-ready view models ([`ServiceBoard`], [`BackupBoard`])
//! - [`catalog`]: Known services and backup projects
//! - [`chart`]: Bar chart models and the single-owner [`ChartSlot`]
//! - [`duration`]: Parsing and formatting of refresh intervals (e.g., "5m", "24h")
//! - [`mock`]: Synthetic snapshots for when the real one is unavailable
//!
//! ## Data Flow
//!
//! ```text
//! ServiceSnapshot / BackupSnapshot (raw JSON, or mock)
//!        │
//!        ▼
//! Board::from_loaded()
//!        │
//!        ├──▶ ServiceSummary / BackupSummary (aggregate)
//!        ├──▶ cards (one per record)
//!        │
//!        └──▶ Board::chart() ──▶ ChartSlot::replace()
//! ```

pub mod aggregate;
pub mod board;
pub mod catalog;
pub mod chart;
pub mod duration;
pub mod mock;

pub use aggregate::{aggregate_backup_status, aggregate_service_status, BackupSummary, ServiceSummary};
pub use board::{BackupBoard, BackupCard, Board, HealthStatus, ServiceBoard, ServiceCard};
pub use catalog::{ProjectEntry, ServiceEntry};
pub use chart::{BarChartModel, ChartBar, ChartSlot};
pub use mock::{mock_backup_data, mock_service_data};
