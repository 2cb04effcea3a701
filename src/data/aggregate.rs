//! Dashboard-level aggregates over one snapshot.
//!
//! These are the numbers shown in the overview line of each dashboard.

use statusboard_types::{format_bytes, BackupRecord, ServiceRecord};

/// Aggregates for the service uptime dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceSummary {
    /// Services whose last check returned 200.
    pub online_count: usize,
    /// Number of services in the snapshot.
    pub total: usize,
    /// Mean response time in whole milliseconds over services that reported
    /// one. `None` when no service did.
    pub avg_response_ms: Option<u64>,
}

/// Aggregates for the backup dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackupSummary {
    /// Backups whose status is `success`.
    pub success_count: usize,
    /// Number of backups in the snapshot.
    pub total: usize,
    /// Sum of all backup sizes; malformed sizes contribute zero.
    pub total_bytes: f64,
}

impl BackupSummary {
    /// Human-readable total size, e.g. "2.5 MB".
    pub fn total_size(&self) -> String {
        format_bytes(self.total_bytes)
    }
}

/// Count online services and average the reported response times.
pub fn aggregate_service_status(services: &[ServiceRecord]) -> ServiceSummary {
    let online_count = services.iter().filter(|s| s.is_online()).count();

    let (sum, valid) = services
        .iter()
        .filter_map(ServiceRecord::valid_response_time)
        .fold((0.0, 0usize), |(sum, n), t| (sum + t, n + 1));

    let avg_response_ms = (valid > 0).then(|| (sum / valid as f64 * 1000.0).round() as u64);

    ServiceSummary {
        online_count,
        total: services.len(),
        avg_response_ms,
    }
}

/// Count successful backups and total their sizes.
pub fn aggregate_backup_status(backups: &[BackupRecord]) -> BackupSummary {
    BackupSummary {
        success_count: backups.iter().filter(|b| b.status.is_success()).count(),
        total: backups.len(),
        total_bytes: backups.iter().map(BackupRecord::size_bytes).sum(),
    }
}
