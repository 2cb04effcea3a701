//! Snapshot documents: one fetch of `status.json` or `backup-status.json`.
//!
//! Snapshots are transient. A dashboard reads one, turns it into display
//! data, and throws it away on the next load.

use crate::{parse_size_to_bytes, BackupStatus, HttpStatus};

/// A point-in-time view of service uptime (`status.json`).
///
/// # Example
///
/// ```rust
/// use statusboard_types::{HttpStatus, ServiceRecord, ServiceSnapshot};
///
/// let snapshot = ServiceSnapshot::new("2025-01-01T00:00:00Z")
///     .service(ServiceRecord::new("api", "https://api.example.com").status(HttpStatus::OK))
///     .service(ServiceRecord::new("web", "https://example.com").status(HttpStatus(502)));
///
/// assert_eq!(snapshot.services.len(), 2);
/// assert!(snapshot.services[0].is_online());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceSnapshot {
    /// When the checker produced this snapshot (ISO 8601).
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub updated: String,

    /// Services in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub services: Vec<ServiceRecord>,
}

impl ServiceSnapshot {
    /// Create an empty snapshot stamped with `updated`.
    pub fn new(updated: impl Into<String>) -> Self {
        Self {
            updated: updated.into(),
            services: Vec::new(),
        }
    }

    /// Append a service record.
    pub fn service(mut self, record: ServiceRecord) -> Self {
        self.services.push(record);
        self
    }
}

/// One service's most recent uptime check.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceRecord {
    /// Display label.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub url: String,

    /// HTTP status of the last check; `None` if missing or not numeric.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            with = "crate::loose::http_status",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub status: Option<HttpStatus>,

    /// Response time of the last check, in seconds.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            with = "crate::loose::seconds",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub response_time: Option<f64>,

    /// When the check ran (ISO 8601).
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub last_check: Option<String>,

    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub icon: Option<String>,

    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub description: Option<String>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: HttpStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn response_time(mut self, seconds: f64) -> Self {
        self.response_time = Some(seconds);
        self
    }

    pub fn last_check(mut self, timestamp: impl Into<String>) -> Self {
        self.last_check = Some(timestamp.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Online means the last check returned exactly 200.
    pub fn is_online(&self) -> bool {
        self.status.is_some_and(HttpStatus::is_online)
    }

    /// Response time usable for averaging: present and finite.
    pub fn valid_response_time(&self) -> Option<f64> {
        self.response_time.filter(|t| t.is_finite())
    }
}

/// A point-in-time view of database backups (`backup-status.json`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackupSnapshot {
    /// When the backup report was produced (ISO 8601).
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub updated: String,

    /// Backups in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub backups: Vec<BackupRecord>,
}

impl BackupSnapshot {
    pub fn new(updated: impl Into<String>) -> Self {
        Self {
            updated: updated.into(),
            backups: Vec::new(),
        }
    }

    /// Append a backup record.
    pub fn backup(mut self, record: BackupRecord) -> Self {
        self.backups.push(record);
        self
    }
}

/// The most recent backup of one project database.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackupRecord {
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub project: String,

    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::loose::label"))]
    pub database: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub status: BackupStatus,

    /// Size as written by the job, e.g. `"452K"` or `"2.1M"`.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub size: Option<String>,

    /// When the backup finished (ISO 8601).
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub last_backup: Option<String>,

    /// How long the job took, free-form (e.g. `"2.4s"`).
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub duration: Option<String>,

    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub message: Option<String>,

    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::loose::text",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub icon: Option<String>,
}

impl BackupRecord {
    pub fn new(project: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: BackupStatus) -> Self {
        self.status = status;
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn last_backup(mut self, timestamp: impl Into<String>) -> Self {
        self.last_backup = Some(timestamp.into());
        self
    }

    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Size in bytes; malformed or missing sizes count as zero.
    pub fn size_bytes(&self) -> f64 {
        parse_size_to_bytes(self.size.as_deref())
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_status_snapshot() {
        let json = r#"{
            "updated": "2025-03-01T09:00:00Z",
            "services": [
                {
                    "name": "ChargeBook",
                    "url": "https://ev.proudeng.com",
                    "status": 200,
                    "response_time": "0.245",
                    "last_check": "2025-03-01T08:59:58Z",
                    "icon": "⚡"
                },
                {
                    "name": "Proud English",
                    "url": "https://audio.proudeng.com",
                    "status": "200",
                    "response_time": 0.5
                },
                {
                    "name": "SSCharger",
                    "url": "https://sscharger.proudeng.com",
                    "status": "000",
                    "response_time": "timeout"
                },
                { "name": "Bare" }
            ]
        }"#;

        let snapshot: ServiceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.updated, "2025-03-01T09:00:00Z");
        assert_eq!(snapshot.services.len(), 4);

        let first = &snapshot.services[0];
        assert_eq!(first.status, Some(HttpStatus::OK));
        assert_eq!(first.response_time, Some(0.245));
        assert_eq!(first.icon.as_deref(), Some("⚡"));
        assert!(first.description.is_none());

        assert!(snapshot.services[1].is_online());
        assert_eq!(snapshot.services[1].response_time, Some(0.5));

        let down = &snapshot.services[2];
        assert_eq!(down.status, Some(HttpStatus(0)));
        assert!(!down.is_online());
        assert!(down.response_time.is_none());

        let bare = &snapshot.services[3];
        assert!(bare.status.is_none());
        assert!(bare.url.is_empty());
        assert!(bare.last_check.is_none());
    }

    #[test]
    fn test_null_and_odd_status_values() {
        let json = r#"{
            "updated": "2025-03-01T09:00:00Z",
            "services": [
                { "name": "a", "url": "", "status": null, "response_time": null },
                { "name": "b", "url": "", "status": true, "response_time": [1] },
                { "name": "c", "url": "", "status": 200.0 }
            ]
        }"#;

        let snapshot: ServiceSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.services[0].status.is_none());
        assert!(snapshot.services[0].response_time.is_none());
        assert!(snapshot.services[1].status.is_none());
        assert!(snapshot.services[1].response_time.is_none());
        assert!(snapshot.services[2].is_online());
    }

    #[test]
    fn test_deserialize_backup_snapshot() {
        let json = r#"{
            "updated": "2025-03-01T02:15:00Z",
            "backups": [
                {
                    "project": "ChargeBook",
                    "database": "chargebook",
                    "status": "success",
                    "size": "452K",
                    "last_backup": "2025-03-01T02:00:41Z",
                    "duration": "2.1s",
                    "message": "Backup completed: 452K"
                },
                {
                    "project": "Reserve Camping",
                    "database": "camping_alerts",
                    "status": "warning",
                    "size": "huge",
                    "last_backup": "2025-03-01T02:10:03Z"
                },
                {
                    "project": "Legacy",
                    "database": "legacy",
                    "status": "exploded"
                }
            ]
        }"#;

        let snapshot: BackupSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.backups.len(), 3);

        let first = &snapshot.backups[0];
        assert_eq!(first.status, BackupStatus::Success);
        assert_eq!(first.size_bytes(), 462848.0);
        assert_eq!(first.duration.as_deref(), Some("2.1s"));

        let warning = &snapshot.backups[1];
        assert_eq!(warning.status, BackupStatus::Warning);
        assert_eq!(warning.size_bytes(), 0.0);
        assert!(warning.message.is_none());

        let unknown = &snapshot.backups[2];
        assert_eq!(unknown.status, BackupStatus::Error);
        assert!(unknown.size.is_none());
        assert_eq!(unknown.size_bytes(), 0.0);
    }

    #[test]
    fn test_backup_status_is_case_sensitive() {
        let json = r#"{
            "updated": "2025-03-01T02:15:00Z",
            "backups": [
                { "project": "a", "database": "a", "status": "SUCCESS" },
                { "project": "b", "database": "b", "status": " success " },
                { "project": "c", "database": "c", "status": "success" }
            ]
        }"#;

        let snapshot: BackupSnapshot = serde_json::from_str(json).unwrap();
        let statuses: Vec<_> = snapshot.backups.iter().map(|b| b.status).collect();
        assert_eq!(
            statuses,
            [BackupStatus::Error, BackupStatus::Error, BackupStatus::Success]
        );
    }

    #[test]
    fn test_missing_display_fields_default() {
        let snapshot: ServiceSnapshot =
            serde_json::from_str(r#"{"services":[{"name":"a","url":"u","status":200}]}"#).unwrap();
        assert!(snapshot.updated.is_empty());
        assert!(snapshot.services[0].is_online());

        let snapshot: BackupSnapshot = serde_json::from_str(
            r#"{
                "updated": 1740795300,
                "backups": [
                    { "database": "chargebook", "status": "success", "size": 800, "duration": 2.4 },
                    { "project": ["x"], "database": null, "status": "warning",
                      "message": { "text": "slow" }, "last_backup": false, "icon": 7 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.updated, "1740795300");

        let first = &snapshot.backups[0];
        assert!(first.project.is_empty());
        assert_eq!(first.size.as_deref(), Some("800"));
        assert_eq!(first.size_bytes(), 800.0);
        assert_eq!(first.duration.as_deref(), Some("2.4"));

        let second = &snapshot.backups[1];
        assert!(second.project.is_empty());
        assert!(second.database.is_empty());
        assert_eq!(second.status, BackupStatus::Warning);
        assert!(second.message.is_none());
        assert!(second.last_backup.is_none());
        assert_eq!(second.icon.as_deref(), Some("7"));
    }

    #[test]
    fn test_serialize_normalized_values() {
        let snapshot = ServiceSnapshot::new("2025-03-01T09:00:00Z").service(
            ServiceRecord::new("api", "https://api.example.com")
                .status(HttpStatus::OK)
                .response_time(0.25),
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["services"][0]["status"], 200);
        assert_eq!(value["services"][0]["response_time"], 0.25);
        assert!(value["services"][0].get("icon").is_none());

        let backups = BackupSnapshot::new("2025-03-01T02:15:00Z")
            .backup(BackupRecord::new("p", "db").status(BackupStatus::Warning));
        let value = serde_json::to_value(&backups).unwrap();
        assert_eq!(value["backups"][0]["status"], "warning");
    }
}
