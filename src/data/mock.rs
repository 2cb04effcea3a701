//! Synthetic snapshots used when the real snapshot cannot be loaded.
//!
//! Mock data is never authoritative: boards built from it carry
//! [`Origin::Mock`](crate::source::Origin::Mock) and are flagged in the UI.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use statusboard_types::{
    BackupRecord, BackupSnapshot, BackupStatus, HttpStatus, ServiceRecord, ServiceSnapshot,
};

use super::catalog::{ProjectEntry, ServiceEntry};

/// Sizes a mock backup can report.
pub const MOCK_SIZES: [&str; 5] = ["420K", "452K", "2.1M", "2.2M", "1.8M"];

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a status snapshot where every catalog service is online with a
/// response time between 100 and 600 ms.
pub fn mock_service_data<R: Rng>(catalog: &[ServiceEntry], rng: &mut R) -> ServiceSnapshot {
    let now = now_rfc3339();

    let services = catalog
        .iter()
        .map(|entry| {
            let seconds: f64 = rng.random_range(0.1..0.6);
            ServiceRecord {
                name: entry.name.clone(),
                url: entry.url.clone(),
                status: Some(HttpStatus::OK),
                response_time: Some((seconds * 1000.0).round() / 1000.0),
                last_check: Some(now.clone()),
                icon: entry.icon.clone(),
                description: entry.description.clone(),
            }
        })
        .collect();

    ServiceSnapshot {
        updated: now,
        services,
    }
}

/// Pick one of [`MOCK_SIZES`].
pub fn random_size<R: Rng>(rng: &mut R) -> &'static str {
    MOCK_SIZES[rng.random_range(0..MOCK_SIZES.len())]
}

/// Build a backup snapshot where every catalog project backed up successfully.
pub fn mock_backup_data<R: Rng>(catalog: &[ProjectEntry], rng: &mut R) -> BackupSnapshot {
    let now = now_rfc3339();

    let backups = catalog
        .iter()
        .map(|project| {
            let size = random_size(rng);
            let seconds: f64 = rng.random_range(1.0..4.0);
            BackupRecord {
                project: project.name.clone(),
                database: project.database.clone(),
                status: BackupStatus::Success,
                size: Some(size.to_string()),
                last_backup: Some(now.clone()),
                duration: Some(format!("{:.1}s", seconds)),
                message: Some(format!("Backup completed: {}", size)),
                icon: project.icon.clone(),
            }
        })
        .collect();

    BackupSnapshot {
        updated: now,
        backups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{default_projects, default_services};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_services_populate_display_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = default_services();
        let snapshot = mock_service_data(&catalog, &mut rng);

        assert!(chrono::DateTime::parse_from_rfc3339(&snapshot.updated).is_ok());
        assert_eq!(snapshot.services.len(), catalog.len());

        for (record, entry) in snapshot.services.iter().zip(&catalog) {
            assert_eq!(record.name, entry.name);
            assert_eq!(record.url, entry.url);
            assert!(record.is_online());
            assert!(record.last_check.is_some());
            assert!(record.icon.is_some());
            let seconds = record.response_time.unwrap();
            assert!((0.1..=0.6).contains(&seconds), "{seconds}");
        }
    }

    #[test]
    fn test_mock_backups_populate_display_fields() {
        let mut rng = StdRng::seed_from_u64(11);
        let catalog = default_projects();

        for _ in 0..20 {
            let snapshot = mock_backup_data(&catalog, &mut rng);
            assert_eq!(snapshot.backups.len(), catalog.len());

            for record in &snapshot.backups {
                assert!(record.status.is_success());
                let size = record.size.as_deref().unwrap();
                assert!(MOCK_SIZES.contains(&size));
                assert!(record.size_bytes() > 0.0);
                assert!(record.last_backup.is_some());
                assert!(record.message.as_deref().unwrap().starts_with("Backup completed: "));

                let duration = record.duration.as_deref().unwrap();
                let seconds: f64 = duration.strip_suffix('s').unwrap().parse().unwrap();
                assert!((1.0..=4.0).contains(&seconds), "{duration}");
            }
        }
    }

    #[test]
    fn test_empty_catalogs_give_empty_snapshots() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(mock_service_data(&[], &mut rng).services.is_empty());
        assert!(mock_backup_data(&[], &mut rng).backups.is_empty());
    }
}
