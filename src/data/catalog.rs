//! Known services and backup projects.
//!
//! The catalogs drive mock data generation and can be replaced from the
//! config file (`[[services]]` and `[[projects]]` tables).

use serde::{Deserialize, Serialize};

/// A monitored service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A project whose database is backed up nightly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub database: String,
    /// When the nightly job runs, e.g. "02:00 UTC".
    #[serde(default)]
    pub schedule: Option<String>,
}

fn service(name: &str, icon: &str, url: &str, description: &str) -> ServiceEntry {
    ServiceEntry {
        name: name.to_string(),
        icon: Some(icon.to_string()),
        url: url.to_string(),
        description: Some(description.to_string()),
    }
}

fn project(name: &str, icon: &str, database: &str, schedule: &str) -> ProjectEntry {
    ProjectEntry {
        name: name.to_string(),
        icon: Some(icon.to_string()),
        database: database.to_string(),
        schedule: Some(schedule.to_string()),
    }
}

/// Services shown when no catalog is configured.
pub fn default_services() -> Vec<ServiceEntry> {
    vec![
        service(
            "ChargeBook",
            "⚡",
            "https://ev.proudeng.com",
            "EV charging management",
        ),
        service(
            "Proud English",
            "🎧",
            "https://audio.proudeng.com",
            "English learning audio streaming",
        ),
        service(
            "Reserve Camping (Staging)",
            "🏕️",
            "https://camping-stg.proudeng.com",
            "Campsite reservation alerts (staging)",
        ),
        service(
            "SSCharger (Production)",
            "🔌",
            "https://sscharger.proudeng.com",
            "Charging station information",
        ),
    ]
}

/// Backup projects shown when no catalog is configured.
pub fn default_projects() -> Vec<ProjectEntry> {
    vec![
        project("ChargeBook", "⚡", "chargebook", "02:00 UTC"),
        project("Proud English", "🎧", "proud_english", "02:05 UTC"),
        project("Reserve Camping", "🏕️", "camping_alerts", "02:10 UTC"),
    ]
}
