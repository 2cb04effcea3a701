//! Layered settings.
//!
//! Precedence, lowest first: built-in defaults, the TOML config file
//! (`--config`, or `statusboard.toml` in the working directory when present),
//! `STATUSBOARD_*` environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::catalog::{default_projects, default_services, ProjectEntry, ServiceEntry};
use crate::data::duration::parse_duration;
use crate::source::SnapshotLocation;

/// Default refresh period of the service dashboard.
pub const DEFAULT_STATUS_REFRESH: &str = "5m";
/// Default refresh period of the backup dashboard.
pub const DEFAULT_BACKUP_REFRESH: &str = "24h";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path or URL of `status.json`.
    pub status_source: String,
    pub status_refresh: String,
    /// Path or URL of `backup-status.json`.
    pub backup_source: String,
    pub backup_refresh: String,
    /// Substitute mock data when a snapshot cannot be loaded.
    pub mock_fallback: bool,
    pub log_file: Option<PathBuf>,
    /// Services used for mock data.
    pub services: Vec<ServiceEntry>,
    /// Backup projects used for mock data.
    pub projects: Vec<ProjectEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            status_source: "status.json".to_string(),
            status_refresh: DEFAULT_STATUS_REFRESH.to_string(),
            backup_source: "backup-status.json".to_string(),
            backup_refresh: DEFAULT_BACKUP_REFRESH.to_string(),
            mock_fallback: true,
            log_file: None,
            services: default_services(),
            projects: default_projects(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub status_source: Option<String>,
    pub status_refresh: Option<String>,
    pub backup_source: Option<String>,
    pub backup_refresh: Option<String>,
    pub mock_fallback: Option<bool>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `config_path` (or `statusboard.toml` if it exists),
    /// the environment and `overrides`.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_layers(config_path, environment(), overrides)
    }

    fn load_layers(
        config_path: Option<&Path>,
        environment: Environment,
        overrides: &Overrides,
    ) -> Result<Self> {
        let builder = Config::builder();
        let builder = match config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name("statusboard").required(false)),
        };

        let config = builder
            .add_source(environment)
            .set_override_option("status_source", overrides.status_source.clone())?
            .set_override_option("status_refresh", overrides.status_refresh.clone())?
            .set_override_option("backup_source", overrides.backup_source.clone())?
            .set_override_option("backup_refresh", overrides.backup_refresh.clone())?
            .set_override_option("mock_fallback", overrides.mock_fallback)?
            .set_override_option(
                "log_file",
                overrides
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()
            .context("Failed to read configuration")?;

        let settings: Settings = config
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would only fail later, at spawn time.
    pub fn validate(&self) -> Result<()> {
        self.status_interval()?;
        self.backup_interval()?;
        self.status_location()?;
        self.backup_location()?;
        Ok(())
    }

    pub fn status_interval(&self) -> Result<Duration> {
        refresh_interval("status_refresh", &self.status_refresh)
    }

    pub fn backup_interval(&self) -> Result<Duration> {
        refresh_interval("backup_refresh", &self.backup_refresh)
    }

    pub fn status_location(&self) -> Result<SnapshotLocation> {
        SnapshotLocation::parse(&self.status_source)
            .with_context(|| format!("Invalid status_source: {}", self.status_source))
    }

    pub fn backup_location(&self) -> Result<SnapshotLocation> {
        SnapshotLocation::parse(&self.backup_source)
            .with_context(|| format!("Invalid backup_source: {}", self.backup_source))
    }
}

fn refresh_interval(key: &str, value: &str) -> Result<Duration> {
    let period = parse_duration(value).with_context(|| format!("Invalid {}: {}", key, value))?;
    if period.is_zero() {
        bail!("{} must be greater than zero", key);
    }
    Ok(period)
}

fn environment() -> Environment {
    Environment::with_prefix("STATUSBOARD")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("statusboard.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.status_interval().unwrap(), Duration::from_secs(300));
        assert_eq!(settings.backup_interval().unwrap(), Duration::from_secs(86_400));
        assert!(settings.mock_fallback);
        assert_eq!(settings.services.len(), 4);
        assert_eq!(settings.projects.len(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
status_source = "https://status.example.com/status.json"
status_refresh = "30s"

[[services]]
name = "Wiki"
url = "https://wiki.example.com"
"#,
        );

        let settings = Settings::load(Some(&path), &Overrides::default()).unwrap();
        assert_eq!(settings.status_source, "https://status.example.com/status.json");
        assert_eq!(settings.status_interval().unwrap(), Duration::from_secs(30));
        assert!(matches!(settings.status_location().unwrap(), SnapshotLocation::Url(_)));
        // Untouched keys keep their defaults
        assert_eq!(settings.backup_refresh, "24h");
        assert_eq!(settings.projects.len(), 3);

        assert_eq!(settings.services.len(), 1);
        assert_eq!(settings.services[0].name, "Wiki");
        assert!(settings.services[0].icon.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "status_refresh = \"30s\"\nmock_fallback = true\n");

        let overrides = Overrides {
            status_refresh: Some("10s".to_string()),
            mock_fallback: Some(false),
            log_file: Some(PathBuf::from("/tmp/statusboard.log")),
            ..Default::default()
        };
        let settings = Settings::load(Some(&path), &overrides).unwrap();
        assert_eq!(settings.status_interval().unwrap(), Duration::from_secs(10));
        assert!(!settings.mock_fallback);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/statusboard.log")));
    }

    #[test]
    fn test_environment_layer() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "status_refresh = \"30s\"\nbackup_refresh = \"12h\"\n");

        let vars = config::Map::from([
            ("STATUSBOARD_STATUS_REFRESH".to_string(), "2m".to_string()),
            ("STATUSBOARD_BACKUP_REFRESH".to_string(), "6h".to_string()),
            ("STATUSBOARD_MOCK_FALLBACK".to_string(), "false".to_string()),
        ]);
        let env = || environment().source(Some(vars.clone()));

        // Environment beats the file
        let settings = Settings::load_layers(Some(&path), env(), &Overrides::default()).unwrap();
        assert_eq!(settings.status_interval().unwrap(), Duration::from_secs(120));
        assert_eq!(settings.backup_interval().unwrap(), Duration::from_secs(6 * 3600));
        assert!(!settings.mock_fallback);

        // Command line beats the environment
        let overrides = Overrides {
            status_refresh: Some("10s".to_string()),
            ..Default::default()
        };
        let settings = Settings::load_layers(Some(&path), env(), &overrides).unwrap();
        assert_eq!(settings.status_interval().unwrap(), Duration::from_secs(10));
        assert_eq!(settings.backup_interval().unwrap(), Duration::from_secs(6 * 3600));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/statusboard.toml")), &Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let zero = Settings {
            status_refresh: "0s".to_string(),
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let garbage = Settings {
            backup_refresh: "daily".to_string(),
            ..Default::default()
        };
        assert!(garbage.validate().is_err());
    }
}
