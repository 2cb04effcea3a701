//! JSON export of the dashboards.
//!
//! Shared by `--export` (load once, write, exit) and the `e` key in the TUI.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use serde_json::{json, Map, Value};

use crate::data::{BackupBoard, ServiceBoard};

/// Default file name used by the in-app export.
pub const DEFAULT_EXPORT_PATH: &str = "statusboard_export.json";

fn service_section(board: &ServiceBoard) -> Value {
    let items: Vec<Value> = board
        .cards
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "url": c.url,
                "description": c.description,
                "status": c.status.map(|s| s.0),
                "online": c.online,
                "response_ms": c.response_ms,
                "last_check": c.last_check,
            })
        })
        .collect();

    json!({
        "origin": board.origin.label(),
        "error": board.fetch_error,
        "updated": board.updated,
        "online": board.summary.online_count,
        "total": board.summary.total,
        "avg_response_ms": board.summary.avg_response_ms,
        "items": items,
    })
}

fn backup_section(board: &BackupBoard) -> Value {
    let items: Vec<Value> = board
        .cards
        .iter()
        .map(|c| {
            json!({
                "project": c.project,
                "database": c.database,
                "status": c.status.label(),
                "size": c.size,
                "size_bytes": c.size_bytes,
                "last_backup": c.last_backup,
                "duration": c.duration,
                "message": c.message,
            })
        })
        .collect();

    json!({
        "origin": board.origin.label(),
        "error": board.fetch_error,
        "updated": board.updated,
        "successful": board.summary.success_count,
        "total": board.summary.total,
        "total_size": board.summary.total_size(),
        "total_bytes": board.summary.total_bytes,
        "items": items,
    })
}

/// Build the export document. Dashboards that have not loaded are omitted.
pub fn build_export(services: Option<&ServiceBoard>, backups: Option<&BackupBoard>) -> Result<Value> {
    if services.is_none() && backups.is_none() {
        bail!("No data to export");
    }

    let mut export = Map::new();
    if let Some(board) = services {
        export.insert("services".to_string(), service_section(board));
    }
    if let Some(board) = backups {
        export.insert("backups".to_string(), backup_section(board));
    }
    Ok(Value::Object(export))
}

/// Write an export document as pretty-printed JSON.
pub fn write_export(path: &Path, export: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(export)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
