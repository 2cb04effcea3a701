//! # statusboard-types
//!
//! Snapshot schema shared by the statusboard dashboards, plus the byte-size
//! helpers used to normalize backup sizes.
//!
//! Two snapshot documents are understood:
//!
//! - `status.json` ([`ServiceSnapshot`]): uptime checks for a list of services
//! - `backup-status.json` ([`BackupSnapshot`]): the most recent database backups
//!
//! Both are produced by external jobs and are read-only from the dashboard's
//! point of view. The producers are loose about types (a status code may be
//! `200` or `"200"`, a response time may be a number or a string), so the
//! coercion happens once here, at deserialization, and everything downstream
//! compares strict values.
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) support for the snapshot types
//!
//! ## Example
//!
//! ```rust
//! use statusboard_types::{format_bytes, parse_size_to_bytes};
//!
//! let bytes = parse_size_to_bytes(Some("1.5K"));
//! assert_eq!(bytes, 1536.0);
//! assert_eq!(format_bytes(bytes), "1.5 KB");
//!
//! // Malformed sizes are zero, never an error
//! assert_eq!(parse_size_to_bytes(Some("about a gig")), 0.0);
//! ```

mod size;
mod snapshot;
mod status;

#[cfg(feature = "serde")]
mod loose;

pub use size::*;
pub use snapshot::*;
pub use status::*;
