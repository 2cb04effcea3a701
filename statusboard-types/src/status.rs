//! Status values as reported by the uptime checker and the backup jobs.

use core::fmt;

/// An HTTP status code from an uptime check.
///
/// Checkers write the code either as a number (`200`) or as a string
/// (`"200"`). Both are coerced to this type when a snapshot is read, so
/// comparisons downstream are plain equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpStatus(pub u16);

impl HttpStatus {
    /// The only status that counts as online.
    pub const OK: HttpStatus = HttpStatus(200);

    /// Whether a service reporting this status is online.
    pub fn is_online(self) -> bool {
        self == Self::OK
    }

    /// Coerce a JSON number. Fractional, negative and out-of-range values are rejected.
    pub fn from_number(n: f64) -> Option<Self> {
        if n.is_finite() && n.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(&n) {
            Some(Self(n as u16))
        } else {
            None
        }
    }

    /// Coerce a numeric string such as `"200"` or `" 503 "`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::from_number)
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coerce a response time in seconds written as a number or a string.
///
/// Returns `None` for anything that is not a finite number, so callers can
/// exclude the record from averages.
pub fn parse_seconds(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outcome of a backup job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BackupStatus {
    Success,
    Warning,
    /// Failed, or any status the dashboard does not recognise.
    #[default]
    Error,
}

impl BackupStatus {
    /// Parse a status label. Only the exact lowercase labels are recognised;
    /// anything else is [`BackupStatus::Error`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "success" => BackupStatus::Success,
            "warning" => BackupStatus::Warning,
            _ => BackupStatus::Error,
        }
    }

    /// The label as written in `backup-status.json`.
    pub fn label(&self) -> &'static str {
        match self {
            BackupStatus::Success => "success",
            BackupStatus::Warning => "warning",
            BackupStatus::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == BackupStatus::Success
    }
}

impl fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
