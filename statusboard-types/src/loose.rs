//! Lenient serde adapters for fields producers write inconsistently.
//!
//! Values that cannot be coerced become `None`, an empty string or
//! `BackupStatus::Error` instead of failing the whole document.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{parse_seconds, BackupStatus, HttpStatus};

/// Any JSON scalar the producers have been seen to emit.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Loose {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    /// Display text: strings as written, numbers in their shortest form.
    fn into_text(self) -> Option<String> {
        match self {
            Loose::Number(n) => Some(n.to_string()),
            Loose::Text(s) => Some(s),
            Loose::Other(_) => None,
        }
    }
}

/// Free-form display text that is sometimes written as a number.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Loose::deserialize(deserializer)?.into_text())
}

/// Like [`text`], but empty when missing or unusable.
pub(crate) fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Loose::deserialize(deserializer)?
        .into_text()
        .unwrap_or_default())
}

pub(crate) mod http_status {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<HttpStatus>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Number(n) => HttpStatus::from_number(n),
            Loose::Text(s) => HttpStatus::parse(&s),
            Loose::Other(_) => None,
        })
    }

    pub fn serialize<S>(value: &Option<HttpStatus>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(status) => serializer.serialize_u16(status.0),
            None => serializer.serialize_none(),
        }
    }
}

pub(crate) mod seconds {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Number(n) if n.is_finite() => Some(n),
            Loose::Text(s) => parse_seconds(&s),
            _ => None,
        })
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(seconds) => serializer.serialize_f64(*seconds),
            None => serializer.serialize_none(),
        }
    }
}

impl Serialize for BackupStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for BackupStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Text(label) => BackupStatus::from_label(&label),
            _ => BackupStatus::Error,
        })
    }
}
