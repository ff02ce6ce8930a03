//! Car catalog entry models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Server-assigned identifier for a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(i64);

impl CarId {
    /// Wrap a raw server-assigned id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value of this id
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CarId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A car entry as returned by the catalog service.
///
/// Entries are immutable once created; the only mutation the service
/// supports is full deletion. Field names follow Rust conventions, with
/// serde renames preserving the service's wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarEntry {
    /// Server-assigned unique identifier
    pub id: CarId,
    /// Email of the owning user; scopes every list/delete call
    #[serde(rename = "user_email")]
    pub owner_email: String,
    /// Display name of the car
    #[serde(rename = "nama_mobil")]
    pub name: String,
    /// Category or body type
    #[serde(rename = "tipe_mobil")]
    pub category: String,
    /// Where the photo was taken
    #[serde(rename = "tempat")]
    pub location: String,
    /// Opaque reference to the stored image resource
    pub image_id: String,
    /// Creation timestamp, formatted by the server
    pub created_at: String,
}

impl CarEntry {
    /// Best-effort parse of `created_at` for display purposes.
    ///
    /// Returns `None` when the server string is not in a recognized
    /// format; callers fall back to showing the raw string.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Client-supplied fields of a not-yet-uploaded entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    /// Email of the uploading user
    pub owner_email: String,
    /// Display name of the car
    pub name: String,
    /// Category or body type
    pub category: String,
    /// Where the photo was taken
    pub location: String,
}

impl CarDraft {
    /// Build a draft, trimming every field and rejecting empties.
    pub fn new(
        owner_email: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            owner_email: required_field(owner_email, "owner email")?,
            name: required_field(name, "name")?,
            category: required_field(category, "category")?,
            location: required_field(location, "location")?,
        })
    }
}

fn required_field(value: impl Into<String>, field: &str) -> Result<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Confirmation payload returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteReceipt {
    /// Human-readable confirmation from the server
    #[serde(alias = "detail")]
    pub message: String,
}
