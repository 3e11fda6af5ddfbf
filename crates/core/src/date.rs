//! Calendar dates and validity windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Format used for dates sent to the backend.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date the way the backend returns it.
///
/// Accepts a plain `YYYY-MM-DD` as well as a timestamp whose first ten
/// characters are the date (`2025-03-01T00:00:00`).
pub fn parse_api_date(s: &str) -> DomainResult<NaiveDate> {
    let s = s.trim();
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, API_DATE_FORMAT)
        .map_err(|e| DomainError::validation(format!("invalid date {s:?}: {e}")))
}

/// Serde adapter for [`NaiveDate`] fields in backend payloads.
pub mod api_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::API_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_api_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// An inclusive date range (`valid_from ..= valid_to`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityWindow {
    #[serde(with = "api_date")]
    pub valid_from: NaiveDate,
    #[serde(with = "api_date")]
    pub valid_to: NaiveDate,
}

impl ValidityWindow {
    /// Build a window, rejecting one that ends before it starts.
    pub fn new(valid_from: NaiveDate, valid_to: NaiveDate) -> DomainResult<Self> {
        let window = Self {
            valid_from,
            valid_to,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.valid_to < self.valid_from {
            return Err(DomainError::validation(
                "valid_to must not be earlier than valid_from",
            ));
        }
        Ok(())
    }

    /// Whether `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }

    /// Whether the window has not yet ended on `date`.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        date <= self.valid_to
    }
}
