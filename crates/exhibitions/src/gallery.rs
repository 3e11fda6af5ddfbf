use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use galleria_core::{DomainError, DomainResult, GalleryId, Searchable, ValidityWindow};

/// A gallery as returned by `GET /Gallery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub id: GalleryId,
    pub name: String,
    #[serde(flatten)]
    pub window: ValidityWindow,
}

/// Whether a gallery is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStatus {
    Open,
    Expired,
}

impl core::fmt::Display for GalleryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GalleryStatus::Open => f.write_str("open"),
            GalleryStatus::Expired => f.write_str("expired"),
        }
    }
}

impl Gallery {
    /// A gallery stays open through the last day of its window.
    pub fn status_on(&self, today: NaiveDate) -> GalleryStatus {
        if self.window.is_open_on(today) {
            GalleryStatus::Open
        } else {
            GalleryStatus::Expired
        }
    }

    /// Checks run before `PUT /Gallery/{id}`.
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        self.window.validate()
    }
}

impl Searchable for Gallery {
    fn search_key(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /Gallery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGallery {
    pub name: String,
    #[serde(flatten)]
    pub window: ValidityWindow,
}

impl NewGallery {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        self.window.validate()
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("gallery name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn spring_fair() -> Gallery {
        Gallery {
            id: GalleryId::new(2),
            name: "Spring Fair".to_string(),
            window: ValidityWindow::new(d(2025, 3, 1), d(2025, 3, 31)).unwrap(),
        }
    }

    #[test]
    fn decodes_flat_validity_fields() {
        let json = serde_json::json!({
            "id": 2,
            "name": "Spring Fair",
            "validFrom": "2025-03-01T00:00:00",
            "validTo": "2025-03-31T00:00:00"
        });
        let g: Gallery = serde_json::from_value(json).unwrap();
        assert_eq!(g, spring_fair());
    }

    #[test]
    fn new_gallery_body_is_flat() {
        let new = NewGallery {
            name: "Book Week".to_string(),
            window: ValidityWindow::new(d(2025, 5, 1), d(2025, 5, 7)).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({
                "name": "Book Week",
                "validFrom": "2025-05-01",
                "validTo": "2025-05-07"
            })
        );
    }

    #[test]
    fn status_turns_expired_after_last_day() {
        let g = spring_fair();
        assert_eq!(g.status_on(d(2025, 2, 1)), GalleryStatus::Open);
        assert_eq!(g.status_on(d(2025, 3, 31)), GalleryStatus::Open);
        assert_eq!(g.status_on(d(2025, 4, 1)), GalleryStatus::Expired);
    }

    #[test]
    fn validation_catches_blank_name_and_reversed_window() {
        let mut g = spring_fair();
        g.name = String::new();
        assert!(g.validate().is_err());

        let mut g = spring_fair();
        g.window.valid_to = d(2025, 2, 1);
        assert!(g.validate().is_err());
    }
}
