//! Strongly-typed identifiers used across the domain.
//!
//! The backend assigns integer keys to materials, galleries, price lists and
//! bills. Customers are keyed by their 14-digit national id instead.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a material (inventory item).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(i64);

/// Identifier of a gallery (exhibition).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryId(i64);

/// Identifier of a price list entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceListId(i64);

/// Identifier of a bill header (invoice), assigned by the backend on creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillHeaderId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(MaterialId, "MaterialId");
impl_int_newtype!(GalleryId, "GalleryId");
impl_int_newtype!(PriceListId, "PriceListId");
impl_int_newtype!(BillHeaderId, "BillHeaderId");

/// Number of digits in a national id.
pub const CUSTOMER_ID_LEN: usize = 14;

/// Identifier of a customer: a 14-digit national id.
///
/// Parsing enforces the format; deserialization does not, so records the
/// backend already holds are always readable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse and validate a national id.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::invalid_id(
                "CustomerId: only digits are allowed",
            ));
        }
        if s.len() != CUSTOMER_ID_LEN {
            return Err(DomainError::invalid_id(format!(
                "CustomerId: expected {} digits, got {}",
                CUSTOMER_ID_LEN,
                s.len()
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Whether the held value has the national id format.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == CUSTOMER_ID_LEN && self.0.chars().all(|c| c.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CustomerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
