//! `galleria-core`: shared building blocks for the back-office domain.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP): typed
//! identifiers, money in minor units, validity windows and the domain error.

pub mod date;
pub mod error;
pub mod id;
pub mod money;
pub mod search;

pub use date::ValidityWindow;
pub use error::{DomainError, DomainResult};
pub use id::{BillHeaderId, CustomerId, GalleryId, MaterialId, PriceListId};
pub use money::Money;
pub use search::{Searchable, filter_by_name};
