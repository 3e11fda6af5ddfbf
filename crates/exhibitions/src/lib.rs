//! Exhibitions domain module.
//!
//! A gallery is an exhibition the shop sells at, open for a date range.
//! Every bill is booked against one gallery.

pub mod gallery;

pub use gallery::{Gallery, GalleryStatus, NewGallery};
