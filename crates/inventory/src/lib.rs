//! Inventory domain module.
//!
//! Materials are the items on sale. This crate holds their wire shapes and
//! the checks run before a material is sent to the backend (no IO, no HTTP).

pub mod material;

pub use material::{
    ImageUpload, Material, MaterialUpdate, NewMaterial, QuantityUpdate, StockStatus,
};
