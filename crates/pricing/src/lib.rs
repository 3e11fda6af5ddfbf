//! Pricing domain module.
//!
//! Price lists record the buy and sell price of a material for a validity
//! window.

pub mod price_list;

pub use price_list::{NewPriceList, PriceList, effective_for};
