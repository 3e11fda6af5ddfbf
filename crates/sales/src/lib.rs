//! Sales domain module.
//!
//! The cart kept at the till: which materials are being sold, in what
//! quantity, and how much stock is left on the shelf while the sale is open.
//! Pure bookkeeping (no IO, no HTTP).

pub mod cart;

pub use cart::{Cart, CartError, CartLine};
