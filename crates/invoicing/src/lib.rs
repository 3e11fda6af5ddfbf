//! Invoicing domain module.
//!
//! Turns a cart into the bill the backend books (header + items + stock
//! decrements) and into the receipt handed to the customer. Pure data and
//! rendering (no IO, no HTTP); the client crate runs the calls.

pub mod bill;
pub mod receipt;

pub use bill::{BillHeader, CheckoutPlan, NewBillHeader, NewBillItem};
pub use receipt::{Receipt, ReceiptLine};
