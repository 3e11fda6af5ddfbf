//! Parties domain module.
//!
//! Customers of the shop, keyed by national id, optionally linked to a
//! relative who is also a customer.

pub mod customer;

pub use customer::{Customer, NewCustomer};
