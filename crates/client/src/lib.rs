//! `galleria-client`
//!
//! **Responsibility:** talk to the back-office REST API.
//!
//! This crate provides:
//! - `BackofficeApi`, the set of calls the console makes
//! - `HttpBackoffice`, its `reqwest` implementation
//! - the checkout sequence (bill header, bill items, stock decrements)
//! - `InMemoryBackoffice`, behind the `testing` feature
//!
//! The backend stays the authority; nothing is cached or retried here.

pub mod api;
pub mod checkout;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod paths;

pub use api::BackofficeApi;
pub use checkout::{CheckoutError, CheckoutOutcome, CheckoutService, CheckoutStage, checkout};
pub use error::ApiError;
pub use http::{ConnectivityState, HttpBackoffice};
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryBackoffice;
