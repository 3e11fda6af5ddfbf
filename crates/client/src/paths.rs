//! Backend resource paths.

pub const MATERIALS: &str = "/Material";
pub const MATERIAL_QUANTITY: &str = "/Material/UpdateQuantity";
pub const CUSTOMERS: &str = "/Customers";
pub const GALLERIES: &str = "/Gallery";
pub const PRICE_LISTS: &str = "/PriceList";
pub const BILL_HEADERS: &str = "/BillHeader";
pub const BILL_ITEMS: &str = "/BillItems";

/// `{collection}/{id}`
pub fn record(collection: &str, id: impl core::fmt::Display) -> String {
    format!("{collection}/{id}")
}
