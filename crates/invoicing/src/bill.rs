use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use galleria_core::{BillHeaderId, CustomerId, DomainError, GalleryId, MaterialId, Money};
use galleria_exhibitions::Gallery;
use galleria_inventory::QuantityUpdate;
use galleria_parties::Customer;
use galleria_sales::{Cart, CartLine};

/// Body of `POST /BillHeader`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBillHeader {
    #[serde(rename = "customerID")]
    pub customer_id: CustomerId,
    #[serde(rename = "galleryID")]
    pub gallery_id: GalleryId,
    #[serde(rename = "billingDate")]
    pub billing_date: DateTime<Utc>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Money,
}

/// Response of `POST /BillHeader`. Only the id is relied upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillHeader {
    pub id: BillHeaderId,
    #[serde(rename = "customerID", default)]
    pub customer_id: Option<CustomerId>,
    #[serde(rename = "galleryID", default)]
    pub gallery_id: Option<GalleryId>,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Option<Money>,
}

/// Body of `POST /BillItems`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBillItem {
    #[serde(rename = "billHeaderID")]
    pub bill_header_id: BillHeaderId,
    #[serde(rename = "materialID")]
    pub material_id: MaterialId,
    pub quantity: i64,
    #[serde(rename = "sellPrice")]
    pub sell_price: Money,
}

/// Everything needed to book one sale, checked up front.
///
/// The plan snapshots the cart so the calls made during checkout cannot be
/// affected by later cart edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    customer: Customer,
    gallery: Gallery,
    billing_date: DateTime<Utc>,
    lines: Vec<CartLine>,
    total: Money,
}

impl CheckoutPlan {
    pub fn new(
        cart: &Cart,
        customer: Customer,
        gallery: Gallery,
        billing_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::validation("cannot check out an empty cart"));
        }
        if cart.lines().iter().any(|l| l.quantity <= 0) {
            return Err(DomainError::invariant("cart line quantity must be positive"));
        }
        let total = cart
            .total()
            .map_err(|e| DomainError::invariant(e.to_string()))?;

        Ok(Self {
            customer,
            gallery,
            billing_date,
            lines: cart.lines().to_vec(),
            total,
        })
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn billing_date(&self) -> DateTime<Utc> {
        self.billing_date
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn header(&self) -> NewBillHeader {
        NewBillHeader {
            customer_id: self.customer.id.clone(),
            gallery_id: self.gallery.id,
            billing_date: self.billing_date,
            total_amount: self.total,
        }
    }

    pub fn item(&self, bill_header_id: BillHeaderId, line: &CartLine) -> NewBillItem {
        NewBillItem {
            bill_header_id,
            material_id: line.material_id,
            quantity: line.quantity,
            sell_price: line.sell_price,
        }
    }

    /// Stock decrement sent after the line's bill item is booked.
    pub fn stock_update(&self, line: &CartLine) -> Result<QuantityUpdate, DomainError> {
        QuantityUpdate::sold(line.quantity)
    }
}
