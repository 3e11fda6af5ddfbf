//! The calls the console makes against the backend.

use async_trait::async_trait;

use galleria_core::{CustomerId, GalleryId, MaterialId, PriceListId};
use galleria_exhibitions::{Gallery, NewGallery};
use galleria_inventory::{Material, MaterialUpdate, NewMaterial, QuantityUpdate};
use galleria_invoicing::{BillHeader, NewBillHeader, NewBillItem};
use galleria_parties::{Customer, NewCustomer};
use galleria_pricing::{NewPriceList, PriceList};

use crate::error::ApiError;

/// Backend operations, one method per endpoint.
///
/// Bodies are validated client-side before they leave the process; the
/// backend still has the final say.
#[async_trait]
pub trait BackofficeApi: Send + Sync {
    // Materials
    async fn list_materials(&self) -> Result<Vec<Material>, ApiError>;
    async fn get_material(&self, id: MaterialId) -> Result<Material, ApiError>;
    async fn create_material(&self, material: &NewMaterial) -> Result<(), ApiError>;
    /// Multipart update; the image part is sent only when present.
    async fn update_material(&self, update: &MaterialUpdate) -> Result<(), ApiError>;
    async fn delete_material(&self, id: MaterialId) -> Result<(), ApiError>;
    async fn update_material_quantity(
        &self,
        id: MaterialId,
        update: &QuantityUpdate,
    ) -> Result<(), ApiError>;

    // Customers
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError>;
    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), ApiError>;
    async fn update_customer(&self, customer: &Customer) -> Result<(), ApiError>;
    async fn delete_customer(&self, id: &CustomerId) -> Result<(), ApiError>;

    // Galleries
    async fn list_galleries(&self) -> Result<Vec<Gallery>, ApiError>;
    async fn get_gallery(&self, id: GalleryId) -> Result<Gallery, ApiError>;
    async fn create_gallery(&self, gallery: &NewGallery) -> Result<(), ApiError>;
    async fn update_gallery(&self, gallery: &Gallery) -> Result<(), ApiError>;
    async fn delete_gallery(&self, id: GalleryId) -> Result<(), ApiError>;

    // Price lists
    async fn list_price_lists(&self) -> Result<Vec<PriceList>, ApiError>;
    async fn get_price_list(&self, id: PriceListId) -> Result<PriceList, ApiError>;
    async fn create_price_list(&self, price_list: &NewPriceList) -> Result<(), ApiError>;
    async fn update_price_list(&self, price_list: &PriceList) -> Result<(), ApiError>;
    async fn delete_price_list(&self, id: PriceListId) -> Result<(), ApiError>;

    // Billing
    async fn create_bill_header(&self, header: &NewBillHeader) -> Result<BillHeader, ApiError>;
    async fn create_bill_item(&self, item: &NewBillItem) -> Result<(), ApiError>;
}
