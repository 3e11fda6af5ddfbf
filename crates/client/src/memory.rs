//! In-memory backoffice.
//!
//! Keeps every record in process memory and logs each call as
//! `METHOD path`, the way it would go over the wire. Any call can be made to
//! fail with a status and body, which are mapped exactly as an HTTP response
//! would be.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use galleria_core::{BillHeaderId, CustomerId, GalleryId, MaterialId, PriceListId};
use galleria_exhibitions::{Gallery, NewGallery};
use galleria_inventory::{Material, MaterialUpdate, NewMaterial, QuantityUpdate};
use galleria_invoicing::{BillHeader, NewBillHeader, NewBillItem};
use galleria_parties::{Customer, NewCustomer};
use galleria_pricing::{NewPriceList, PriceList};

use crate::api::BackofficeApi;
use crate::error::ApiError;
use crate::paths;

#[derive(Debug, Default)]
struct State {
    materials: BTreeMap<MaterialId, Material>,
    customers: BTreeMap<CustomerId, Customer>,
    galleries: BTreeMap<GalleryId, Gallery>,
    price_lists: BTreeMap<PriceListId, PriceList>,
    bill_headers: BTreeMap<BillHeaderId, BillHeader>,
    bill_items: Vec<NewBillItem>,
    calls: Vec<String>,
    failures: HashMap<String, (u16, String)>,
}

impl State {
    fn record(&mut self, method: &str, path: &str) -> Result<(), ApiError> {
        let call = format!("{method} {path}");
        let failure = self.failures.get(&call).cloned();
        self.calls.push(call);
        match failure {
            Some((status, body)) => Err(ApiError::from_response(status, &body)),
            None => Ok(()),
        }
    }
}

/// Next backend-assigned key for a table keyed by integer ids.
fn next_key<K: Copy + Into<i64>, V>(table: &BTreeMap<K, V>) -> i64 {
    table.keys().next_back().map_or(1, |k| (*k).into() + 1)
}

fn not_found(path: &str) -> ApiError {
    ApiError::NotFound(path.to_string())
}

/// Backoffice held in memory; see the module docs.
#[derive(Debug, Default)]
pub struct InMemoryBackoffice {
    state: Mutex<State>,
}

impl InMemoryBackoffice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(self, material: Material) -> Self {
        self.state().materials.insert(material.id, material);
        self
    }

    pub fn with_customer(self, customer: Customer) -> Self {
        self.state().customers.insert(customer.id.clone(), customer);
        self
    }

    pub fn with_gallery(self, gallery: Gallery) -> Self {
        self.state().galleries.insert(gallery.id, gallery);
        self
    }

    pub fn with_price_list(self, price_list: PriceList) -> Self {
        self.state().price_lists.insert(price_list.id, price_list);
        self
    }

    /// Answer `call` (e.g. `"POST /BillItems"`) with `status` and `body`
    /// from now on. Nothing is stored for a failed call.
    pub fn fail(&self, call: impl Into<String>, status: u16, body: impl Into<String>) {
        self.state()
            .failures
            .insert(call.into(), (status, body.into()));
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn materials(&self) -> Vec<Material> {
        self.state().materials.values().cloned().collect()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.state().customers.values().cloned().collect()
    }

    pub fn price_lists(&self) -> Vec<PriceList> {
        self.state().price_lists.values().cloned().collect()
    }

    pub fn bill_headers(&self) -> Vec<BillHeader> {
        self.state().bill_headers.values().cloned().collect()
    }

    pub fn bill_items(&self) -> Vec<NewBillItem> {
        self.state().bill_items.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BackofficeApi for InMemoryBackoffice {
    async fn list_materials(&self) -> Result<Vec<Material>, ApiError> {
        let mut state = self.state();
        state.record("GET", paths::MATERIALS)?;
        Ok(state.materials.values().cloned().collect())
    }

    async fn get_material(&self, id: MaterialId) -> Result<Material, ApiError> {
        let path = paths::record(paths::MATERIALS, id);
        let mut state = self.state();
        state.record("GET", &path)?;
        state.materials.get(&id).cloned().ok_or_else(|| not_found(&path))
    }

    async fn create_material(&self, material: &NewMaterial) -> Result<(), ApiError> {
        material.validate()?;
        let mut state = self.state();
        state.record("POST", paths::MATERIALS)?;
        let id = MaterialId::new(next_key(&state.materials));
        state.materials.insert(
            id,
            Material {
                id,
                name: material.name.clone(),
                quantity: material.quantity,
                image_path: material.image_path.clone(),
                buy_price: material.buy_price,
                sell_price: material.sell_price,
            },
        );
        Ok(())
    }

    async fn update_material(&self, update: &MaterialUpdate) -> Result<(), ApiError> {
        update.validate()?;
        let path = paths::record(paths::MATERIALS, update.id);
        let mut state = self.state();
        state.record("PUT", &path)?;
        let material = state
            .materials
            .get_mut(&update.id)
            .ok_or_else(|| not_found(&path))?;
        material.name = update.name.clone();
        material.quantity = update.quantity;
        if let Some(image) = &update.image {
            material.image_path = Some(format!("/images/{}", image.file_name));
        }
        Ok(())
    }

    async fn delete_material(&self, id: MaterialId) -> Result<(), ApiError> {
        let path = paths::record(paths::MATERIALS, id);
        let mut state = self.state();
        state.record("DELETE", &path)?;
        state.materials.remove(&id).map(|_| ()).ok_or_else(|| not_found(&path))
    }

    async fn update_material_quantity(
        &self,
        id: MaterialId,
        update: &QuantityUpdate,
    ) -> Result<(), ApiError> {
        let path = paths::record(paths::MATERIAL_QUANTITY, id);
        let mut state = self.state();
        state.record("PUT", &path)?;
        let material = state.materials.get_mut(&id).ok_or_else(|| not_found(&path))?;
        if material.quantity < update.quantity {
            return Err(ApiError::Status {
                status: 400,
                message: format!("only {} of material {id} in stock", material.quantity),
            });
        }
        material.quantity -= update.quantity;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let mut state = self.state();
        state.record("GET", paths::CUSTOMERS)?;
        Ok(state.customers.values().cloned().collect())
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        let path = paths::record(paths::CUSTOMERS, id);
        let mut state = self.state();
        state.record("GET", &path)?;
        state.customers.get(id).cloned().ok_or_else(|| not_found(&path))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), ApiError> {
        customer.validate()?;
        let mut state = self.state();
        state.record("POST", paths::CUSTOMERS)?;
        if state.customers.contains_key(&customer.id) {
            return Err(ApiError::from_response(
                400,
                r#"{"message":"Customer with this ID already exists"}"#,
            ));
        }
        let relative_name = customer
            .relative_id
            .as_ref()
            .and_then(|id| state.customers.get(id))
            .map(|relative| relative.name.clone());
        state.customers.insert(
            customer.id.clone(),
            Customer {
                id: customer.id.clone(),
                name: customer.name.clone(),
                relative_id: customer.relative_id.clone(),
                relative_name,
            },
        );
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), ApiError> {
        customer.validate()?;
        let path = paths::record(paths::CUSTOMERS, &customer.id);
        let mut state = self.state();
        state.record("PUT", &path)?;
        let stored = state
            .customers
            .get_mut(&customer.id)
            .ok_or_else(|| not_found(&path))?;
        *stored = customer.clone();
        Ok(())
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        let path = paths::record(paths::CUSTOMERS, id);
        let mut state = self.state();
        state.record("DELETE", &path)?;
        state.customers.remove(id).map(|_| ()).ok_or_else(|| not_found(&path))
    }

    async fn list_galleries(&self) -> Result<Vec<Gallery>, ApiError> {
        let mut state = self.state();
        state.record("GET", paths::GALLERIES)?;
        Ok(state.galleries.values().cloned().collect())
    }

    async fn get_gallery(&self, id: GalleryId) -> Result<Gallery, ApiError> {
        let path = paths::record(paths::GALLERIES, id);
        let mut state = self.state();
        state.record("GET", &path)?;
        state.galleries.get(&id).cloned().ok_or_else(|| not_found(&path))
    }

    async fn create_gallery(&self, gallery: &NewGallery) -> Result<(), ApiError> {
        gallery.validate()?;
        let mut state = self.state();
        state.record("POST", paths::GALLERIES)?;
        let id = GalleryId::new(next_key(&state.galleries));
        state.galleries.insert(
            id,
            Gallery {
                id,
                name: gallery.name.clone(),
                window: gallery.window,
            },
        );
        Ok(())
    }

    async fn update_gallery(&self, gallery: &Gallery) -> Result<(), ApiError> {
        gallery.validate()?;
        let path = paths::record(paths::GALLERIES, gallery.id);
        let mut state = self.state();
        state.record("PUT", &path)?;
        let stored = state
            .galleries
            .get_mut(&gallery.id)
            .ok_or_else(|| not_found(&path))?;
        *stored = gallery.clone();
        Ok(())
    }

    async fn delete_gallery(&self, id: GalleryId) -> Result<(), ApiError> {
        let path = paths::record(paths::GALLERIES, id);
        let mut state = self.state();
        state.record("DELETE", &path)?;
        state.galleries.remove(&id).map(|_| ()).ok_or_else(|| not_found(&path))
    }

    async fn list_price_lists(&self) -> Result<Vec<PriceList>, ApiError> {
        let mut state = self.state();
        state.record("GET", paths::PRICE_LISTS)?;
        Ok(state.price_lists.values().cloned().collect())
    }

    async fn get_price_list(&self, id: PriceListId) -> Result<PriceList, ApiError> {
        let path = paths::record(paths::PRICE_LISTS, id);
        let mut state = self.state();
        state.record("GET", &path)?;
        state.price_lists.get(&id).cloned().ok_or_else(|| not_found(&path))
    }

    async fn create_price_list(&self, price_list: &NewPriceList) -> Result<(), ApiError> {
        price_list.validate()?;
        let mut state = self.state();
        state.record("POST", paths::PRICE_LISTS)?;
        let id = PriceListId::new(next_key(&state.price_lists));
        let material_name = state
            .materials
            .get(&price_list.material_id)
            .map(|m| m.name.clone());
        state.price_lists.insert(
            id,
            PriceList {
                id,
                material_id: price_list.material_id,
                material_name,
                window: price_list.window,
                buy_price: price_list.buy_price,
                sell_price: price_list.sell_price,
            },
        );
        Ok(())
    }

    async fn update_price_list(&self, price_list: &PriceList) -> Result<(), ApiError> {
        price_list.validate()?;
        let path = paths::record(paths::PRICE_LISTS, price_list.id);
        let mut state = self.state();
        state.record("PUT", &path)?;
        let stored = state
            .price_lists
            .get_mut(&price_list.id)
            .ok_or_else(|| not_found(&path))?;
        *stored = price_list.clone();
        Ok(())
    }

    async fn delete_price_list(&self, id: PriceListId) -> Result<(), ApiError> {
        let path = paths::record(paths::PRICE_LISTS, id);
        let mut state = self.state();
        state.record("DELETE", &path)?;
        state.price_lists.remove(&id).map(|_| ()).ok_or_else(|| not_found(&path))
    }

    async fn create_bill_header(&self, header: &NewBillHeader) -> Result<BillHeader, ApiError> {
        let mut state = self.state();
        state.record("POST", paths::BILL_HEADERS)?;
        let id = BillHeaderId::new(next_key(&state.bill_headers));
        let stored = BillHeader {
            id,
            customer_id: Some(header.customer_id.clone()),
            gallery_id: Some(header.gallery_id),
            total_amount: Some(header.total_amount),
        };
        state.bill_headers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn create_bill_item(&self, item: &NewBillItem) -> Result<(), ApiError> {
        let mut state = self.state();
        state.record("POST", paths::BILL_ITEMS)?;
        if !state.bill_headers.contains_key(&item.bill_header_id) {
            return Err(not_found(&paths::record(
                paths::BILL_HEADERS,
                item.bill_header_id,
            )));
        }
        state.bill_items.push(item.clone());
        Ok(())
    }
}
