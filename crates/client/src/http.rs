//! `reqwest` implementation of [`BackofficeApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Response, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;

use galleria_core::{CustomerId, GalleryId, MaterialId, PriceListId};
use galleria_exhibitions::{Gallery, NewGallery};
use galleria_inventory::{Material, MaterialUpdate, NewMaterial, QuantityUpdate};
use galleria_invoicing::{BillHeader, NewBillHeader, NewBillItem};
use galleria_parties::{Customer, NewCustomer};
use galleria_pricing::{NewPriceList, PriceList};

use crate::api::BackofficeApi;
use crate::error::ApiError;
use crate::paths;

/// Whether the backend answered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Online,
    Offline,
}

/// Backend client. Holds one `reqwest::Client` for the whole process.
#[derive(Debug, Clone)]
pub struct HttpBackoffice {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackoffice {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid API url {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "API url must be http or https, got {base_url:?}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Any HTTP answer, even an error status, counts as online.
    pub async fn check_connectivity(&self) -> ConnectivityState {
        match self.client.get(self.url(paths::GALLERIES)).send().await {
            Ok(_) => ConnectivityState::Online,
            Err(e) => {
                tracing::warn!(error = %e, base_url = %self.base_url, "backend unreachable");
                ConnectivityState::Offline
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(method = "GET", path, "backend request");
        let resp = self.client.get(self.url(path)).send().await?;
        read_json(resp).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        tracing::debug!(method = %method, path, "backend request");
        let resp = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        check(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(method = "DELETE", path, "backend request");
        let resp = self.client.delete(self.url(path)).send().await?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let path = resp.url().path().to_string();
    let body = resp.text().await.unwrap_or_default();
    let err = ApiError::from_response(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), path = %path, error = %err, "backend rejected request");
    Err(err)
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check(resp).await?;
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn material_form(update: &MaterialUpdate) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new()
        .text("id", update.id.to_string())
        .text("name", update.name.clone())
        .text("quantity", update.quantity.to_string());

    if let Some(image) = &update.image {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::Config(format!("bad image content type: {e}")))?;
        form = form.part("imageFile", part);
    }
    Ok(form)
}

#[async_trait]
impl BackofficeApi for HttpBackoffice {
    async fn list_materials(&self) -> Result<Vec<Material>, ApiError> {
        self.get_json(paths::MATERIALS).await
    }

    async fn get_material(&self, id: MaterialId) -> Result<Material, ApiError> {
        self.get_json(&paths::record(paths::MATERIALS, id)).await
    }

    async fn create_material(&self, material: &NewMaterial) -> Result<(), ApiError> {
        material.validate()?;
        self.send_json(Method::POST, paths::MATERIALS, material).await?;
        Ok(())
    }

    async fn update_material(&self, update: &MaterialUpdate) -> Result<(), ApiError> {
        update.validate()?;
        let path = paths::record(paths::MATERIALS, update.id);
        tracing::debug!(method = "PUT", path = %path, multipart = true, "backend request");
        let resp = self
            .client
            .put(self.url(&path))
            .multipart(material_form(update)?)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn delete_material(&self, id: MaterialId) -> Result<(), ApiError> {
        self.delete(&paths::record(paths::MATERIALS, id)).await
    }

    async fn update_material_quantity(
        &self,
        id: MaterialId,
        update: &QuantityUpdate,
    ) -> Result<(), ApiError> {
        let path = paths::record(paths::MATERIAL_QUANTITY, id);
        self.send_json(Method::PUT, &path, update).await?;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_json(paths::CUSTOMERS).await
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        self.get_json(&paths::record(paths::CUSTOMERS, id)).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), ApiError> {
        customer.validate()?;
        self.send_json(Method::POST, paths::CUSTOMERS, customer).await?;
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), ApiError> {
        customer.validate()?;
        let path = paths::record(paths::CUSTOMERS, &customer.id);
        self.send_json(Method::PUT, &path, customer).await?;
        Ok(())
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        self.delete(&paths::record(paths::CUSTOMERS, id)).await
    }

    async fn list_galleries(&self) -> Result<Vec<Gallery>, ApiError> {
        self.get_json(paths::GALLERIES).await
    }

    async fn get_gallery(&self, id: GalleryId) -> Result<Gallery, ApiError> {
        self.get_json(&paths::record(paths::GALLERIES, id)).await
    }

    async fn create_gallery(&self, gallery: &NewGallery) -> Result<(), ApiError> {
        gallery.validate()?;
        self.send_json(Method::POST, paths::GALLERIES, gallery).await?;
        Ok(())
    }

    async fn update_gallery(&self, gallery: &Gallery) -> Result<(), ApiError> {
        gallery.validate()?;
        let path = paths::record(paths::GALLERIES, gallery.id);
        self.send_json(Method::PUT, &path, gallery).await?;
        Ok(())
    }

    async fn delete_gallery(&self, id: GalleryId) -> Result<(), ApiError> {
        self.delete(&paths::record(paths::GALLERIES, id)).await
    }

    async fn list_price_lists(&self) -> Result<Vec<PriceList>, ApiError> {
        self.get_json(paths::PRICE_LISTS).await
    }

    async fn get_price_list(&self, id: PriceListId) -> Result<PriceList, ApiError> {
        self.get_json(&paths::record(paths::PRICE_LISTS, id)).await
    }

    async fn create_price_list(&self, price_list: &NewPriceList) -> Result<(), ApiError> {
        price_list.validate()?;
        self.send_json(Method::POST, paths::PRICE_LISTS, price_list).await?;
        Ok(())
    }

    async fn update_price_list(&self, price_list: &PriceList) -> Result<(), ApiError> {
        price_list.validate()?;
        let path = paths::record(paths::PRICE_LISTS, price_list.id);
        self.send_json(Method::PUT, &path, price_list).await?;
        Ok(())
    }

    async fn delete_price_list(&self, id: PriceListId) -> Result<(), ApiError> {
        self.delete(&paths::record(paths::PRICE_LISTS, id)).await
    }

    async fn create_bill_header(&self, header: &NewBillHeader) -> Result<BillHeader, ApiError> {
        let resp = self.send_json(Method::POST, paths::BILL_HEADERS, header).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(format!("bill header response: {e}")))
    }

    async fn create_bill_item(&self, item: &NewBillItem) -> Result<(), ApiError> {
        self.send_json(Method::POST, paths::BILL_ITEMS, item).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleria_inventory::ImageUpload;

    #[test]
    fn trailing_slash_is_dropped() {
        let api = HttpBackoffice::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url(paths::MATERIALS), "http://localhost:5000/api/Material");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            HttpBackoffice::new("not a url", Duration::from_secs(5)),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            HttpBackoffice::new("ftp://example.com", Duration::from_secs(5)),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn material_form_builds_with_and_without_image() {
        let mut update = MaterialUpdate {
            id: MaterialId::new(7),
            name: "Oil Lamp".to_string(),
            quantity: 4,
            image: None,
        };
        assert!(material_form(&update).is_ok());

        update.image = Some(ImageUpload::from_file_name("lamp.png", vec![1, 2, 3]));
        assert!(material_form(&update).is_ok());
    }
}
