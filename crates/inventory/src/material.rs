use serde::{Deserialize, Serialize};

use galleria_core::{DomainError, DomainResult, MaterialId, Money, Searchable};

/// A material as listed by `GET /Material`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Units currently in stock.
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Money>,
}

/// Stock availability shown next to a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock(i64),
    OutOfStock,
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockStatus::InStock(n) => write!(f, "{n}"),
            StockStatus::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

impl Material {
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity > 0 {
            StockStatus::InStock(self.quantity)
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl Searchable for Material {
    fn search_key(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /Material`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub name: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Money>,
}

impl NewMaterial {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_price("buy_price", self.buy_price)?;
        validate_price("sell_price", self.sell_price)?;
        Ok(())
    }
}

/// An image attached to a material update (the `imageFile` form part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Guess the content type from the file extension.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Form sent by `PUT /Material/{id}` (multipart: `id`, `name`, `quantity`,
/// optional `imageFile`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialUpdate {
    pub id: MaterialId,
    pub name: String,
    pub quantity: i64,
    pub image: Option<ImageUpload>,
}

impl MaterialUpdate {
    /// Start from the current record so untouched fields keep their values.
    pub fn from_material(material: &Material) -> Self {
        Self {
            id: material.id,
            name: material.name.clone(),
            quantity: material.quantity,
            image: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)?;
        if let Some(image) = &self.image {
            if image.bytes.is_empty() {
                return Err(DomainError::validation("image file is empty"));
            }
            if !image.content_type.starts_with("image/") {
                return Err(DomainError::validation(format!(
                    "{} is not an image",
                    image.file_name
                )));
            }
        }
        Ok(())
    }
}

/// Body of `PUT /Material/UpdateQuantity/{id}`: the number of units sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

impl QuantityUpdate {
    pub fn sold(quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("sold quantity must be positive"));
        }
        Ok(Self { quantity })
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    Ok(())
}

fn validate_price(field: &str, price: Option<Money>) -> DomainResult<()> {
    match price {
        Some(p) if p.is_negative() => Err(DomainError::validation(format!(
            "{field} cannot be negative"
        ))),
        _ => Ok(()),
    }
}
