//! Catalog product types.
//!
//! Products are owned by an external catalog process; this service only
//! reads them. Wire names (`nombre`, `precio`, ...) follow the contract the
//! browser client was built against.

use serde::{Deserialize, Serialize};

use crate::keys::normalize_sku;
use crate::types::{DbId, Timestamp};

/// Highest allowed product rating.
pub const MAX_RATING: f64 = 5.0;

/// A full catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    pub stock: i32,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display-safe projection returned by catalog listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: f64,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            sku: p.sku.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            base_price: p.base_price,
            category: p.category.clone(),
            stock: p.stock,
            image: p.image.clone(),
            brand: p.brand.clone(),
            rating: p.rating,
        }
    }
}

/// The `{name, price}` snapshot attached to resolved override entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: f64,
}

impl From<&Product> for ProductSnapshot {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            price: p.price,
        }
    }
}

/// Catalog insert payload, used for seeding stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: f64,
}

impl NewProduct {
    /// Minimal product with defaults for every optional attribute.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            description: None,
            price,
            base_price: price,
            category: None,
            stock: 0,
            image: None,
            brand: None,
            rating: 0.0,
        }
    }

    /// Canonical form as persisted: uppercase SKU, trimmed text fields.
    pub fn normalized(&self) -> Self {
        Self {
            sku: normalize_sku(&self.sku),
            name: self.name.trim().to_string(),
            description: trim_opt(&self.description),
            category: trim_opt(&self.category),
            image: trim_opt(&self.image),
            brand: trim_opt(&self.brand),
            ..self.clone()
        }
    }

    /// Check the catalog attribute rules, returning a message per violation.
    pub fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.sku.trim().is_empty() {
            out.push("SKU is required".to_string());
        }
        if self.name.trim().is_empty() {
            out.push("Name is required".to_string());
        }
        if self.price < 0.0 {
            out.push("Price must be greater than or equal to 0".to_string());
        }
        if self.base_price < 0.0 {
            out.push("Base price must be greater than or equal to 0".to_string());
        }
        if self.stock < 0 {
            out.push("Stock must be greater than or equal to 0".to_string());
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            out.push("Rating must be between 0 and 5".to_string());
        }
        out
    }
}

fn trim_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
