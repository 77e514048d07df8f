//! # Supplement Types
//!
//! Catalog entity and its repository trait.

use crate::error::RepositoryError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A supplement in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    /// Store-assigned identifier
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price, exact decimal
    pub price: Decimal,

    #[serde(default)]
    pub image_url: Option<String>,

    pub category: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub stock_quantity: Option<i32>,

    #[serde(default)]
    pub usage_instructions: Option<String>,

    #[serde(default)]
    pub benefits: Option<String>,

    /// False once the supplement has been soft-deleted
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Create/update payload: every field of [`Supplement`] except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplement {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub usage_instructions: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

impl NewSupplement {
    /// Minimal supplement with the required columns filled in
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            image_url: None,
            category: category.into(),
            brand: None,
            stock_quantity: None,
            usage_instructions: None,
            benefits: None,
            is_available: true,
        }
    }

    /// Builder: set brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Attach an id, producing the stored entity
    pub fn into_supplement(self, id: i64) -> Supplement {
        Supplement {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            brand: self.brand,
            stock_quantity: self.stock_quantity,
            usage_instructions: self.usage_instructions,
            benefits: self.benefits,
            is_available: self.is_available,
        }
    }
}

/// Persistence for supplements.
#[async_trait]
pub trait SupplementRepository: Send + Sync {
    /// Supplements with `is_available = true`, ordered by id
    async fn find_available(&self) -> Result<Vec<Supplement>, RepositoryError>;

    /// Every supplement in a category regardless of availability, ordered by id
    async fn find_by_category(&self, category: &str) -> Result<Vec<Supplement>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplement>, RepositoryError>;

    /// Insert and return the stored row with its assigned id
    async fn insert(&self, supplement: NewSupplement) -> Result<Supplement, RepositoryError>;

    /// Replace every column of an existing row
    async fn update(&self, supplement: &Supplement) -> Result<Supplement, RepositoryError>;
}

pub type BoxedSupplementRepository = Arc<dyn SupplementRepository>;
