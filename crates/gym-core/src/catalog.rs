//! # Catalog Service
//!
//! CRUD over supplements. Deleting is a soft delete: the row stays and
//! `is_available` flips to false.

use crate::error::RepositoryError;
use crate::supplement::{BoxedSupplementRepository, NewSupplement, Supplement};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Supplement not found: {0}")]
    NotFound(i64),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Prices are stored as `NUMERIC(12, 2)`.
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

impl CatalogError {
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::InvalidPrice(_) => 400,
            CatalogError::Repository(RepositoryError::NotFound(_)) => 404,
            CatalogError::Repository(RepositoryError::Conflict(_)) => 409,
            CatalogError::Repository(RepositoryError::Backend(_)) => 500,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone)]
pub struct CatalogService {
    repository: BoxedSupplementRepository,
}

impl CatalogService {
    pub fn new(repository: BoxedSupplementRepository) -> Self {
        Self { repository }
    }

    pub async fn list_available(&self) -> CatalogResult<Vec<Supplement>> {
        Ok(self.repository.find_available().await?)
    }

    pub async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Supplement>> {
        Ok(self.repository.find_by_category(category).await?)
    }

    pub async fn get(&self, id: i64) -> CatalogResult<Supplement> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self, supplement), fields(name = %supplement.name))]
    pub async fn create(&self, supplement: NewSupplement) -> CatalogResult<Supplement> {
        validate_price(supplement.price)?;
        let created = self.repository.insert(supplement).await?;
        info!("Created supplement {}", created.id);
        Ok(created)
    }

    /// Replace every field of an existing supplement.
    #[instrument(skip(self, details))]
    pub async fn update(&self, id: i64, details: NewSupplement) -> CatalogResult<Supplement> {
        validate_price(details.price)?;
        self.get(id).await?;
        Ok(self.repository.update(&details.into_supplement(id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i64) -> CatalogResult<()> {
        let mut supplement = self.get(id).await?;
        if supplement.is_available {
            supplement.is_available = false;
            self.repository.update(&supplement).await?;
            info!("Supplement {} marked unavailable", id);
        }
        Ok(())
    }
}

/// Reject prices the store could not hold exactly.
fn validate_price(price: Decimal) -> CatalogResult<()> {
    if price.normalize().scale() > PRICE_SCALE {
        return Err(CatalogError::InvalidPrice(format!(
            "{price} has more than {PRICE_SCALE} decimal places"
        )));
    }
    if price.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(CatalogError::InvalidPrice(format!("{price} is out of range")));
    }
    Ok(())
}
