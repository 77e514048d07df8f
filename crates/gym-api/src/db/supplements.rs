//! Supplement repository backed by the `supplements` table.

use async_trait::async_trait;
use gym_core::{NewSupplement, RepositoryError, Supplement, SupplementRepository};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::repository_error;

const SUPPLEMENT_COLUMNS: &str = "id, name, description, price, image_url, category, brand, \
                                  stock_quantity, usage_instructions, benefits, is_available";

#[derive(Debug, FromRow)]
struct SupplementRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    image_url: Option<String>,
    category: String,
    brand: Option<String>,
    stock_quantity: Option<i32>,
    usage_instructions: Option<String>,
    benefits: Option<String>,
    is_available: bool,
}

impl From<SupplementRow> for Supplement {
    fn from(row: SupplementRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            category: row.category,
            brand: row.brand,
            stock_quantity: row.stock_quantity,
            usage_instructions: row.usage_instructions,
            benefits: row.benefits,
            is_available: row.is_available,
        }
    }
}

#[derive(Clone)]
pub struct PgSupplementRepository {
    pool: PgPool,
}

impl PgSupplementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplementRepository for PgSupplementRepository {
    async fn find_available(&self) -> Result<Vec<Supplement>, RepositoryError> {
        let rows = sqlx::query_as::<_, SupplementRow>(&format!(
            "SELECT {SUPPLEMENT_COLUMNS} FROM supplements WHERE is_available ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(rows.into_iter().map(Supplement::from).collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Supplement>, RepositoryError> {
        let rows = sqlx::query_as::<_, SupplementRow>(&format!(
            "SELECT {SUPPLEMENT_COLUMNS} FROM supplements WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(rows.into_iter().map(Supplement::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplement>, RepositoryError> {
        let row = sqlx::query_as::<_, SupplementRow>(&format!(
            "SELECT {SUPPLEMENT_COLUMNS} FROM supplements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Supplement::from))
    }

    async fn insert(&self, supplement: NewSupplement) -> Result<Supplement, RepositoryError> {
        let row = sqlx::query_as::<_, SupplementRow>(&format!(
            "INSERT INTO supplements \
                 (name, description, price, image_url, category, brand, stock_quantity, \
                  usage_instructions, benefits, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {SUPPLEMENT_COLUMNS}"
        ))
        .bind(&supplement.name)
        .bind(&supplement.description)
        .bind(supplement.price)
        .bind(&supplement.image_url)
        .bind(&supplement.category)
        .bind(&supplement.brand)
        .bind(supplement.stock_quantity)
        .bind(&supplement.usage_instructions)
        .bind(&supplement.benefits)
        .bind(supplement.is_available)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }

    async fn update(&self, supplement: &Supplement) -> Result<Supplement, RepositoryError> {
        let row = sqlx::query_as::<_, SupplementRow>(&format!(
            "UPDATE supplements SET \
                 name = $2, description = $3, price = $4, image_url = $5, category = $6, \
                 brand = $7, stock_quantity = $8, usage_instructions = $9, benefits = $10, \
                 is_available = $11 \
             WHERE id = $1 \
             RETURNING {SUPPLEMENT_COLUMNS}"
        ))
        .bind(supplement.id)
        .bind(&supplement.name)
        .bind(&supplement.description)
        .bind(supplement.price)
        .bind(&supplement.image_url)
        .bind(&supplement.category)
        .bind(&supplement.brand)
        .bind(supplement.stock_quantity)
        .bind(&supplement.usage_instructions)
        .bind(&supplement.benefits)
        .bind(supplement.is_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        row.map(Supplement::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("supplement {}", supplement.id)))
    }
}
