//! Postgres persistence.
//!
//! ## Tables
//!
//! - `users` - credentials and profile fields
//! - `supplements` - catalog rows (soft-deleted via `is_available`)
//!
//! Migrations live in `crates/gym-api/migrations/` and run at startup.
//! Queries are built at runtime with `sqlx::query_as`, so the crate builds
//! without a live database.

pub mod supplements;
pub mod users;

pub use supplements::PgSupplementRepository;
pub use users::PgUserRepository;

use gym_core::RepositoryError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Create a Postgres connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a sqlx failure onto the repository taxonomy.
pub(crate) fn repository_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.message().to_string())
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound(err.to_string()),
        _ => RepositoryError::Backend(err.to_string()),
    }
}
