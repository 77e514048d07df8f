//! # Application State
//!
//! Shared state for the Axum application: the three services, upload
//! storage and the configuration they were built from.

use crate::config::AppConfig;
use crate::db::{self, PgSupplementRepository, PgUserRepository};
use crate::security::{Argon2PasswordEncoder, JwtTokenIssuer};
use crate::storage::UploadStore;
use anyhow::Context;
use gym_core::{
    AuthService, BoxedPaymentGateway, BoxedSupplementRepository, BoxedUserRepository,
    CatalogService, CheckoutOrchestrator, InMemorySupplementRepository, InMemoryUserRepository,
    PasswordEncoder, TokenIssuer,
};
use gym_stripe::StripeCheckoutGateway;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub checkout: CheckoutOrchestrator,
    pub catalog: CatalogService,
    pub auth: AuthService,
    pub uploads: UploadStore,
    /// Application config
    pub config: AppConfig,
}

/// Collaborators the services are built from.
pub struct Components {
    pub gateway: BoxedPaymentGateway,
    pub supplements: BoxedSupplementRepository,
    pub users: BoxedUserRepository,
    pub encoder: Arc<dyn PasswordEncoder>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub uploads: UploadStore,
}

impl AppState {
    /// Build production state: Stripe, Postgres (when configured), JWT,
    /// Argon2 and S3 uploads.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let gateway = StripeCheckoutGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let (supplements, users) = load_repositories(&config).await?;

        let uploads = UploadStore::from_config(&config.storage)
            .context("Failed to initialize upload storage")?;

        let components = Components {
            gateway: Arc::new(gateway),
            supplements,
            users,
            encoder: Arc::new(Argon2PasswordEncoder::new()),
            tokens: Arc::new(JwtTokenIssuer::new(&config.jwt)),
            uploads,
        };

        Ok(Self::from_components(config, components))
    }

    /// Wire the services from explicit collaborators.
    pub fn from_components(config: AppConfig, components: Components) -> Self {
        let Components {
            gateway,
            supplements,
            users,
            encoder,
            tokens,
            uploads,
        } = components;

        Self {
            checkout: CheckoutOrchestrator::new(gateway, config.checkout_urls.clone()),
            catalog: CatalogService::new(supplements),
            auth: AuthService::with_password_login(users, encoder, tokens),
            uploads,
            config,
        }
    }
}

/// Postgres repositories when `DATABASE_URL` is set, in-memory otherwise.
async fn load_repositories(
    config: &AppConfig,
) -> anyhow::Result<(BoxedSupplementRepository, BoxedUserRepository)> {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .context("Failed to connect to Postgres")?;
            db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Connected to Postgres, migrations applied");

            Ok((
                Arc::new(PgSupplementRepository::new(pool.clone())),
                Arc::new(PgUserRepository::new(pool)),
            ))
        }
        None if config.is_production() => {
            anyhow::bail!("DATABASE_URL must be set in production")
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory stores");
            Ok((
                Arc::new(InMemorySupplementRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
            ))
        }
    }
}
