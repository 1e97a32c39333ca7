//! Application state for license-server

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{LicenseStore, licenses::PgLicenseStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Constructed once at startup and passed explicitly to each handler.
/// No other in-process mutable state exists; durability and mutual
/// exclusion on license records are delegated to the store.
#[derive(Clone)]
pub struct AppState {
    /// License store (PostgreSQL in production, in-memory fake in tests)
    pub store: Arc<dyn LicenseStore>,
    /// Signing secret for session credentials
    pub jwt_secret: String,
    /// Administrative secret for /generate
    pub admin_secret: String,
}

impl AppState {
    /// Create a new AppState backed by the PostgreSQL license store
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("License store ready");

        Ok(Self::with_store(
            Arc::new(PgLicenseStore::new(pool)),
            &config.jwt_secret,
            &config.admin_secret,
        ))
    }

    /// Create an AppState around an arbitrary store implementation
    pub fn with_store(
        store: Arc<dyn LicenseStore>,
        jwt_secret: impl Into<String>,
        admin_secret: impl Into<String>,
    ) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
            admin_secret: admin_secret.into(),
        }
    }
}
