//! PostgreSQL implementation of the license store

use async_trait::async_trait;
use sqlx::PgPool;

use super::{License, LicenseStore, NewLicense, StoreResult};
use crate::license::LicenseStatus;

/// License store backed by a PostgreSQL connection pool
pub struct PgLicenseStore {
    pool: PgPool,
}

impl PgLicenseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LicenseStore for PgLicenseStore {
    async fn find_by_credentials(
        &self,
        email: &str,
        license_key: &str,
    ) -> StoreResult<Option<License>> {
        let license = sqlx::query_as::<_, License>(
            "SELECT id, email, license_key, plan_duration, status,
                is_used, expires_at, created_at
                FROM licenses
                WHERE email = $1 AND license_key = $2",
        )
        .bind(email)
        .bind(license_key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(license)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<License>> {
        let license = sqlx::query_as::<_, License>(
            "SELECT id, email, license_key, plan_duration, status,
                is_used, expires_at, created_at
                FROM licenses
                WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(license)
    }

    async fn update_status(&self, id: &str, status: LicenseStatus) -> StoreResult<()> {
        sqlx::query("UPDATE licenses SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn activate(&self, id: &str, expires_at: i64) -> StoreResult<bool> {
        // The is_used guard makes first activation single-shot even under
        // concurrent verifies on the same never-used license.
        let result = sqlx::query(
            "UPDATE licenses
                SET is_used = TRUE, expires_at = $1, status = 'active'
                WHERE id = $2 AND is_used = FALSE",
        )
        .bind(expires_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert(&self, license: NewLicense) -> StoreResult<License> {
        let created = sqlx::query_as::<_, License>(
            "INSERT INTO licenses
                (id, email, license_key, plan_duration, status, is_used, expires_at, created_at)
                VALUES ($1, $2, $3, $4, 'active', FALSE, NULL, $5)
                RETURNING id, email, license_key, plan_duration, status,
                    is_used, expires_at, created_at",
        )
        .bind(&license.id)
        .bind(&license.email)
        .bind(&license.license_key)
        .bind(&license.plan_duration)
        .bind(license.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}
