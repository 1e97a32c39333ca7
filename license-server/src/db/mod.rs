//! License store access layer
//!
//! The store is an external collaborator; the select-then-conditionally-update
//! access pattern is expressed as the [`LicenseStore`] trait so the handler
//! logic can be tested against an in-memory fake implementing the same
//! interface.

pub mod licenses;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::license::LicenseStatus;

/// A durable license record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct License {
    pub id: String,
    /// Owner identifier
    pub email: String,
    /// Opaque secret, unique per email
    pub license_key: String,
    /// Human-readable duration string (e.g. "30 days"), immutable after creation
    pub plan_duration: String,
    /// active | expired | revoked | suspended
    pub status: String,
    /// False until first successful activation; never reverts
    pub is_used: bool,
    /// Absolute expiry in Unix millis; set exactly once, at first activation
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

/// Fields for a new license record
///
/// `status`, `is_used` and `expires_at` are fixed by the creation rules
/// (active, false, unset) and are not caller-supplied.
#[derive(Debug, Clone)]
pub struct NewLicense {
    pub id: String,
    pub email: String,
    pub license_key: String,
    pub plan_duration: String,
    pub created_at: i64,
}

/// Opaque store error; the underlying message is logged, never shown to
/// callers except on the admin-only generate path.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Query interface over the license store
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// Find the single record matching both email and license key
    async fn find_by_credentials(
        &self,
        email: &str,
        license_key: &str,
    ) -> StoreResult<Option<License>>;

    /// Find a record by unique id
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<License>>;

    /// Overwrite the status of a record (lazy expiry transitions)
    async fn update_status(&self, id: &str, status: LicenseStatus) -> StoreResult<()>;

    /// First-use activation: set `is_used`, `expires_at` and `status` in one
    /// conditional update guarded by `is_used = FALSE`. Returns false when
    /// the guard missed, i.e. a concurrent activation already claimed the
    /// record.
    async fn activate(&self, id: &str, expires_at: i64) -> StoreResult<bool>;

    /// Insert a new record with `is_used = false`, `status = 'active'` and
    /// `expires_at` unset; returns the created record.
    async fn insert(&self, license: NewLicense) -> StoreResult<License>;
}
