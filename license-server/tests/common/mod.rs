//! Shared test fixtures: in-memory license store and request helpers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use license_server::db::{License, LicenseStore, NewLicense, StoreError, StoreResult};
use license_server::license::LicenseStatus;
use license_server::state::AppState;

pub const JWT_SECRET: &str = "integration-test-jwt-secret-0123456789";
pub const ADMIN_SECRET: &str = "integration-test-admin-secret";

/// In-memory implementation of the license store interface
#[derive(Default)]
pub struct MemoryStore {
    licenses: Mutex<HashMap<String, License>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, license: License) {
        self.licenses
            .lock()
            .unwrap()
            .insert(license.id.clone(), license);
    }

    pub fn get(&self, id: &str) -> Option<License> {
        self.licenses.lock().unwrap().get(id).cloned()
    }

    pub fn set_status(&self, id: &str, status: &str) {
        let mut licenses = self.licenses.lock().unwrap();
        licenses.get_mut(id).unwrap().status = status.to_string();
    }

    pub fn set_expires_at(&self, id: &str, expires_at: i64) {
        let mut licenses = self.licenses.lock().unwrap();
        licenses.get_mut(id).unwrap().expires_at = Some(expires_at);
    }
}

#[async_trait]
impl LicenseStore for MemoryStore {
    async fn find_by_credentials(
        &self,
        email: &str,
        license_key: &str,
    ) -> StoreResult<Option<License>> {
        Ok(self
            .licenses
            .lock()
            .unwrap()
            .values()
            .find(|l| l.email == email && l.license_key == license_key)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<License>> {
        Ok(self.licenses.lock().unwrap().get(id).cloned())
    }

    async fn update_status(&self, id: &str, status: LicenseStatus) -> StoreResult<()> {
        if let Some(license) = self.licenses.lock().unwrap().get_mut(id) {
            license.status = status.as_str().to_string();
        }
        Ok(())
    }

    async fn activate(&self, id: &str, expires_at: i64) -> StoreResult<bool> {
        let mut licenses = self.licenses.lock().unwrap();
        match licenses.get_mut(id) {
            Some(license) if !license.is_used => {
                license.is_used = true;
                license.expires_at = Some(expires_at);
                license.status = "active".to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert(&self, license: NewLicense) -> StoreResult<License> {
        let mut licenses = self.licenses.lock().unwrap();
        let duplicate = licenses
            .values()
            .any(|l| l.email == license.email && l.license_key == license.license_key);
        if duplicate {
            return Err(StoreError(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let created = License {
            id: license.id.clone(),
            email: license.email,
            license_key: license.license_key,
            plan_duration: license.plan_duration,
            status: "active".to_string(),
            is_used: false,
            expires_at: None,
            created_at: license.created_at,
        };
        licenses.insert(license.id, created.clone());
        Ok(created)
    }
}

/// A never-activated license record ready for seeding
pub fn unused_license(id: &str, email: &str, key: &str, plan: &str) -> License {
    License {
        id: id.to_string(),
        email: email.to_string(),
        license_key: key.to_string(),
        plan_duration: plan.to_string(),
        status: "active".to_string(),
        is_used: false,
        expires_at: None,
        created_at: shared::util::now_millis(),
    }
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::with_store(store, JWT_SECRET, ADMIN_SECRET)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_bearer(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Drive one request through the router, returning status and JSON body
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
