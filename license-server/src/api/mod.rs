//! API routes for license-server

pub mod generate;
pub mod health;
pub mod validate;
pub mod verify;

use axum::Router;
use axum::routing::{get, post};
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ServiceError;
use crate::license::policy::PendingTransition;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the service router
pub fn create_router(state: AppState) -> Router {
    // Browser clients call through tunneling proxies during development,
    // hence the bypass header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("ngrok-skip-browser-warning"),
        ]);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/verify", post(verify::verify))
        .route("/validate-token", get(validate::validate_token))
        .route("/generate", post(generate::generate))
        .layer(cors)
        .with_state(state)
}

/// Apply a lazy status transition discovered during a read.
///
/// Best-effort: a failed write leaves the stale status in place, to be
/// corrected on a subsequent check; the request outcome is unaffected.
pub(crate) async fn apply_pending(state: &AppState, pending: &PendingTransition) {
    if let Err(e) = state
        .store
        .update_status(&pending.license_id, pending.status)
        .await
    {
        tracing::warn!(
            license_id = %pending.license_id,
            error = %e,
            "Failed to persist lazy status transition"
        );
    }
}
