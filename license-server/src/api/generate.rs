//! Administrative license generation endpoint
//!
//! POST /generate — creates a new license record. Guarded by the configured
//! administrative secret; not a user-facing endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::db::{License, NewLicense};
use crate::license::duration::DEFAULT_PLAN_DURATION;
use crate::license::keygen::generate_license_key;
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub email: Option<String>,
    pub plan_duration: Option<String>,
    pub admin_secret: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub license: License,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<GenerateResponse> {
    // Mismatch is terminal, not retried
    if req.admin_secret.as_deref() != Some(state.admin_secret.as_str()) {
        return Err(AppError::new(ErrorCode::AdminSecretInvalid).into());
    }

    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::required_field("email"))?
        .to_lowercase();

    let plan_duration = req
        .plan_duration
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PLAN_DURATION.to_string());

    let license = state
        .store
        .insert(NewLicense {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            license_key: generate_license_key(),
            plan_duration,
            created_at: now_millis(),
        })
        .await
        .map_err(|e| {
            // Admin-only endpoint: the store message is surfaced to the
            // caller (uniqueness violations included)
            tracing::error!("License insert failed: {e}");
            AppError::database(e.to_string())
        })?;

    Ok(Json(GenerateResponse {
        success: true,
        license,
    }))
}
