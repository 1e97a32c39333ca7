//! License activation endpoint
//!
//! POST /verify — first-use activation and re-verification. On success a
//! fresh 24h session credential is issued; re-verification of an already
//! activated license is idempotent and writes nothing to the store.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::auth::session;
use crate::db::License;
use crate::error::ServiceResult;
use crate::license::duration::parse_plan_duration;
use crate::license::policy::{self, Access, DenyReason};
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: Option<String>,
    pub license_key: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub token: String,
}

pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<VerifyResponse> {
    let email = required_field(req.email.as_deref(), "email")?.to_lowercase();
    let license_key = required_field(req.license_key.as_deref(), "license_key")?;

    // Absence is reported uniformly, never distinguishing wrong email from
    // wrong key.
    let license = state
        .store
        .find_by_credentials(&email, license_key)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LicenseNotFound))?;

    let now = now_millis();
    check_access(&state, &license, now).await?;

    let license = if license.is_used {
        // Already activated: expires_at is never re-derived
        license
    } else {
        first_activation(&state, license, now).await?
    };

    let token =
        session::create_token(&license.id, &license.email, &state.jwt_secret).map_err(|e| {
            tracing::error!("Session token creation failed: {e}");
            AppError::internal("Failed to issue session token")
        })?;

    Ok(Json(VerifyResponse {
        success: true,
        token,
    }))
}

/// First activation: derive expires_at from the plan duration and claim the
/// record with a conditional update.
async fn first_activation(state: &AppState, license: License, now: i64) -> ServiceResult<License> {
    let expires_at = now.saturating_add(parse_plan_duration(Some(&license.plan_duration)));

    if state.store.activate(&license.id, expires_at).await? {
        return Ok(License {
            is_used: true,
            expires_at: Some(expires_at),
            status: "active".to_string(),
            ..license
        });
    }

    // Guard missed: a concurrent verify won the first-activation race. The
    // winner's expiry stands; re-read and proceed as an already-activated
    // license.
    tracing::info!(license_id = %license.id, "Concurrent first activation, re-reading record");
    let current = state
        .store
        .find_by_id(&license.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ActivationFailed))?;
    check_access(state, &current, now).await?;
    Ok(current)
}

/// Evaluate live license state and apply any pending lazy transition.
async fn check_access(state: &AppState, license: &License, now: i64) -> ServiceResult<()> {
    let eval = policy::evaluate(license, now);
    if let Some(pending) = &eval.pending {
        super::apply_pending(state, pending).await;
    }
    match eval.access {
        Access::Granted => Ok(()),
        Access::Denied(DenyReason::Revoked) => {
            Err(AppError::new(ErrorCode::LicenseRevoked).into())
        }
        Access::Denied(DenyReason::Expired) => {
            Err(AppError::new(ErrorCode::LicenseExpired).into())
        }
    }
}

fn required_field<'a>(value: Option<&'a str>, name: &str) -> ServiceResult<&'a str> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::required_field(name).into())
}
