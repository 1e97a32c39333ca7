//! Session heartbeat endpoint
//!
//! GET /validate-token — revalidates an existing session credential against
//! live license state. The store is the source of truth, not the
//! credential's claims, so revocation and expiry propagate to clients
//! within the credential's own 24h window. No new credential is issued
//! here.

use axum::{Json, extract::State};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use shared::util::now_millis;

use crate::auth::session;
use crate::error::ServiceError;
use crate::license::policy::{self, Access, DenyReason};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

fn denied(status: StatusCode, reason: &'static str) -> (StatusCode, Json<ValidateResponse>) {
    (
        status,
        Json(ValidateResponse {
            valid: false,
            reason: Some(reason),
        }),
    )
}

pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ValidateResponse>), ServiceError> {
    let Some(token) = session::bearer_token(&headers) else {
        return Ok(denied(StatusCode::UNAUTHORIZED, "NO_TOKEN"));
    };

    let claims = match session::verify_token(token, &state.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Session credential rejected: {e}");
            return Ok(denied(StatusCode::UNAUTHORIZED, "INVALID_SESSION"));
        }
    };

    let Some(license) = state.store.find_by_id(&claims.sub).await? else {
        return Ok(denied(StatusCode::UNAUTHORIZED, "NOT_FOUND"));
    };

    let eval = policy::evaluate(&license, now_millis());
    if let Some(pending) = &eval.pending {
        super::apply_pending(&state, pending).await;
    }

    match eval.access {
        Access::Granted => Ok((
            StatusCode::OK,
            Json(ValidateResponse {
                valid: true,
                reason: None,
            }),
        )),
        Access::Denied(DenyReason::Revoked) => Ok(denied(StatusCode::FORBIDDEN, "REVOKED")),
        Access::Denied(DenyReason::Expired) => Ok(denied(StatusCode::UNAUTHORIZED, "EXPIRED")),
    }
}
