//! Access evaluation against live license state
//!
//! Marking a license expired during a read is a side-effecting read; the
//! side effect is modeled explicitly as a pending write returned next to the
//! decision, so callers (and tests) can handle the two separately. The
//! pending write is best-effort: if it fails, the denial still stands and
//! the stale status is corrected on a later check.

use super::LicenseStatus;
use crate::db::License;

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Status is revoked or suspended
    Revoked,
    /// Past `expires_at`, or status already marked expired
    Expired,
}

/// Access decision for one license record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied(DenyReason),
}

/// A lazy status transition discovered during evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    pub license_id: String,
    pub status: LicenseStatus,
}

/// Result of evaluating a license: the decision plus an optional write the
/// caller should apply to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub access: Access,
    pub pending: Option<PendingTransition>,
}

/// Evaluate a license record at time `now` (Unix millis).
///
/// Revocation takes precedence over expiry. Expiry is detected lazily: a
/// record past its `expires_at` with a stale `active` status yields a
/// pending transition to `expired` alongside the denial.
pub fn evaluate(license: &License, now: i64) -> Evaluation {
    let status = LicenseStatus::from_db(&license.status);

    if status.is_some_and(|s| s.is_blocked()) {
        return Evaluation {
            access: Access::Denied(DenyReason::Revoked),
            pending: None,
        };
    }

    let already_expired = status == Some(LicenseStatus::Expired);
    let past_expiry = license.expires_at.is_some_and(|exp| exp <= now);

    if already_expired || past_expiry {
        let pending = (!already_expired).then(|| PendingTransition {
            license_id: license.id.clone(),
            status: LicenseStatus::Expired,
        });
        return Evaluation {
            access: Access::Denied(DenyReason::Expired),
            pending,
        };
    }

    Evaluation {
        access: Access::Granted,
        pending: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(status: &str, is_used: bool, expires_at: Option<i64>) -> License {
        License {
            id: "lic-1".to_string(),
            email: "a@b.com".to_string(),
            license_key: "PRO-AAAA-BBBB".to_string(),
            plan_duration: "30 days".to_string(),
            status: status.to_string(),
            is_used,
            expires_at,
            created_at: 0,
        }
    }

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_active_unexpired_granted() {
        let eval = evaluate(&license("active", true, Some(NOW + 1_000)), NOW);
        assert_eq!(eval.access, Access::Granted);
        assert!(eval.pending.is_none());
    }

    #[test]
    fn test_never_activated_granted() {
        // No expires_at yet; first activation happens elsewhere
        let eval = evaluate(&license("active", false, None), NOW);
        assert_eq!(eval.access, Access::Granted);
        assert!(eval.pending.is_none());
    }

    #[test]
    fn test_past_expiry_denied_with_pending_write() {
        let eval = evaluate(&license("active", true, Some(NOW - 1)), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Expired));
        let pending = eval.pending.expect("expected lazy transition");
        assert_eq!(pending.license_id, "lic-1");
        assert_eq!(pending.status, LicenseStatus::Expired);
    }

    #[test]
    fn test_already_expired_status_denied_without_pending_write() {
        // Status already persisted as expired: deny, nothing to write
        let eval = evaluate(&license("expired", true, Some(NOW + 1_000)), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Expired));
        assert!(eval.pending.is_none());
    }

    #[test]
    fn test_revoked_takes_precedence_over_expiry() {
        let eval = evaluate(&license("revoked", true, Some(NOW - 1)), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Revoked));
        assert!(eval.pending.is_none());

        // Revoked blocks even a fresh, unused license
        let eval = evaluate(&license("revoked", false, None), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Revoked));
    }

    #[test]
    fn test_suspended_denied_as_revoked() {
        let eval = evaluate(&license("suspended", true, Some(NOW + 1_000)), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Revoked));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let eval = evaluate(&license("active", true, Some(NOW)), NOW);
        assert_eq!(eval.access, Access::Denied(DenyReason::Expired));
    }
}
