//! License status values

/// Lifecycle status of a license record
///
/// Transitions: `Active → Expired` (time-based, detected lazily),
/// `Active ↔ Revoked/Suspended` (external admin action). `Expired` never
/// reverses to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Active,
    Expired,
    Revoked,
    Suspended,
}

impl LicenseStatus {
    /// Parse a status string from the store; unknown values yield None
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "revoked" => Some(Self::Revoked),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }

    /// Store representation of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Suspended => "suspended",
        }
    }

    /// Revoked and suspended licenses are blocked outright, regardless of
    /// expiry or activation state.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Revoked | Self::Suspended)
    }
}
