//! Small shared utilities

/// Current wall-clock time as Unix milliseconds.
///
/// All timestamps in the license store (`created_at`, `expires_at`) use this
/// representation.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
