//! Plan duration parsing
//!
//! Converts the human-readable `plan_duration` string ("30 days", "2 hours")
//! into a millisecond offset. Only the first `<integer> <unit>` pair is
//! honored; compound durations ("1 day 2 hours") are deliberately not
//! supported.

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Fallback when the input is null, "null" or unparseable
pub const DEFAULT_DURATION_MS: i64 = 30 * DAY_MS;

/// Plan duration applied when a new license omits one
pub const DEFAULT_PLAN_DURATION: &str = "30 days";

/// Recognized units; plural forms match because the name is a token prefix
const UNITS: [(&str, i64); 4] = [
    ("day", DAY_MS),
    ("hour", HOUR_MS),
    ("minute", MINUTE_MS),
    ("second", SECOND_MS),
];

/// Parse a plan duration string into milliseconds.
///
/// Scans for the first integer that is followed (after optional whitespace)
/// by a recognized unit, case-insensitive. Everything else falls back to 30
/// days.
pub fn parse_plan_duration(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_DURATION_MS;
    };
    if raw.trim().eq_ignore_ascii_case("null") {
        return DEFAULT_DURATION_MS;
    }

    let lower = raw.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let Ok(quantity) = lower[start..i].parse::<i64>() else {
                continue;
            };
            let rest = lower[i..].trim_start();
            if let Some((_, unit_ms)) = UNITS.iter().find(|(name, _)| rest.starts_with(name)) {
                // Quantities large enough to overflow i64 millis are treated
                // as unparseable, like any other nonsense input
                return quantity
                    .checked_mul(*unit_ms)
                    .unwrap_or(DEFAULT_DURATION_MS);
            }
            // Quantity without a unit: keep scanning for a later pair
        } else {
            i += 1;
        }
    }

    DEFAULT_DURATION_MS
}
