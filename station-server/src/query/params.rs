//! Query-string parameter parsing.
//!
//! Parameters arrive as raw strings so that malformed values surface as
//! [`QueryError::InvalidParameter`] rather than framework rejections.

use super::error::QueryError;

/// Result count used when `n` is absent or unparsable.
pub const DEFAULT_COUNT: i64 = 5;

/// Parse a required finite coordinate in degrees.
pub fn parse_coordinate(name: &'static str, raw: Option<&str>) -> Result<f64, QueryError> {
    let raw = raw.ok_or(QueryError::InvalidParameter {
        name,
        reason: "missing (e.g. ?lat=51.1&lon=17.03)".to_string(),
    })?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::InvalidParameter {
            name,
            reason: format!("expected a number, got {raw:?}"),
        })
}

/// Parse the optional result count, falling back to [`DEFAULT_COUNT`].
pub fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_COUNT)
}

/// Parse a required station id. Range checks happen against the loaded layer.
pub fn parse_uid(name: &'static str, raw: Option<&str>) -> Result<i64, QueryError> {
    let raw = raw.ok_or(QueryError::InvalidParameter {
        name,
        reason: "missing (provide from and to as uid query params)".to_string(),
    })?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidParameter {
            name,
            reason: format!("expected an integer, got {raw:?}"),
        })
}
