//! Rules for turning backend JSON values into display text.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::CommonError;

/// Display text for a scalar field.
///
/// Strings pass through, `null` becomes empty text, and numbers with an
/// integral value print without a fractional part, so `1.0` reads `"1"`.
pub fn display_scalar(key: &str, value: &Value) -> Result<String, CommonError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                Ok(format_number(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::Array(_) | Value::Object(_) => Err(CommonError::NonScalar(key.to_string())),
    }
}

/// Shortest text for a number, without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

const NAIVE_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Reformat a combined date-time as `"YYYY-MM-DD HH:MM:SS"`.
///
/// Accepts RFC 3339 as well as a date-time without offset. The wall-clock
/// time is kept as sent; fractional seconds are dropped.
pub fn split_timestamp(raw: &str) -> Result<String, CommonError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.format(DISPLAY_TIMESTAMP).to_string());
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP)
        .map(|ts| ts.format(DISPLAY_TIMESTAMP).to_string())
        .map_err(|e| CommonError::Timestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Parse the text of a position input.
pub fn parse_position(raw: &str) -> Result<f64, CommonError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommonError::InvalidNumber(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_timestamp_utc() {
        assert_eq!(
            split_timestamp("2024-01-02T03:04:05.000Z").unwrap(),
            "2024-01-02 03:04:05"
        );
    }

    #[test]
    fn test_split_timestamp_keeps_local_offset_wall_time() {
        assert_eq!(
            split_timestamp("2024-06-30T23:59:58.123456789+02:00").unwrap(),
            "2024-06-30 23:59:58"
        );
        assert_eq!(
            split_timestamp("2024-06-30T08:00:00-05:00").unwrap(),
            "2024-06-30 08:00:00"
        );
    }

    #[test]
    fn test_split_timestamp_without_offset() {
        assert_eq!(
            split_timestamp("2024-01-02T03:04:05.000").unwrap(),
            "2024-01-02 03:04:05"
        );
        assert_eq!(
            split_timestamp("2024-01-02T03:04:05").unwrap(),
            "2024-01-02 03:04:05"
        );
    }

    #[test]
    fn test_split_timestamp_rejects_garbage() {
        let err = split_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, CommonError::Timestamp { .. }));
    }

    #[test]
    fn test_display_scalar_numbers() {
        assert_eq!(display_scalar("a", &json!(42)).unwrap(), "42");
        assert_eq!(display_scalar("a", &json!(-7)).unwrap(), "-7");
        assert_eq!(display_scalar("a", &json!(1.0)).unwrap(), "1");
        assert_eq!(display_scalar("a", &json!(-0.0)).unwrap(), "0");
        assert_eq!(display_scalar("a", &json!(12.5)).unwrap(), "12.5");
        assert_eq!(display_scalar("a", &json!(0.1)).unwrap(), "0.1");
    }

    #[test]
    fn test_display_scalar_other_scalars() {
        assert_eq!(display_scalar("a", &json!("Ramp")).unwrap(), "Ramp");
        assert_eq!(display_scalar("a", &json!(true)).unwrap(), "true");
        assert_eq!(display_scalar("a", &Value::Null).unwrap(), "");
    }

    #[test]
    fn test_display_scalar_rejects_containers() {
        assert_eq!(
            display_scalar("tcp_config", &json!({"port": 4840})).unwrap_err(),
            CommonError::NonScalar("tcp_config".to_string())
        );
        assert!(display_scalar("urls", &json!(["a"])).is_err());
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("10").unwrap(), 10.0);
        assert_eq!(parse_position(" 2.5 ").unwrap(), 2.5);
        assert!(parse_position("").is_err());
        assert!(parse_position("inf").is_err());
    }
}
