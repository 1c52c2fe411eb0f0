//! Primitive field parsers over raw JSON payloads
//!
//! Every parser returns `Result<T, String>`; the message is attached to
//! a field path by the caller through `Violations::check`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use common::{ValidationError, ValidationResult};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Raw JSON object handed in by the web layer
pub type Object = Map<String, Value>;

pub const FIELD_REQUIRED: &str = "Field required";

/// Borrow the payload as an object, rejecting any other JSON shape
pub fn as_object(payload: &Value) -> ValidationResult<&Object> {
    payload.as_object().ok_or_else(|| {
        ValidationError::model(
            "Input should be a valid dictionary or object to extract fields from",
        )
    })
}

/// Value for `key`, which must be present (it may still be `null`)
pub fn required<'a>(object: &'a Object, key: &str) -> Result<&'a Value, String> {
    object.get(key).ok_or_else(|| FIELD_REQUIRED.to_string())
}

/// Value for `key`, with missing and `null` both treated as absent
pub fn optional<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

pub fn string(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| "Input should be a valid string".to_string())
}

pub fn required_str<'a>(object: &'a Object, key: &str) -> Result<&'a str, String> {
    required(object, key).and_then(string)
}

/// Check a length bound in characters, not bytes
pub fn length_between(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!(
            "String should have at least {} character{}",
            min,
            plural(min)
        ));
    }
    if len > max {
        return Err(format!(
            "String should have at most {} character{}",
            max,
            plural(max)
        ));
    }
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn uuid(value: &Value) -> Result<Uuid, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| "UUID input should be a string".to_string())?;
    Uuid::parse_str(raw).map_err(|e| format!("Input should be a valid UUID, {}", e))
}

pub fn boolean(value: &Value) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| "Input should be a valid boolean".to_string())
}

/// Any JSON number as `f64`; booleans are not numbers here
pub fn number(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| "Input should be a valid number".to_string()),
        _ => Err("Input should be a valid number".to_string()),
    }
}

/// Naive layouts accepted after RFC 3339, all read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// RFC 3339 timestamp, a naive datetime or a bare date (midnight), as UTC
pub fn timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| "Input should be a valid datetime".to_string())?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
        .map_err(|_| "Input should be a valid datetime".to_string())
}
