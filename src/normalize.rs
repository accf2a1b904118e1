// Best-effort adapter from raw API payloads to canonical records.
// Upstream field names vary by alias and casing; each canonical field probes an
// ordered alias list and falls back to a documented default. Never errors.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::models::{HealthCheckRecord, MonitoredTarget, TargetStatus};

/// Wrapping keys probed when an API response is an object rather than a bare array.
pub const RESPONSE_ARRAY_KEYS: &[&str] = &["data", "items", "urls", "logs", "results"];

const TARGET_ID_KEYS: &[&str] = &["id", "URLid", "urlId", "url_id", "targetId"];
const TARGET_NAME_KEYS: &[&str] = &["name", "label", "displayName"];
const TARGET_URL_KEYS: &[&str] = &["url", "endpoint", "address"];
const TARGET_EXPECTED_STATUS_KEYS: &[&str] = &["expectedStatusCode", "expectedStatus"];
const TARGET_TIMEOUT_KEYS: &[&str] = &["timeoutSeconds", "timeout"];
const TARGET_MAX_LATENCY_KEYS: &[&str] = &["maxLatencyMs", "maxLatency"];
const TARGET_ENABLED_KEYS: &[&str] = &["enabled", "active"];
const TARGET_STATUS_KEYS: &[&str] = &["status", "state"];
const TARGET_RESPONSE_TIME_KEYS: &[&str] = &["responseTime", "responseTimeMs", "latencyMs"];
const TARGET_UPTIME_KEYS: &[&str] = &["uptime", "uptimePercent"];
const TARGET_LAST_CHECK_KEYS: &[&str] = &["lastCheck", "lastChecked", "lastCheckedAt"];

const CHECK_TARGET_ID_KEYS: &[&str] = &["targetId", "URLid", "urlId", "url_id", "id"];
const CHECK_TIMESTAMP_KEYS: &[&str] = &["timestamp", "Timestamp", "checkedAt", "time"];
const CHECK_RESPONSE_TIME_KEYS: &[&str] = &["responseTimeMs", "responseTime", "latencyMs"];
const CHECK_STATUS_CODE_KEYS: &[&str] = &["statusCode", "httpStatus", "code"];
const CHECK_IS_UP_KEYS: &[&str] = &["isUp", "up", "success"];
const CHECK_IS_SLOW_KEYS: &[&str] = &["isSlow", "slow"];
const CHECK_ERROR_KEYS: &[&str] = &["errorMessage", "errorMsg", "error"];

/// Flattens a decoded API response into a record array. Handles a bare array,
/// an object wrapping the array under one of `candidate_keys`, and a single
/// bare record (wrapped in a one-element vec). Anything else yields empty.
pub fn extract_record_array(response: &Value, candidate_keys: &[&str]) -> Vec<Value> {
    match response {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            for key in candidate_keys {
                if let Some(Value::Array(items)) = map.get(*key) {
                    return items.clone();
                }
            }
            vec![response.clone()]
        }
        _ => Vec::new(),
    }
}

/// Maps a raw target payload to the canonical shape, defaulting per field.
pub fn normalize_target(raw: &Value) -> MonitoredTarget {
    MonitoredTarget {
        id: pick_string(raw, TARGET_ID_KEYS).unwrap_or_default(),
        name: pick_string(raw, TARGET_NAME_KEYS).unwrap_or_else(|| "Unnamed URL".into()),
        url: pick_string(raw, TARGET_URL_KEYS).unwrap_or_default(),
        expected_status_code: pick_i64(raw, TARGET_EXPECTED_STATUS_KEYS).unwrap_or(200),
        timeout_seconds: pick_i64(raw, TARGET_TIMEOUT_KEYS).unwrap_or(5),
        max_latency_ms: pick_i64(raw, TARGET_MAX_LATENCY_KEYS).unwrap_or(0),
        enabled: pick_bool(raw, TARGET_ENABLED_KEYS).unwrap_or(true),
        status: pick_string(raw, TARGET_STATUS_KEYS)
            .map(|s| TargetStatus::from_api(&s))
            .unwrap_or(TargetStatus::Unknown),
        last_response_time_ms: pick_i64(raw, TARGET_RESPONSE_TIME_KEYS).unwrap_or(0).max(0),
        uptime_percent: pick_f64(raw, TARGET_UPTIME_KEYS).unwrap_or(0.0),
        last_checked_at: pick_timestamp(raw, TARGET_LAST_CHECK_KEYS),
    }
}

/// Maps a raw log row to a canonical health-check record. `is_slow` is taken
/// from the payload when present; otherwise it falls back to comparing the
/// response time against `slow_threshold_ms` (false when no threshold is known).
pub fn normalize_health_check(raw: &Value, slow_threshold_ms: Option<i64>) -> HealthCheckRecord {
    let response_time_ms = pick_i64(raw, CHECK_RESPONSE_TIME_KEYS).unwrap_or(0).max(0);
    let is_slow = pick_bool(raw, CHECK_IS_SLOW_KEYS).unwrap_or_else(|| {
        slow_threshold_ms.is_some_and(|limit| limit > 0 && response_time_ms > limit)
    });
    HealthCheckRecord {
        target_id: pick_string(raw, CHECK_TARGET_ID_KEYS).unwrap_or_default(),
        timestamp: pick_timestamp(raw, CHECK_TIMESTAMP_KEYS)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        response_time_ms,
        status_code: pick_i64(raw, CHECK_STATUS_CODE_KEYS),
        is_up: pick_bool(raw, CHECK_IS_UP_KEYS).unwrap_or(true),
        is_slow,
        error_message: pick_string(raw, CHECK_ERROR_KEYS).filter(|s| !s.is_empty()),
    }
}

/// First present alias, exact match first, then case-insensitive.
fn pick<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = raw.as_object()?;
    for key in keys {
        if let Some(v) = map.get(*key) {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    for key in keys {
        if let Some((_, v)) = map.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    None
}

// The upstream store is stringly typed in places: ids may arrive as numbers,
// numerics as quoted strings, booleans as 0/1. Coerce leniently.

fn pick_string(raw: &Value, keys: &[&str]) -> Option<String> {
    match pick(raw, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_i64(raw: &Value, keys: &[&str]) -> Option<i64> {
    match pick(raw, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

fn pick_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    match pick(raw, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn pick_bool(raw: &Value, keys: &[&str]) -> Option<bool> {
    match pick(raw, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// ISO-8601 string or epoch milliseconds. Sentinel strings like "Never" parse
/// to None rather than an error.
fn pick_timestamp(raw: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    match pick(raw, keys)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}
