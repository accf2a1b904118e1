// Normalizer tests: alias probing, defaults, response-shape extraction

use serde_json::json;
use uptimedeck::models::TargetStatus;
use uptimedeck::normalize::{
    RESPONSE_ARRAY_KEYS, extract_record_array, normalize_health_check, normalize_target,
};

#[test]
fn extract_record_array_handles_bare_array() {
    let body = json!([{"id": "a"}, {"id": "b"}]);
    let records = extract_record_array(&body, RESPONSE_ARRAY_KEYS);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "a");
}

#[test]
fn extract_record_array_handles_wrapped_object() {
    for key in ["data", "items", "urls"] {
        let body = json!({ key: [{"id": "a"}, {"id": "b"}] });
        let records = extract_record_array(&body, RESPONSE_ARRAY_KEYS);
        assert_eq!(records.len(), 2, "wrapping key {key}");
        assert_eq!(records[1]["id"], "b");
    }
}

#[test]
fn extract_record_array_wraps_single_bare_record() {
    let body = json!({"foo": 1});
    let records = extract_record_array(&body, RESPONSE_ARRAY_KEYS);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["foo"], 1);
}

#[test]
fn extract_record_array_non_object_yields_empty() {
    assert!(extract_record_array(&json!(42), RESPONSE_ARRAY_KEYS).is_empty());
    assert!(extract_record_array(&json!(null), RESPONSE_ARRAY_KEYS).is_empty());
}

#[test]
fn normalize_target_empty_object_gets_defaults() {
    let t = normalize_target(&json!({}));
    assert_eq!(t.id, "");
    assert_eq!(t.name, "Unnamed URL");
    assert_eq!(t.url, "");
    assert_eq!(t.expected_status_code, 200);
    assert_eq!(t.timeout_seconds, 5);
    assert_eq!(t.max_latency_ms, 0);
    assert!(t.enabled);
    assert_eq!(t.status, TargetStatus::Unknown);
    assert_eq!(t.last_response_time_ms, 0);
    assert_eq!(t.uptime_percent, 0.0);
    assert!(t.last_checked_at.is_none());
}

#[test]
fn normalize_target_probes_id_aliases_in_order() {
    let t = normalize_target(&json!({"URLid": "from-urlid"}));
    assert_eq!(t.id, "from-urlid");

    // "id" wins over the domain-specific alias when both are present
    let t = normalize_target(&json!({"id": "canonical", "URLid": "alias"}));
    assert_eq!(t.id, "canonical");
}

#[test]
fn normalize_target_coerces_stringly_typed_fields() {
    let t = normalize_target(&json!({
        "id": 42,
        "responseTime": "123",
        "uptime": "99.5",
        "enabled": "false",
        "status": "up"
    }));
    assert_eq!(t.id, "42");
    assert_eq!(t.last_response_time_ms, 123);
    assert_eq!(t.uptime_percent, 99.5);
    assert!(!t.enabled);
    assert_eq!(t.status, TargetStatus::Up);
}

#[test]
fn normalize_target_full_payload() {
    let t = normalize_target(&json!({
        "id": "u1",
        "name": "API health",
        "url": "https://api.example.com/health",
        "expectedStatus": 204,
        "timeoutSeconds": 10,
        "maxLatencyMs": 3000,
        "enabled": true,
        "status": "Warning",
        "responseTime": 812,
        "uptime": 97.3,
        "lastCheck": "2024-01-02T00:00:00Z"
    }));
    assert_eq!(t.name, "API health");
    assert_eq!(t.expected_status_code, 204);
    assert_eq!(t.max_latency_ms, 3000);
    assert_eq!(t.status, TargetStatus::Warning);
    assert!(t.last_checked_at.is_some());
}

#[test]
fn normalize_health_check_empty_object_gets_defaults() {
    let r = normalize_health_check(&json!({}), None);
    assert_eq!(r.target_id, "");
    assert_eq!(r.timestamp.timestamp_millis(), 0);
    assert_eq!(r.response_time_ms, 0);
    assert!(r.status_code.is_none());
    assert!(r.is_up);
    assert!(!r.is_slow);
    assert!(r.error_message.is_none());
}

#[test]
fn normalize_health_check_response_time_aliases() {
    for key in ["responseTimeMs", "responseTime", "latencyMs"] {
        let r = normalize_health_check(&json!({ key: 450 }), None);
        assert_eq!(r.response_time_ms, 450, "alias {key}");
    }
}

#[test]
fn normalize_health_check_backend_is_slow_wins_over_threshold() {
    let r = normalize_health_check(
        &json!({"responseTimeMs": 5000, "isSlow": false}),
        Some(1000),
    );
    assert!(!r.is_slow);
}

#[test]
fn normalize_health_check_slow_fallback_from_threshold() {
    let r = normalize_health_check(&json!({"responseTimeMs": 5000}), Some(1000));
    assert!(r.is_slow);

    let r = normalize_health_check(&json!({"responseTimeMs": 500}), Some(1000));
    assert!(!r.is_slow);

    // No threshold known: never inferred slow
    let r = normalize_health_check(&json!({"responseTimeMs": 99999}), None);
    assert!(!r.is_slow);
}

#[test]
fn normalize_health_check_epoch_millis_timestamp() {
    let r = normalize_health_check(&json!({"timestamp": 1704153600000i64}), None);
    assert_eq!(r.timestamp.timestamp_millis(), 1_704_153_600_000);
}

#[test]
fn normalize_health_check_negative_response_time_clamped() {
    let r = normalize_health_check(&json!({"responseTime": -5}), None);
    assert_eq!(r.response_time_ms, 0);
}

#[test]
fn normalize_health_check_empty_error_message_treated_as_absent() {
    let r = normalize_health_check(&json!({"errorMsg": ""}), None);
    assert!(r.error_message.is_none());

    let r = normalize_health_check(&json!({"errorMsg": "connect timeout"}), None);
    assert_eq!(r.error_message.as_deref(), Some("connect timeout"));
}

#[test]
fn normalize_probes_case_insensitively_as_fallback() {
    let r = normalize_health_check(&json!({"Timestamp": "2024-01-01T00:00:00Z"}), None);
    assert_eq!(r.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");

    let t = normalize_target(&json!({"Name": "cased"}));
    assert_eq!(t.name, "cased");
}
