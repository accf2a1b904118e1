// Incident derivation: failing health-check records -> alert entries.
// Pure over its inputs; recomputing from the same records yields the same list.

use std::collections::HashMap;

use crate::models::{HealthCheckRecord, Incident, MonitoredTarget, Severity};

fn is_client_or_server_error(status_code: Option<i64>) -> bool {
    status_code.is_some_and(|code| code >= 400)
}

/// A record qualifies when the check was down, slow, or returned a 4xx/5xx.
pub fn qualifies(record: &HealthCheckRecord) -> bool {
    !record.is_up || record.is_slow || is_client_or_server_error(record.status_code)
}

fn severity_for(record: &HealthCheckRecord) -> Severity {
    if !record.is_up {
        Severity::Critical
    } else if record.is_slow || is_client_or_server_error(record.status_code) {
        Severity::Warning
    } else {
        Severity::Info
    }
}

/// Description priority: backend error message, then slowness vs the configured
/// threshold, then the HTTP status encountered.
fn describe(record: &HealthCheckRecord, target: Option<&MonitoredTarget>) -> String {
    if let Some(msg) = &record.error_message {
        return msg.clone();
    }
    if record.is_slow {
        let threshold = target.map(|t| t.max_latency_ms).unwrap_or(0);
        if threshold > 0 {
            return format!(
                "Response time {} ms exceeded the {} ms threshold",
                record.response_time_ms, threshold
            );
        }
        return format!("Slow response: {} ms", record.response_time_ms);
    }
    match record.status_code {
        Some(code) => format!("Check returned HTTP {code}"),
        None => "Check failed with no status code".to_string(),
    }
}

/// Scans `records` for failure conditions and synthesizes incidents, newest
/// first (stable for equal timestamps). A target id missing from `targets_by_id`
/// falls back to the raw id as the display name and an empty URL; never fails.
pub fn derive_incidents(
    records: &[HealthCheckRecord],
    targets_by_id: &HashMap<String, MonitoredTarget>,
) -> Vec<Incident> {
    let mut incidents: Vec<Incident> = records
        .iter()
        .filter(|r| qualifies(r))
        .enumerate()
        .map(|(ordinal, record)| {
            let target = targets_by_id.get(&record.target_id);
            Incident {
                id: format!(
                    "{}-{}-{}",
                    record.target_id,
                    record.timestamp.timestamp_millis(),
                    ordinal
                ),
                target_id: record.target_id.clone(),
                target_name: target
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| record.target_id.clone()),
                target_url: target.map(|t| t.url.clone()).unwrap_or_default(),
                severity: severity_for(record),
                timestamp: record.timestamp,
                description: describe(record, target),
                status_code: record.status_code,
                response_time_ms: record.response_time_ms,
                error_message: record.error_message.clone(),
            }
        })
        .collect();

    // sort_by is stable, so ties keep their relative input order
    incidents.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    incidents
}
