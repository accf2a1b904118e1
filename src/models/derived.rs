// Derived, ephemeral views: chart buckets, incidents, summary stats and the
// full per-refresh snapshot. Recomputed from scratch on every fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MonitoredTarget;

/// One point in a response-time chart series. Metrics are None when no
/// records fell into the bucket (the chart shows a gap, not a zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub bucket_start: DateTime<Utc>,
    pub average_response_time_ms: Option<i64>,
    pub max_response_time_ms: Option<i64>,
    pub sample_count: u32,
}

/// Incident severity; serializes to lowercase JSON (e.g. "critical").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// A synthesized alert derived from one failing health-check record.
/// Not a backend entity; the id is deterministic within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub target_id: String,
    pub target_name: String,
    pub target_url: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub status_code: Option<i64>,
    pub response_time_ms: i64,
    pub error_message: Option<String>,
}

/// At-a-glance scalar stats over the current target set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_count: u32,
    pub active_count: u32,
    pub down_count: u32,
    pub warning_count: u32,
    pub average_response_time_ms: i64,
    /// Share of targets currently Up, rounded to one decimal.
    pub active_percent: f64,
}

/// Everything one refresh produced. Consumers replace their displayed state
/// wholesale with each snapshot; on a failed refresh the previous one stays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub targets: Vec<MonitoredTarget>,
    pub summary: SummaryStats,
    pub series: Vec<TimeBucket>,
    pub incidents: Vec<Incident>,
    /// Targets whose log fetch failed this round and contributed no records.
    pub failed_target_ids: Vec<String>,
}
