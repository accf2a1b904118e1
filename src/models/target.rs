// Monitored target: one URL under observation plus its check configuration.
// Refreshed wholesale on every poll; never patched incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed target status; serializes with the upstream capitalization (e.g. "Up").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
    Up,
    Down,
    Warning,
    #[serde(other)]
    Unknown,
}

impl TargetStatus {
    /// Parse from an upstream status string (any casing). Unrecognized values map to Unknown.
    pub fn from_api(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "up" => TargetStatus::Up,
            "down" => TargetStatus::Down,
            "warning" => TargetStatus::Warning,
            _ => TargetStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredTarget {
    pub id: String,
    pub name: String,
    pub url: String,
    pub expected_status_code: i64,
    pub timeout_seconds: i64,
    pub max_latency_ms: i64,
    pub enabled: bool,
    pub status: TargetStatus,
    pub last_response_time_ms: i64,
    pub uptime_percent: f64,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Registration payload for POST /targets. Field names match the API's expected set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTarget {
    pub name: String,
    pub url: String,
    pub expected_status: i64,
    pub max_latency_ms: i64,
    pub timeout_seconds: i64,
}

/// Dashboard tab filters over the target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFilter {
    All,
    /// Targets currently Up.
    Active,
    /// Targets Down or Warning (the incidents tab).
    Down,
}

pub fn filter_by_view(targets: &[MonitoredTarget], view: ViewFilter) -> Vec<&MonitoredTarget> {
    targets
        .iter()
        .filter(|t| match view {
            ViewFilter::All => true,
            ViewFilter::Active => t.status == TargetStatus::Up,
            ViewFilter::Down => {
                t.status == TargetStatus::Down || t.status == TargetStatus::Warning
            }
        })
        .collect()
}
