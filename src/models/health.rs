// One observed health-check result. Produced by the monitoring backend;
// the dashboard only ever reads a bounded trailing slice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckRecord {
    pub target_id: String,
    pub timestamp: DateTime<Utc>,
    pub response_time_ms: i64,
    pub status_code: Option<i64>,
    pub is_up: bool,
    pub is_slow: bool,
    pub error_message: Option<String>,
}
