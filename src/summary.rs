// Scalar summary over the current target set. Defined for empty input.

use crate::models::{MonitoredTarget, SummaryStats, TargetStatus};

pub fn summarize(targets: &[MonitoredTarget]) -> SummaryStats {
    let total_count = targets.len() as u32;
    let active_count = count_with_status(targets, TargetStatus::Up);
    let down_count = count_with_status(targets, TargetStatus::Down);
    let warning_count = count_with_status(targets, TargetStatus::Warning);

    let average_response_time_ms = if targets.is_empty() {
        0
    } else {
        let sum: i64 = targets.iter().map(|t| t.last_response_time_ms).sum();
        (sum as f64 / targets.len() as f64).round() as i64
    };

    let active_percent = if total_count == 0 {
        0.0
    } else {
        let pct = active_count as f64 / total_count as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    };

    SummaryStats {
        total_count,
        active_count,
        down_count,
        warning_count,
        average_response_time_ms,
        active_percent,
    }
}

fn count_with_status(targets: &[MonitoredTarget], status: TargetStatus) -> u32 {
    targets.iter().filter(|t| t.status == status).count() as u32
}
