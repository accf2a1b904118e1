// One refresh pass: fetch targets and logs, then derive every dashboard view.
// The derivation half is pure and takes an explicit `now`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::api_client::{ApiClient, LogBatch};
use crate::incidents::derive_incidents;
use crate::models::{DashboardSnapshot, HealthCheckRecord, MonitoredTarget};
use crate::series::{bucket_series, bucket_width_for_window};
use crate::summary::summarize;

/// Windowing and fetch limits for one refresh.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Trailing span the chart series covers (e.g. 7, 30, 90 days).
    pub window_days: u32,
    /// Log rows requested per target per refresh.
    pub per_target_log_limit: u32,
}

/// Pure composition: normalized inputs in, derived snapshot out.
pub fn build_snapshot(
    targets: Vec<MonitoredTarget>,
    records: Vec<HealthCheckRecord>,
    failed_target_ids: Vec<String>,
    window_days: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<DashboardSnapshot> {
    let targets_by_id: HashMap<String, MonitoredTarget> = targets
        .iter()
        .map(|t| (t.id.clone(), t.clone()))
        .collect();

    let series = bucket_series(
        &records,
        window_days,
        bucket_width_for_window(window_days),
        now,
    )?;
    let incidents = derive_incidents(&records, &targets_by_id);
    let summary = summarize(&targets);

    Ok(DashboardSnapshot {
        generated_at: now,
        targets,
        summary,
        series,
        incidents,
        failed_target_ids,
    })
}

/// Full refresh against the live API. A transport error on the target list
/// fails the whole pass (the caller keeps its previous snapshot); per-target
/// log failures only degrade to empty record sets.
pub async fn refresh_dashboard(
    client: &ApiClient,
    config: &PipelineConfig,
) -> anyhow::Result<DashboardSnapshot> {
    let targets = client.list_targets().await?;
    let LogBatch {
        records,
        failed_target_ids,
    } = client
        .fetch_all_health_checks(&targets, config.per_target_log_limit)
        .await;

    build_snapshot(
        targets,
        records,
        failed_target_ids,
        config.window_days,
        Utc::now(),
    )
}
