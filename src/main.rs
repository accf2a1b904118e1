use anyhow::Result;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use uptimedeck::*;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Snapshots kept in the broadcast channel for slow subscribers.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 8;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let session = api_client::Session {
        token: app_config.api.token.clone(),
    };
    let client = Arc::new(api_client::ApiClient::new(
        &app_config.api.base_url,
        session,
        app_config.api.request_timeout_secs,
    )?);

    let pipeline_config = pipeline::PipelineConfig {
        window_days: app_config.refresh.window_days,
        per_target_log_limit: app_config.refresh.per_target_log_limit,
    };

    let (tx, _) = broadcast::channel::<models::DashboardSnapshot>(SNAPSHOT_CHANNEL_CAPACITY);

    // Console view: log each refreshed snapshot at a glance.
    let mut rx = tx.subscribe();
    let display_task = tokio::spawn(async move {
        while let Ok(snapshot) = rx.recv().await {
            tracing::info!(
                targets = snapshot.summary.total_count,
                up = snapshot.summary.active_count,
                down = snapshot.summary.down_count,
                warning = snapshot.summary.warning_count,
                avg_response_ms = snapshot.summary.average_response_time_ms,
                active_percent = snapshot.summary.active_percent,
                incidents = snapshot.incidents.len(),
                failed_log_fetches = snapshot.failed_target_ids.len(),
                "dashboard refreshed"
            );
        }
    });

    let fetch_client = client.clone();
    let fetch_tx = tx.clone();
    let handle = refresh::spawn(
        move || {
            let client = fetch_client.clone();
            let config = pipeline_config.clone();
            let tx = fetch_tx.clone();
            async move {
                let snapshot = pipeline::refresh_dashboard(&client, &config).await?;
                if tx.send(snapshot).is_err() {
                    tracing::debug!("no snapshot subscribers");
                }
                Ok(())
            }
        },
        refresh::RefreshConfig {
            interval_ms: app_config.refresh.interval_ms,
            enabled: app_config.refresh.enabled,
            stats_log_interval_secs: app_config.refresh.stats_log_interval_secs,
        },
    );

    tracing::info!(
        version = version::VERSION,
        base_url = %app_config.api.base_url,
        interval_ms = app_config.refresh.interval_ms,
        "uptimedeck started"
    );

    wait_for_shutdown_signal().await;
    tracing::info!("Received shutdown signal");
    handle.stop().await;
    display_task.abort();

    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
