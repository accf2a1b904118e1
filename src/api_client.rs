// Monitoring API client via reqwest. The bearer token comes from an injected
// Session rather than ambient state; 401/403 surfaces as a typed error so the
// hosting application decides what session expiry means.

use futures_util::future::join_all;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use crate::models::{HealthCheckRecord, MonitoredTarget, NewTarget};
use crate::normalize::{
    RESPONSE_ARRAY_KEYS, extract_record_array, normalize_health_check, normalize_target,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("session expired (HTTP {0})")]
    SessionExpired(u16),
    #[error("API returned HTTP {0}")]
    Status(u16),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Opaque identity-provider session. Token issuance and renewal are the host's
/// concern; the client only attaches what it is given.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

/// Result of fetching logs for many targets in parallel. Failed members
/// contribute empty record sets; successes are never discarded.
#[derive(Debug, Default)]
pub struct LogBatch {
    pub records: Vec<HealthCheckRecord>,
    pub failed_target_ids: Vec<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn check_status(status: StatusCode) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired(status.as_u16()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let req = self.authorize(self.http.get(format!("{}{}", self.base_url, path)));
        let resp = req.send().await?;
        Self::check_status(resp.status())?;
        resp.json().await.map_err(ApiError::Decode)
    }

    /// GET /targets - the full target list, normalized. The whole list is
    /// replaced on every poll; there is no incremental patch.
    pub async fn list_targets(&self) -> Result<Vec<MonitoredTarget>, ApiError> {
        let body = self.get_json("/targets").await?;
        Ok(extract_record_array(&body, RESPONSE_ARRAY_KEYS)
            .iter()
            .map(normalize_target)
            .collect())
    }

    /// GET /healthchecks?targetId=X&limit=N - one target's recent log rows.
    /// `slow_threshold_ms` feeds the client-side is_slow fallback.
    pub async fn list_health_checks(
        &self,
        target_id: &str,
        limit: u32,
        slow_threshold_ms: Option<i64>,
    ) -> Result<Vec<HealthCheckRecord>, ApiError> {
        let path = format!("/healthchecks?targetId={target_id}&limit={limit}");
        let body = self.get_json(&path).await?;
        Ok(extract_record_array(&body, RESPONSE_ARRAY_KEYS)
            .iter()
            .map(|raw| normalize_health_check(raw, slow_threshold_ms))
            .collect())
    }

    /// GET /healthchecks?limit=N - recent rows across all targets, for the
    /// overview chart.
    pub async fn recent_health_checks(
        &self,
        limit: u32,
    ) -> Result<Vec<HealthCheckRecord>, ApiError> {
        let body = self.get_json(&format!("/healthchecks?limit={limit}")).await?;
        Ok(extract_record_array(&body, RESPONSE_ARRAY_KEYS)
            .iter()
            .map(|raw| normalize_health_check(raw, None))
            .collect())
    }

    /// POST /targets - register a new target.
    pub async fn create_target(&self, target: &NewTarget) -> Result<(), ApiError> {
        let req = self.authorize(self.http.post(format!("{}/targets", self.base_url)));
        let resp = req.json(target).send().await?;
        Self::check_status(resp.status())
    }

    /// Fetches recent logs for every target in parallel (the API requires one
    /// request per target id) and joins on an all-complete barrier. One slow or
    /// failing member does not block the rest; the first error is logged once.
    pub async fn fetch_all_health_checks(
        &self,
        targets: &[MonitoredTarget],
        per_target_limit: u32,
    ) -> LogBatch {
        let fetches = targets.iter().map(|t| {
            let threshold = (t.max_latency_ms > 0).then_some(t.max_latency_ms);
            async move {
                (
                    t.id.clone(),
                    self.list_health_checks(&t.id, per_target_limit, threshold)
                        .await,
                )
            }
        });

        let mut batch = LogBatch::default();
        let mut first_error: Option<ApiError> = None;
        for (target_id, result) in join_all(fetches).await {
            match result {
                Ok(mut records) => batch.records.append(&mut records),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                    batch.failed_target_ids.push(target_id);
                }
            }
        }
        if let Some(e) = first_error {
            warn!(
                error = %e,
                failed_targets = batch.failed_target_ids.len(),
                operation = "fetch_all_health_checks",
                "some per-target log fetches failed"
            );
        }
        batch
    }
}
