use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub refresh: RefreshSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Monitoring API base URL, e.g. "https://api.example.com/api".
    pub base_url: String,
    /// Bearer token from the identity provider. Optional; unauthenticated
    /// requests are sent without an Authorization header.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    pub interval_ms: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Trailing window for the chart series, in days (7, 30 or 90 in the UI).
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Log rows requested per target per refresh.
    #[serde(default = "default_per_target_log_limit")]
    pub per_target_log_limit: u32,
    /// How often to log refresh stats at INFO level (real seconds).
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_window_days() -> u32 {
    7
}

fn default_per_target_log_limit() -> u32 {
    48
}

fn default_stats_log_interval_secs() -> u64 {
    300
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.api.base_url.is_empty(),
            "api.base_url must be non-empty"
        );
        anyhow::ensure!(
            self.api.request_timeout_secs > 0,
            "api.request_timeout_secs must be > 0, got {}",
            self.api.request_timeout_secs
        );
        anyhow::ensure!(
            self.refresh.interval_ms > 0,
            "refresh.interval_ms must be > 0, got {}",
            self.refresh.interval_ms
        );
        anyhow::ensure!(
            self.refresh.window_days > 0,
            "refresh.window_days must be > 0, got {}",
            self.refresh.window_days
        );
        anyhow::ensure!(
            self.refresh.per_target_log_limit > 0,
            "refresh.per_target_log_limit must be > 0, got {}",
            self.refresh.per_target_log_limit
        );
        anyhow::ensure!(
            self.refresh.stats_log_interval_secs > 0,
            "refresh.stats_log_interval_secs must be > 0, got {}",
            self.refresh.stats_log_interval_secs
        );
        Ok(())
    }
}
