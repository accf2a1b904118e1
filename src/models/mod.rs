// Domain models: canonical API records plus the derived dashboard views

mod derived;
mod health;
mod target;

pub use derived::{DashboardSnapshot, Incident, Severity, SummaryStats, TimeBucket};
pub use health::HealthCheckRecord;
pub use target::{MonitoredTarget, NewTarget, TargetStatus, ViewFilter, filter_by_view};
