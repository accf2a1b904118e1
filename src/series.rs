// Time bucketing: raw log rows -> gap-free, fixed-width chart series.
// "now" is an explicit parameter so the windowing stays deterministic in tests.

use chrono::{DateTime, Duration, Utc};

use crate::models::{HealthCheckRecord, TimeBucket};

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_6_HOURS: i64 = 21_600_000;
const MS_PER_3_DAYS: i64 = 3 * MS_PER_DAY;

/// Bucket width for a requested window. The API caps records per target, so a
/// short window gets sub-daily buckets; daily buckets would collapse a sparse
/// recent-heavy sample into one flat point.
pub fn bucket_width_for_window(window_days: u32) -> i64 {
    if window_days <= 7 {
        MS_PER_6_HOURS
    } else if window_days <= 30 {
        MS_PER_DAY
    } else {
        MS_PER_3_DAYS
    }
}

/// Groups `records` falling in `[now - window_days, now]` into contiguous
/// equal-width buckets, oldest first. Every bucket in the window is present;
/// empty buckets carry None metrics and a zero sample count.
pub fn bucket_series(
    records: &[HealthCheckRecord],
    window_days: u32,
    bucket_width_ms: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<TimeBucket>> {
    let window_ms = window_days as i64 * MS_PER_DAY;
    anyhow::ensure!(window_days > 0, "window_days must be > 0, got {window_days}");
    anyhow::ensure!(
        bucket_width_ms > 0,
        "bucket_width_ms must be > 0, got {bucket_width_ms}"
    );
    anyhow::ensure!(
        bucket_width_ms <= window_ms,
        "bucket_width_ms {bucket_width_ms} exceeds window of {window_ms} ms"
    );

    // Ceiling division; both operands are validated positive above.
    let bucket_count = ((window_ms + bucket_width_ms - 1) / bucket_width_ms) as usize;
    let window_start = now - Duration::milliseconds(window_ms);
    let window_start_ms = window_start.timestamp_millis();

    let mut samples: Vec<Vec<i64>> = vec![Vec::new(); bucket_count];
    for record in records {
        if record.timestamp < window_start || record.timestamp > now {
            continue;
        }
        let offset_ms = record.timestamp.timestamp_millis() - window_start_ms;
        // A record at exactly `now` lands one past the end; clamp, never drop.
        let index = ((offset_ms / bucket_width_ms) as usize).min(bucket_count - 1);
        samples[index].push(record.response_time_ms);
    }

    let buckets = samples
        .into_iter()
        .enumerate()
        .map(|(i, values)| {
            let bucket_start =
                window_start + Duration::milliseconds(i as i64 * bucket_width_ms);
            let (avg, max) = if values.is_empty() {
                (None, None)
            } else {
                let sum: i64 = values.iter().sum();
                let mean = sum as f64 / values.len() as f64;
                (
                    Some(mean.round() as i64),
                    values.iter().copied().max(),
                )
            };
            TimeBucket {
                bucket_start,
                average_response_time_ms: avg,
                max_response_time_ms: max,
                sample_count: values.len() as u32,
            }
        })
        .collect();

    Ok(buckets)
}
