// Summary stats tests: counts, averages, zero-division safety

use uptimedeck::models::{MonitoredTarget, TargetStatus, ViewFilter, filter_by_view};
use uptimedeck::summary::summarize;

fn target(id: &str, status: TargetStatus, response_time_ms: i64) -> MonitoredTarget {
    MonitoredTarget {
        id: id.into(),
        name: id.to_uppercase(),
        url: format!("https://{id}.example.com"),
        expected_status_code: 200,
        timeout_seconds: 5,
        max_latency_ms: 3000,
        enabled: true,
        status,
        last_response_time_ms: response_time_ms,
        uptime_percent: 99.0,
        last_checked_at: None,
    }
}

#[test]
fn empty_input_is_all_zeros() {
    let stats = summarize(&[]);
    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.active_count, 0);
    assert_eq!(stats.down_count, 0);
    assert_eq!(stats.warning_count, 0);
    assert_eq!(stats.average_response_time_ms, 0);
    assert_eq!(stats.active_percent, 0.0);
}

#[test]
fn counts_by_status() {
    let targets = vec![
        target("a", TargetStatus::Up, 100),
        target("b", TargetStatus::Up, 200),
        target("c", TargetStatus::Down, 0),
        target("d", TargetStatus::Warning, 900),
        target("e", TargetStatus::Unknown, 0),
    ];
    let stats = summarize(&targets);
    assert_eq!(stats.total_count, 5);
    assert_eq!(stats.active_count, 2);
    assert_eq!(stats.down_count, 1);
    assert_eq!(stats.warning_count, 1);
}

#[test]
fn average_rounds_over_all_targets() {
    let targets = vec![
        target("a", TargetStatus::Up, 100),
        target("b", TargetStatus::Down, 201),
    ];
    let stats = summarize(&targets);
    assert_eq!(stats.average_response_time_ms, 151); // 150.5 rounds up
}

#[test]
fn active_percent_rounds_to_one_decimal() {
    let targets = vec![
        target("a", TargetStatus::Up, 100),
        target("b", TargetStatus::Up, 100),
        target("c", TargetStatus::Down, 100),
    ];
    let stats = summarize(&targets);
    assert_eq!(stats.active_percent, 66.7);
}

#[test]
fn view_filters_match_dashboard_tabs() {
    let targets = vec![
        target("a", TargetStatus::Up, 100),
        target("b", TargetStatus::Down, 0),
        target("c", TargetStatus::Warning, 900),
        target("d", TargetStatus::Unknown, 0),
    ];
    assert_eq!(filter_by_view(&targets, ViewFilter::All).len(), 4);
    assert_eq!(filter_by_view(&targets, ViewFilter::Active).len(), 1);
    let down: Vec<&str> = filter_by_view(&targets, ViewFilter::Down)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(down, vec!["b", "c"]);
}
