use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Acceptance thresholds a day's peaks are judged against.
///
/// The defaults are the published figures for a 100 TiB Parallelstore
/// instance: 30k read ops/sec and 1.15 GBps of transfer.
#[derive(Debug, Clone, Copy)]
pub struct Benchmarks {
    pub min_read_iops: f64,
    pub min_throughput_mbps: f64,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            min_read_iops: 30_000.0,
            min_throughput_mbps: 1_150.0,
        }
    }
}

/// One poll run: which instance to inspect and over which inclusive range
/// of UTC calendar days.
#[derive(Debug, Clone)]
pub struct PollRequest {
    pub project_id: String,
    pub instance_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The UTC bounds of a single calendar day, `[00:00:00, 23:59:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::seconds(1);
        Self { start, end }
    }
}

/// Outcome for one calendar day. Built once per loop iteration and never
/// mutated afterwards; `None` means the metric had no data or its fetch
/// failed, and the matching benchmark flag is `None` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResult {
    pub date: NaiveDate,
    pub peak_read_iops: Option<f64>,
    pub peak_throughput_mbps: Option<f64>,
    pub met_iops_benchmark: Option<bool>,
    pub met_throughput_benchmark: Option<bool>,
}

/// The accumulated result of a poll run: one entry per calendar day in the
/// requested range, in ascending order, plus the identifying context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub project_id: String,
    pub instance_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DailyResult>,
}
