use chrono::{Duration, NaiveDate};

use super::metrics_models::{Benchmarks, DailyResult, DayWindow, PerformanceReport, PollRequest};
use super::monitoring_client::{MetricKind, MetricQuery, MonitoringClient, MonitoringError};

/// Decimal megabytes, the unit the throughput benchmark is published in.
const BYTES_PER_MB: f64 = 1_000_000.0;

/// Errors that abort a poll run before any remote call is made.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Start date {start} is after end date {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

/// Reporting collaborator the poller emits progress through.
///
/// Injected so the core owns no global logger state; the CLI installs a
/// tracing-backed implementation, tests install recording ones.
pub trait PollObserver: Send + Sync {
    /// The run passed validation and is about to query the first day.
    fn on_period_start(&self, request: &PollRequest);

    /// A single metric fetch failed; its value is recorded as absent and
    /// the run continues.
    fn on_fetch_error(&self, query: &MetricQuery, error: &MonitoringError);

    /// A day's result is final, whether or not it carries data.
    fn on_day_result(&self, result: &DailyResult);
}

/// Service that walks a calendar-day range and collects daily peak
/// performance for one Parallelstore instance.
///
/// The day loop lives here so it can be tested without HTTP or credential
/// concerns. Each day is processed to completion before the cursor
/// advances: both metrics fetched (independently), throughput converted to
/// decimal MB/s, both benchmark flags derived, and exactly one
/// [`DailyResult`] appended regardless of what the backend returned.
pub struct MetricsService<C: MonitoringClient, O: PollObserver> {
    client: C,
    observer: O,
    benchmarks: Benchmarks,
}

impl<C, O> MetricsService<C, O>
where
    C: MonitoringClient,
    O: PollObserver,
{
    pub fn new(client: C, observer: O, benchmarks: Benchmarks) -> Self {
        Self {
            client,
            observer,
            benchmarks,
        }
    }

    /// Poll every day in `[start_date, end_date]`, ascending.
    ///
    /// Fails fast on an inverted period; after that the run always
    /// completes with one result per day, degrading to absent values at
    /// the per-metric, per-day granularity when a fetch errors.
    pub async fn poll_range(&self, request: &PollRequest) -> Result<PerformanceReport, PollError> {
        if request.start_date > request.end_date {
            return Err(PollError::InvalidPeriod {
                start: request.start_date,
                end: request.end_date,
            });
        }

        self.observer.on_period_start(request);

        let mut days = Vec::new();
        let mut day = request.start_date;
        while day <= request.end_date {
            days.push(self.poll_day(request, day).await);
            day = day + Duration::days(1);
        }

        Ok(PerformanceReport {
            project_id: request.project_id.clone(),
            instance_id: request.instance_id.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            days,
        })
    }

    async fn poll_day(&self, request: &PollRequest, day: NaiveDate) -> DailyResult {
        let window = DayWindow::for_day(day);

        let peak_read_iops = self.fetch_one(request, MetricKind::ReadOps, window).await;
        let peak_throughput_mbps = self
            .fetch_one(request, MetricKind::TransferredBytes, window)
            .await
            .map(|bytes_per_sec| bytes_per_sec / BYTES_PER_MB);

        let result = DailyResult {
            date: day,
            peak_read_iops,
            peak_throughput_mbps,
            met_iops_benchmark: peak_read_iops.map(|v| v >= self.benchmarks.min_read_iops),
            met_throughput_benchmark: peak_throughput_mbps
                .map(|v| v >= self.benchmarks.min_throughput_mbps),
        };

        self.observer.on_day_result(&result);
        result
    }

    /// Fetch one metric for one day. Errors are reported and collapsed to
    /// `None` so a failing metric never takes the other one down with it.
    async fn fetch_one(
        &self,
        request: &PollRequest,
        metric: MetricKind,
        window: DayWindow,
    ) -> Option<f64> {
        let query = MetricQuery {
            metric,
            project_id: request.project_id.clone(),
            instance_id: request.instance_id.clone(),
            window,
        };

        match self.client.fetch_peak_rate(&query).await {
            Ok(value) => value,
            Err(err) => {
                self.observer.on_fetch_error(&query, &err);
                None
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
// Core logic should be thoroughly tested since it contains the business
// rules: range iteration, unit conversion, benchmark evaluation, and the
// per-metric failure isolation.
