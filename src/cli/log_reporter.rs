use crate::core::metrics::{
    Benchmarks, DailyResult, MetricQuery, MonitoringError, PollObserver, PollRequest,
};

/// Renders poll progress as log lines: a header for the period, one block
/// per day with both peak values (or "no data"), and a pass/fail line per
/// benchmark. This is the CLI's stand-in for the reporting collaborator the
/// poller expects.
pub struct LogReporter {
    benchmarks: Benchmarks,
}

impl LogReporter {
    pub fn new(benchmarks: Benchmarks) -> Self {
        Self { benchmarks }
    }
}

impl PollObserver for LogReporter {
    fn on_period_start(&self, request: &PollRequest) {
        tracing::info!(
            "Fetching daily peak performance for Parallelstore instance {} in project {}, {} to {} (UTC)",
            request.instance_id,
            request.project_id,
            request.start_date,
            request.end_date
        );
    }

    fn on_fetch_error(&self, query: &MetricQuery, error: &MonitoringError) {
        tracing::error!(
            "Error fetching {} for {} over {} to {}: {}",
            query.metric.metric_type(),
            query.instance_id,
            query.window.start,
            query.window.end,
            error
        );
    }

    fn on_day_result(&self, result: &DailyResult) {
        if result.peak_read_iops.is_none() && result.peak_throughput_mbps.is_none() {
            tracing::info!(
                "{}: no significant performance metrics (IOPS or throughput) found",
                result.date
            );
            return;
        }

        match result.peak_read_iops {
            Some(iops) => {
                tracing::info!("{}: peak read IOPS (rate): {:.2} ops/sec", result.date, iops);
                if result.met_iops_benchmark == Some(true) {
                    tracing::info!(
                        "{}: IOPS benchmark (expected >= {} ops/sec): PASSED",
                        result.date,
                        self.benchmarks.min_read_iops
                    );
                } else {
                    tracing::warn!(
                        "{}: IOPS benchmark (expected >= {} ops/sec): BELOW THRESHOLD",
                        result.date,
                        self.benchmarks.min_read_iops
                    );
                }
            }
            None => {
                tracing::warn!("{}: IOPS benchmark: no data", result.date);
            }
        }

        match result.peak_throughput_mbps {
            Some(mbps) => {
                tracing::info!(
                    "{}: peak throughput (rate): {:.2} MBps",
                    result.date,
                    mbps
                );
                if result.met_throughput_benchmark == Some(true) {
                    tracing::info!(
                        "{}: throughput benchmark (expected >= {} MBps): PASSED",
                        result.date,
                        self.benchmarks.min_throughput_mbps
                    );
                } else {
                    tracing::warn!(
                        "{}: throughput benchmark (expected >= {} MBps): BELOW THRESHOLD",
                        result.date,
                        self.benchmarks.min_throughput_mbps
                    );
                }
            }
            None => {
                tracing::warn!("{}: throughput benchmark: no data", result.date);
            }
        }
    }
}
