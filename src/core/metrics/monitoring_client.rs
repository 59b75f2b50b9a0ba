use async_trait::async_trait;

use super::metrics_models::DayWindow;

/// Errors raised while querying the monitoring backend. An empty result set
/// is not an error; it surfaces as `Ok(None)` from the fetch.
#[derive(Debug, thiserror::Error)]
pub enum MonitoringError {
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("HTTP transport error: {0}")]
    Http(String),
    #[error("Monitoring API error: {0}")]
    Api(String),
}

/// Which Parallelstore counter a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    ReadOps,
    TransferredBytes,
}

impl MetricKind {
    /// Fully qualified Cloud Monitoring metric type.
    pub fn metric_type(self) -> &'static str {
        match self {
            MetricKind::ReadOps => "parallelstore.googleapis.com/instance/read_ops_count",
            MetricKind::TransferredBytes => {
                "parallelstore.googleapis.com/instance/transferred_byte_count"
            }
        }
    }
}

/// One aggregated time-series query, scoped to a single instance and a
/// single day window.
#[derive(Debug, Clone)]
pub struct MetricQuery {
    pub metric: MetricKind,
    pub project_id: String,
    pub instance_id: String,
    pub window: DayWindow,
}

/// Trait describing the one monitoring operation the core layer needs.
///
/// Implementations ask the backend for rate-aligned samples (60-second
/// buckets, max reducer across series) and return the highest bucketed rate
/// observed in the window, or `None` when the window holds no samples at
/// all. The underlying counters are cumulative; the rate aligner turns them
/// into per-second figures server-side.
#[async_trait]
pub trait MonitoringClient: Send + Sync {
    async fn fetch_peak_rate(&self, query: &MetricQuery) -> Result<Option<f64>, MonitoringError>;
}
