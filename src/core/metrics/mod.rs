pub mod metrics_models;
pub mod metrics_service;
pub mod monitoring_client;

pub use metrics_models::{Benchmarks, DailyResult, DayWindow, PerformanceReport, PollRequest};
pub use metrics_service::{MetricsService, PollError, PollObserver};
pub use monitoring_client::{MetricKind, MetricQuery, MonitoringClient, MonitoringError};
