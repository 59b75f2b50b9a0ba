use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::google_auth::ServiceAccountAuth;
use crate::core::metrics::{MetricQuery, MonitoringClient, MonitoringError};

/// Minimal Cloud Monitoring REST client. It deliberately exposes only the
/// single aggregated query the core layer needs: `timeSeries.list` with a
/// fixed aggregation spec (60-second alignment, rate aligner, max reducer
/// across series - the reducer is defensive, expected cardinality is one
/// series per instance).
pub struct GoogleMonitoringClient {
    client: Client,
    auth: ServiceAccountAuth,
    base_url: String,
}

impl GoogleMonitoringClient {
    pub fn new(auth: ServiceAccountAuth) -> Result<Self, MonitoringError> {
        let client = Client::builder()
            .user_agent(concat!("pstore-metrics/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MonitoringError::Http(e.to_string()))?;

        Ok(Self {
            client,
            auth,
            base_url: "https://monitoring.googleapis.com/v3".to_string(),
        })
    }

    /// Monitoring filter scoping a query to one metric on one instance.
    fn filter_for(query: &MetricQuery) -> String {
        format!(
            "metric.type=\"{}\" AND resource.type = \"parallelstore.googleapis.com/Instance\" AND resource.label.instance_id=\"{}\"",
            query.metric.metric_type(),
            query.instance_id
        )
    }

    /// Reduce a page of series to the largest point value it contains.
    fn peak_of(series: &[ApiTimeSeries]) -> Option<f64> {
        series
            .iter()
            .flat_map(|ts| ts.points.iter())
            .filter_map(|point| point.value.as_f64())
            .fold(None, |peak, value| {
                Some(match peak {
                    Some(current) => current.max(value),
                    None => value,
                })
            })
    }
}

#[async_trait]
impl MonitoringClient for GoogleMonitoringClient {
    async fn fetch_peak_rate(&self, query: &MetricQuery) -> Result<Option<f64>, MonitoringError> {
        let token = self.auth.get_access_token().await?;
        let url = format!("{}/projects/{}/timeSeries", self.base_url, query.project_id);
        let filter = Self::filter_for(query);
        let start_time = query.window.start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end_time = query.window.end.to_rfc3339_opts(SecondsFormat::Secs, true);

        tracing::debug!(
            metric = query.metric.metric_type(),
            instance = %query.instance_id,
            window_start = %start_time,
            window_end = %end_time,
            "Querying Cloud Monitoring"
        );

        let mut peak: Option<f64> = None;
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.client.get(&url).bearer_auth(&token).query(&[
                ("filter", filter.as_str()),
                ("interval.startTime", start_time.as_str()),
                ("interval.endTime", end_time.as_str()),
                ("aggregation.alignmentPeriod", "60s"),
                ("aggregation.perSeriesAligner", "ALIGN_RATE"),
                ("aggregation.crossSeriesReducer", "REDUCE_MAX"),
                ("view", "FULL"),
            ]);
            if let Some(next) = &page_token {
                req = req.query(&[("pageToken", next.as_str())]);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| MonitoringError::Http(e.to_string()))?;

            let status = resp.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                let text = resp.text().await.unwrap_or_default();
                return Err(MonitoringError::Auth(format!(
                    "Monitoring API refused the request ({}): {}",
                    status, text
                )));
            }
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(MonitoringError::Api(format!(
                    "Monitoring API returned {}: {}",
                    status, text
                )));
            }

            let page: ApiListResponse = resp
                .json()
                .await
                .map_err(|e| MonitoringError::Api(e.to_string()))?;

            if let Some(page_peak) = Self::peak_of(&page.time_series) {
                peak = Some(match peak {
                    Some(current) => current.max(page_peak),
                    None => page_peak,
                });
            }

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(peak)
    }
}

// =============================================================================
// MONITORING API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiListResponse {
    #[serde(default)]
    time_series: Vec<ApiTimeSeries>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTimeSeries {
    #[serde(default)]
    points: Vec<ApiPoint>,
}

#[derive(Debug, Deserialize)]
struct ApiPoint {
    value: ApiTypedValue,
}

/// A point value as the API encodes it: doubles natively, int64 as a
/// decimal string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTypedValue {
    double_value: Option<f64>,
    int64_value: Option<String>,
}

impl ApiTypedValue {
    fn as_f64(&self) -> Option<f64> {
        self.double_value
            .or_else(|| self.int64_value.as_deref().and_then(|v| v.parse().ok()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::{DayWindow, MetricKind};
    use chrono::NaiveDate;
    use serde_json::json;

    fn series_from(value: serde_json::Value) -> Vec<ApiTimeSeries> {
        serde_json::from_value::<ApiListResponse>(value)
            .unwrap()
            .time_series
    }

    fn query(metric: MetricKind) -> MetricQuery {
        MetricQuery {
            metric,
            project_id: "test-project".to_string(),
            instance_id: "persistenttest1".to_string(),
            window: DayWindow::for_day(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        }
    }

    #[test]
    fn peak_takes_the_max_across_points_and_series() {
        let series = series_from(json!({
            "timeSeries": [
                {
                    "points": [
                        {
                            "interval": {
                                "startTime": "2025-05-01T10:00:00Z",
                                "endTime": "2025-05-01T10:01:00Z"
                            },
                            "value": {"doubleValue": 35000.0}
                        },
                        {
                            "interval": {
                                "startTime": "2025-05-01T10:01:00Z",
                                "endTime": "2025-05-01T10:02:00Z"
                            },
                            "value": {"doubleValue": 40000.0}
                        }
                    ]
                },
                {
                    "points": [
                        {"value": {"doubleValue": 12000.0}}
                    ]
                }
            ]
        }));

        assert_eq!(GoogleMonitoringClient::peak_of(&series), Some(40000.0));
    }

    #[test]
    fn int64_encoded_values_are_accepted() {
        let series = series_from(json!({
            "timeSeries": [
                {"points": [{"value": {"int64Value": "41000"}}]}
            ]
        }));

        assert_eq!(GoogleMonitoringClient::peak_of(&series), Some(41000.0));
    }

    #[test]
    fn empty_response_is_no_data_rather_than_zero() {
        let series = series_from(json!({}));
        assert_eq!(GoogleMonitoringClient::peak_of(&series), None);

        let series = series_from(json!({"timeSeries": [{"points": []}]}));
        assert_eq!(GoogleMonitoringClient::peak_of(&series), None);
    }

    #[test]
    fn filter_scopes_to_the_metric_and_instance() {
        let filter = GoogleMonitoringClient::filter_for(&query(MetricKind::ReadOps));

        assert_eq!(
            filter,
            "metric.type=\"parallelstore.googleapis.com/instance/read_ops_count\" \
             AND resource.type = \"parallelstore.googleapis.com/Instance\" \
             AND resource.label.instance_id=\"persistenttest1\""
        );
    }

    #[test]
    fn pagination_token_round_trips_through_serde() {
        let page: ApiListResponse = serde_json::from_value(json!({
            "timeSeries": [],
            "nextPageToken": "abc123"
        }))
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("abc123"));
    }
}
