use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;

use crate::core::metrics::PollRequest;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from resolving the raw flag values into a poll request.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Parser)]
#[command(name = "pstore-metrics")]
#[command(about = "Fetch daily peak performance metrics for a Parallelstore instance")]
#[command(version)]
pub struct CliArgs {
    /// GCP project ID.
    #[arg(long = "project_id")]
    pub project_id: String,

    /// Parallelstore instance ID.
    #[arg(long = "instance_id")]
    pub instance_id: String,

    /// Start date for the report (YYYY-MM-DD).
    #[arg(long = "start_date")]
    pub start_date: String,

    /// End date for the report (YYYY-MM-DD). Defaults to today's date in UTC.
    #[arg(long = "end_date")]
    pub end_date: Option<String>,

    /// Write a JSON summary of the report to this path.
    #[arg(long = "summary_out")]
    pub summary_out: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the raw flags into a poll request. The end-date default is
    /// the current UTC date, evaluated once here at invocation.
    pub fn to_poll_request(&self) -> Result<PollRequest, ArgsError> {
        let start_date = parse_date(&self.start_date)?;
        let end_date = match &self.end_date {
            Some(raw) => parse_date(raw)?,
            None => Utc::now().date_naive(),
        };

        Ok(PollRequest {
            project_id: self.project_id.clone(),
            instance_id: self.instance_id.clone(),
            start_date,
            end_date,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ArgsError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ArgsError::InvalidDate(value.to_string()))
}
