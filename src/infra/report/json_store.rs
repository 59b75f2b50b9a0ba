use std::path::PathBuf;

use crate::core::metrics::PerformanceReport;

#[derive(Debug, thiserror::Error)]
pub enum ReportWriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Writes a completed report to disk as pretty-printed JSON, so a run's
/// summary can be kept or fed to other tooling.
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write(&self, report: &PerformanceReport) -> Result<(), ReportWriteError> {
        let file = std::fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, report)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::DailyResult;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn report_round_trips_through_the_summary_file() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();

        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let report = PerformanceReport {
            project_id: "test-project".to_string(),
            instance_id: "persistenttest1".to_string(),
            start_date: date,
            end_date: date,
            days: vec![DailyResult {
                date,
                peak_read_iops: Some(40_000.0),
                peak_throughput_mbps: None,
                met_iops_benchmark: Some(true),
                met_throughput_benchmark: None,
            }],
        };

        JsonReportWriter::new(path.clone()).write(&report).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let loaded: PerformanceReport = serde_json::from_reader(file).unwrap();
        assert_eq!(loaded.instance_id, "persistenttest1");
        assert_eq!(loaded.days, report.days);
    }
}
