// Entry point of the Parallelstore daily metrics tool.
//
// **Architecture Overview:**
// - `core/` = Business logic (day loop, benchmarks, backend-agnostic)
// - `infra/` = Implementations of core traits (Cloud Monitoring API, files)
// - `cli/` = Command-line adapters (argument parsing, log rendering)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run the poll over the requested period
// 4. Export the JSON summary if one was asked for

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "cli/cli_layer.rs"]
mod cli;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::log_reporter::LogReporter;
use crate::core::metrics::{Benchmarks, MetricsService};
use crate::infra::monitoring::{GoogleMonitoringClient, ServiceAccountAuth};
use crate::infra::report::JsonReportWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let request = args.to_poll_request()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Wire the Cloud Monitoring client and the log reporter into the poller.

    let auth = ServiceAccountAuth::from_env().await.context(
        "Failed to load Google credentials. Set GOOGLE_APPLICATION_CREDENTIALS to a service \
         account key file (or GOOGLE_APPLICATION_CREDENTIALS_JSON to its content) for a \
         principal with roles/monitoring.viewer",
    )?;
    let client = GoogleMonitoringClient::new(auth)?;

    let benchmarks = Benchmarks::default();
    let service = MetricsService::new(client, LogReporter::new(benchmarks), benchmarks);

    let report = service.poll_range(&request).await?;

    tracing::info!(
        "Daily performance fetching completed for {} through {}",
        report.start_date,
        report.end_date
    );

    if let Some(path) = &args.summary_out {
        JsonReportWriter::new(path)
            .write(&report)
            .with_context(|| format!("Failed to save summary to {}", path.display()))?;
        tracing::info!("Daily performance summary saved to {}", path.display());
    }

    Ok(())
}
