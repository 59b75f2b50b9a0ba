// CLI layer - argument parsing and log rendering for a command-line run.

#[path = "args.rs"]
pub mod args;

#[path = "log_reporter.rs"]
pub mod log_reporter;
