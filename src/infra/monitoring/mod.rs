// =============================================================================
// CLOUD MONITORING MODULE
// =============================================================================
//
// This module talks to the Google Cloud Monitoring REST API. It lives in the
// infra layer because it handles external I/O (HTTP requests, OAuth2 token
// exchange). The core layer only knows about "the peak rate for a window" -
// it doesn't care how the backend is queried.

pub mod google_auth;
pub mod monitoring_api_client;

pub use google_auth::ServiceAccountAuth;
pub use monitoring_api_client::GoogleMonitoringClient;
