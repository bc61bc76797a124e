pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod settlement;
pub mod sportsdata;

use crate::config::AppConfig;
use crate::sportsdata::SportsDataClient;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub http: reqwest::Client,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Provider client scoped to the current invocation; shares the
    /// process-wide HTTP connection pool.
    pub fn sports_client(&self) -> SportsDataClient {
        SportsDataClient::new(
            self.http.clone(),
            self.config.sports_api_base_url.clone(),
            self.config.sports_api_key.clone(),
        )
    }
}
