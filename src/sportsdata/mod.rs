pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::{GatewayError, SportsDataClient};
pub use types::{MatchDetails, MatchStats, ScorePair, StatKind, StatPair, StatusCategory};

/// Read-only view of the sports-data provider. The settlement core only
/// ever talks to this trait so tests can script match state without a
/// network.
#[async_trait]
pub trait SportsDataGateway: Send + Sync {
    async fn match_details(&self, external_id: &str)
        -> Result<Option<MatchDetails>, GatewayError>;

    async fn match_stats(&self, external_id: &str) -> Result<Option<MatchStats>, GatewayError>;
}

#[async_trait]
impl SportsDataGateway for SportsDataClient {
    async fn match_details(
        &self,
        external_id: &str,
    ) -> Result<Option<MatchDetails>, GatewayError> {
        self.fetch_match_details(external_id).await
    }

    async fn match_stats(&self, external_id: &str) -> Result<Option<MatchStats>, GatewayError> {
        self.fetch_match_stats(external_id).await
    }
}
