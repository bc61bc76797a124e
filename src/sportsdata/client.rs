use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::types::{
    MatchDetails, MatchDetailsResponse, MatchStats, MatchStatsResponse, ScorePair, StatusCategory,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// HTTP client for the sports-data provider. No retries here: a failed
/// fetch skips the match for this run and the next run polls again.
#[derive(Debug, Clone)]
pub struct SportsDataClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SportsDataClient {
    pub fn new(http: Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetch match details by provider match id. `None` when the provider
    /// has no record for the id.
    pub async fn fetch_match_details(
        &self,
        external_id: &str,
    ) -> Result<Option<MatchDetails>, GatewayError> {
        let url = format!("{}/v1/matches/{}", self.base_url, external_id);
        let resp = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;

        let body: MatchDetailsResponse = resp.json().await?;
        let Some(raw) = body.record else {
            return Ok(None);
        };

        let status = raw
            .status
            .ok_or_else(|| GatewayError::Unexpected("match payload missing status".into()))?;
        let scores = raw.scores;

        Ok(Some(MatchDetails {
            id: raw.id,
            status_id: status.id,
            status_category: StatusCategory::from_provider_id(status.id),
            status_name: status.name,
            score: ScorePair {
                home: scores.as_ref().and_then(|s| s.home),
                away: scores.as_ref().and_then(|s| s.away),
            },
        }))
    }

    /// Fetch per-match statistics. `None` when the provider has no stats
    /// for the match (common right after full time).
    pub async fn fetch_match_stats(
        &self,
        external_id: &str,
    ) -> Result<Option<MatchStats>, GatewayError> {
        let url = format!("{}/v1/matches/{}/stats", self.base_url, external_id);
        let resp = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;

        let body: MatchStatsResponse = resp.json().await?;
        if body.stats.is_empty() {
            return Ok(None);
        }
        Ok(Some(MatchStats::from_raw(body.stats)))
    }
}
