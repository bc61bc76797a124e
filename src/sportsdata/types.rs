use std::collections::HashMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Raw wire shapes (provider JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MatchDetailsResponse {
    #[serde(rename = "match", default)]
    pub record: Option<RawMatch>,
}

#[derive(Debug, Deserialize)]
pub struct RawMatch {
    pub id: String,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub scores: Option<RawScores>,
}

#[derive(Debug, Deserialize)]
pub struct RawStatus {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawScores {
    #[serde(default)]
    pub home: Option<i64>,
    #[serde(default)]
    pub away: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MatchStatsResponse {
    #[serde(default)]
    pub stats: Vec<RawStat>,
}

#[derive(Debug, Deserialize)]
pub struct RawStat {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub home: Option<i64>,
    #[serde(default)]
    pub away: Option<i64>,
}

// ---------------------------------------------------------------------------
// Normalized shapes
// ---------------------------------------------------------------------------

/// Coarse lifecycle bucket derived from the provider's numeric status id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    NotStarted,
    InProgress,
    Finished,
    /// Postponed, cancelled or otherwise abandoned — will not finish.
    Abandoned,
    Unknown,
}

impl StatusCategory {
    pub fn from_provider_id(id: i64) -> Self {
        match id {
            1 | 13 => StatusCategory::NotStarted,
            2..=7 => StatusCategory::InProgress,
            8 => StatusCategory::Finished,
            9 | 12 => StatusCategory::Abandoned,
            _ => StatusCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePair {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

/// Normalized match details as consumed by the resolver.
#[derive(Debug, Clone)]
pub struct MatchDetails {
    pub id: String,
    pub status_id: i64,
    pub status_category: StatusCategory,
    pub status_name: String,
    pub score: ScorePair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatPair {
    pub home: i64,
    pub away: i64,
}

impl StatPair {
    pub fn total(&self) -> i64 {
        self.home + self.away
    }
}

// ---------------------------------------------------------------------------
// Stat alias table
// ---------------------------------------------------------------------------

/// Stats the resolver consumes. The provider does not keep stat-name keys
/// stable, so each canonical stat carries an alias set checked in priority
/// order against the normalized keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    YellowCards,
    Corners,
}

impl StatKind {
    pub fn canonical(&self) -> &'static str {
        self.aliases()[0]
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            StatKind::YellowCards => &["yellow_cards", "yellowcards", "cards_yellow"],
            StatKind::Corners => &["corner_kicks", "corners", "cornerkicks"],
        }
    }
}

/// Per-match statistics keyed by normalized stat name.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    values: HashMap<String, StatPair>,
}

impl MatchStats {
    pub fn from_raw(raw: Vec<RawStat>) -> Self {
        let mut values = HashMap::new();
        for stat in raw {
            let (Some(home), Some(away)) = (stat.home, stat.away) else {
                continue;
            };
            values.insert(normalize_stat_key(&stat.kind), StatPair { home, away });
        }
        Self { values }
    }

    /// Look a stat up through its alias set, first hit wins.
    pub fn lookup(&self, kind: StatKind) -> Option<StatPair> {
        kind.aliases()
            .iter()
            .find_map(|alias| self.values.get(*alias).copied())
    }

    /// Build stats from `(name, home, away)` triples. Mostly a test
    /// convenience; normalization still applies.
    pub fn from_pairs(pairs: &[(&str, i64, i64)]) -> Self {
        Self::from_raw(
            pairs
                .iter()
                .map(|(kind, home, away)| RawStat {
                    kind: (*kind).to_string(),
                    home: Some(*home),
                    away: Some(*away),
                })
                .collect(),
        )
    }
}

/// Lowercase and collapse separators so `"Yellow Cards"`, `"yellow-cards"`
/// and `"yellow_cards"` all land on the same key.
pub fn normalize_stat_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
