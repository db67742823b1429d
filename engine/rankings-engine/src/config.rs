//! League configuration for a ranking run

use crate::error::{RankingError, Result};
use crate::models::ScoringFormat;
use anyhow::Context;
use player_registry::{MatchPolicy, Normalizer, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Weight applied to providers without an explicit entry
pub const DEFAULT_SOURCE_WEIGHT: f64 = 1.0;

/// Largest league size accepted by [`RosterConfig::validate`]
pub const MAX_TEAMS: u32 = 32;

/// Largest per-team roster (starters plus bench depth across positions)
pub const MAX_ROSTER_SIZE: u64 = 50;

/// Roster and weighting settings passed explicitly into every ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Number of teams in the league
    pub teams: u32,

    /// VORP drop that starts a new tier
    pub tier_gap_threshold: f64,

    /// Fraction of the league's bench depth the BEER slot extends past the
    /// VORP slot, in [0, 1]. This is an extension, not an interpolation
    /// between VOLS and VORP: 0 puts BEER on the VORP slot.
    pub beer_weight: f64,

    /// Scoring format used when projections must be estimated
    pub scoring: ScoringFormat,

    /// Provider priority order for tie-breaks; also the accepted set when non-empty
    pub providers: Vec<String>,

    /// Starting slots per position
    pub starters_per_position: BTreeMap<Position, u32>,

    /// Extra per-team depth counted before the replacement player (VORP/BEER)
    pub bench_depth_offset: BTreeMap<Position, u32>,

    /// Reliability weight per provider id
    pub source_weights: BTreeMap<String, f64>,

    /// Identity matching settings
    pub matching: MatchingConfig,
}

/// Settings for reconciling provider records into players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum name similarity (0-100) for a fuzzy merge
    pub threshold: f64,

    /// Scores this close to the threshold are reported as ambiguous
    pub ambiguity_band: f64,

    /// Largest provider rank accepted
    pub max_source_rank: u32,

    /// Extra alias -> canonical name pairs
    pub name_aliases: BTreeMap<String, String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            teams: 12,
            tier_gap_threshold: 10.0,
            beer_weight: 0.5,
            scoring: ScoringFormat::HalfPpr,
            providers: ["fantasypros", "nfl", "cbs", "espn", "yahoo"]
                .into_iter()
                .map(String::from)
                .collect(),
            starters_per_position: position_map([1, 2, 2, 1, 1, 1]),
            bench_depth_offset: position_map([1, 2, 2, 1, 0, 0]),
            source_weights: [
                ("fantasypros", 1.0),
                ("nfl", 1.0),
                ("cbs", 0.95),
                ("espn", 0.9),
                ("yahoo", 0.8),
            ]
            .into_iter()
            .map(|(provider, weight)| (provider.to_string(), weight))
            .collect(),
            matching: MatchingConfig::default(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 90.0,
            ambiguity_band: 5.0,
            max_source_rank: 500,
            name_aliases: BTreeMap::new(),
        }
    }
}

/// Build a per-position map in [`Position::ALL`] order
fn position_map(values: [u32; 6]) -> BTreeMap<Position, u32> {
    Position::ALL.into_iter().zip(values).collect()
}

impl RosterConfig {
    /// Settings for a named platform preset
    pub fn preset(name: &str) -> Result<Self> {
        let mut config = Self::default();
        match name.trim().to_lowercase().as_str() {
            "default" => {}
            "espn_standard" => {
                config.teams = 10;
                config.scoring = ScoringFormat::Standard;
            }
            "yahoo_half_ppr" => {
                config.scoring = ScoringFormat::HalfPpr;
                config.starters_per_position.insert(Position::WR, 3);
            }
            "sleeper_ppr" => {
                config.scoring = ScoringFormat::Ppr;
            }
            _ => return Err(RankingError::UnknownPreset(name.to_string())),
        }
        Ok(config)
    }

    /// Load configuration from a TOML file; omitted keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RosterConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize roster config")?;
        std::fs::write(path, content).context("Failed to write roster config")?;
        Ok(())
    }

    /// Create configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("RANKINGS_PRESET") {
            Some(preset) => Self::preset(&preset)?,
            None => Self::default(),
        };

        if let Some(teams) = lookup("RANKINGS_TEAMS") {
            config.teams = teams.parse().context("RANKINGS_TEAMS must be an integer")?;
        }
        if let Some(gap) = lookup("RANKINGS_TIER_GAP") {
            config.tier_gap_threshold = gap.parse().context("RANKINGS_TIER_GAP must be a number")?;
        }
        if let Some(scoring) = lookup("RANKINGS_SCORING") {
            config.scoring = scoring.parse()?;
        }
        if let Some(threshold) = lookup("RANKINGS_MATCH_THRESHOLD") {
            config.matching.threshold =
                threshold.parse().context("RANKINGS_MATCH_THRESHOLD must be a number")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that do not depend on the player pool
    pub fn validate(&self) -> Result<()> {
        if self.teams == 0 {
            return Err(RankingError::InvalidTeamCount(self.teams));
        }
        if self.teams > MAX_TEAMS {
            return Err(RankingError::Config(format!(
                "teams must be at most {}, got {}",
                MAX_TEAMS, self.teams
            )));
        }
        let roster_size: u64 = self
            .starters_per_position
            .values()
            .chain(self.bench_depth_offset.values())
            .map(|slots| u64::from(*slots))
            .sum();
        if roster_size > MAX_ROSTER_SIZE {
            return Err(RankingError::Config(format!(
                "starters plus bench depth must be at most {} per team, got {}",
                MAX_ROSTER_SIZE, roster_size
            )));
        }
        if !self.tier_gap_threshold.is_finite() || self.tier_gap_threshold <= 0.0 {
            return Err(RankingError::Config(format!(
                "tier_gap_threshold must be positive, got {}",
                self.tier_gap_threshold
            )));
        }
        if let Some((provider, weight)) =
            self.source_weights.iter().find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(RankingError::Config(format!(
                "source weight for {} must be positive, got {}",
                provider, weight
            )));
        }
        if !(0.0..=1.0).contains(&self.beer_weight) {
            return Err(RankingError::Config(format!(
                "beer_weight must be in [0, 1], got {}",
                self.beer_weight
            )));
        }

        let matching = &self.matching;
        if !(matching.threshold > 0.0 && matching.threshold <= 100.0) {
            return Err(RankingError::Config(format!(
                "match threshold must be in (0, 100], got {}",
                matching.threshold
            )));
        }
        if !matching.ambiguity_band.is_finite() || matching.ambiguity_band < 0.0 {
            return Err(RankingError::Config(format!(
                "ambiguity band must be non-negative, got {}",
                matching.ambiguity_band
            )));
        }
        if matching.max_source_rank == 0 {
            return Err(RankingError::Config("max_source_rank must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn weight_for(&self, provider: &str) -> f64 {
        self.source_weights.get(provider).copied().unwrap_or(DEFAULT_SOURCE_WEIGHT)
    }

    pub fn starters(&self, position: Position) -> u32 {
        self.starters_per_position.get(&position).copied().unwrap_or(0)
    }

    pub fn bench(&self, position: Position) -> u32 {
        self.bench_depth_offset.get(&position).copied().unwrap_or(0)
    }

    /// Provider tie-break order: the explicit list, else heaviest weight first
    pub fn provider_priority(&self) -> Vec<String> {
        if !self.providers.is_empty() {
            return self.providers.clone();
        }

        let mut weighted: Vec<(&String, f64)> =
            self.source_weights.iter().map(|(p, w)| (p, *w)).collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        weighted.into_iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            threshold: self.matching.threshold,
            ambiguity_band: self.matching.ambiguity_band,
            provider_priority: self.provider_priority(),
            accept_unlisted_providers: self.providers.is_empty(),
            max_rank: self.matching.max_source_rank,
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new().with_aliases(self.matching.name_aliases.iter())
    }
}
