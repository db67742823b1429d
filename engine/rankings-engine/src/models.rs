use crate::error::RankingError;
use player_registry::{Position, RegistryWarning, ResolvedPlayer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// League scoring format, used when projections have to be estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringFormat {
    Standard,
    HalfPpr,
    Ppr,
}

impl FromStr for ScoringFormat {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "STANDARD" | "STD" => Ok(ScoringFormat::Standard),
            "HALF_PPR" | "HALF" => Ok(ScoringFormat::HalfPpr),
            "PPR" | "FULL_PPR" => Ok(ScoringFormat::Ppr),
            _ => Err(RankingError::UnknownScoring(s.to_string())),
        }
    }
}

/// Replacement-level methodology for value-based drafting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMethod {
    /// Value Over Last Starter
    Vols,
    /// Value Over Replacement Player (first bench player)
    Vorp,
    /// Best Ever Evaluation of Replacement (bench depth for byes and injuries)
    Beer,
}

impl Default for BaselineMethod {
    fn default() -> Self {
        BaselineMethod::Vorp
    }
}

impl fmt::Display for BaselineMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineMethod::Vols => write!(f, "vols"),
            BaselineMethod::Vorp => write!(f, "vorp"),
            BaselineMethod::Beer => write!(f, "beer"),
        }
    }
}

impl FromStr for BaselineMethod {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vols" => Ok(BaselineMethod::Vols),
            "vorp" => Ok(BaselineMethod::Vorp),
            "beer" => Ok(BaselineMethod::Beer),
            _ => Err(RankingError::UnknownBaseline(s.to_string())),
        }
    }
}

/// Consensus view of one resolved player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusEntry {
    pub player: ResolvedPlayer,

    /// Weighted average of provider ranks (lower is better)
    pub consensus_rank: f64,

    /// Weighted average of the provider projections that exist
    pub projected_points: Option<f64>,

    /// Points came from the rank-based estimator, not a provider
    pub points_estimated: bool,

    pub source_count: usize,

    /// Provider -> rank
    pub ranks_by_source: BTreeMap<String, u32>,

    pub min_rank: u32,
    pub max_rank: u32,

    /// Sample standard deviation of provider ranks (0 for a single source)
    pub rank_std_dev: f64,

    /// 1-based position in the consensus order (0 until ranked)
    pub overall_rank: usize,

    /// 1-based position among players at the same position (0 until ranked)
    pub position_rank: usize,
}

impl ConsensusEntry {
    pub fn name(&self) -> &str {
        &self.player.name
    }

    pub fn position(&self) -> Position {
        self.player.position
    }

    /// Projected points, zero when no figure is available
    pub fn points(&self) -> f64 {
        self.projected_points.unwrap_or(0.0)
    }

    pub fn rank_spread(&self) -> u32 {
        self.max_rank - self.min_rank
    }

    /// Providers broadly agree on this player
    pub fn is_consensus(&self) -> bool {
        self.rank_spread() <= 10
    }
}

/// Value-over-replacement figures for one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VbdResult {
    pub position: Position,

    /// 1-based slot of the replacement player at this position
    pub baseline_slot: usize,

    pub baseline_points: f64,

    /// Projected points minus baseline points; negative below replacement
    pub vorp: f64,

    /// 1-based tier within the position
    pub tier: u32,

    /// 1-based rank by VORP within the position
    pub position_value_rank: usize,

    /// 1-based rank by VORP across all positions
    pub value_rank: usize,
}

/// Replacement baseline for a position, present even when the pool is empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionBaseline {
    pub position: Position,

    pub method: BaselineMethod,

    /// Slot the methodology asked for (may exceed the pool size)
    pub baseline_slot: usize,

    /// Points of the replacement player; 0.0 when no players exist
    pub baseline_points: f64,

    pub baseline_player: Option<String>,

    pub player_count: usize,

    /// Relative VORP drop from the top player to the deep-starter slot
    pub scarcity: f64,
}

impl PositionBaseline {
    /// Explicit marker for a position with no eligible players
    pub fn empty(position: Position, method: BaselineMethod, baseline_slot: usize) -> Self {
        Self {
            position,
            method,
            baseline_slot,
            baseline_points: 0.0,
            baseline_player: None,
            player_count: 0,
            scarcity: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player_count == 0
    }
}

/// A player with identity, consensus and value attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub entry: ConsensusEntry,
    pub vbd: VbdResult,
}

impl RankedPlayer {
    pub fn name(&self) -> &str {
        self.entry.name()
    }

    pub fn position(&self) -> Position {
        self.entry.position()
    }
}

/// Output of one ranking run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    pub method: BaselineMethod,

    /// All players, ordered by VORP descending
    pub players: Vec<RankedPlayer>,

    /// One entry per position, in [`Position::ALL`] order
    pub baselines: Vec<PositionBaseline>,

    /// Non-fatal findings from validation and matching
    pub warnings: Vec<RegistryWarning>,
}

impl Rankings {
    pub fn top(&self, limit: usize) -> &[RankedPlayer] {
        &self.players[..limit.min(self.players.len())]
    }

    pub fn by_position(&self, position: Position) -> Vec<&RankedPlayer> {
        self.players.iter().filter(|p| p.position() == position).collect()
    }

    pub fn baseline(&self, position: Position) -> Option<&PositionBaseline> {
        self.baselines.iter().find(|b| b.position == position)
    }

    /// Players of one position grouped by tier
    pub fn tier_groups(&self, position: Position) -> BTreeMap<u32, Vec<&RankedPlayer>> {
        let mut tiers: BTreeMap<u32, Vec<&RankedPlayer>> = BTreeMap::new();
        for player in self.by_position(position) {
            tiers.entry(player.vbd.tier).or_default().push(player);
        }
        tiers
    }

    pub fn find(&self, name: &str) -> Option<&RankedPlayer> {
        self.players.iter().find(|p| p.name() == name)
    }
}
