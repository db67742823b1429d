//! Consensus aggregation across providers

use crate::config::{RosterConfig, DEFAULT_SOURCE_WEIGHT};
use crate::models::ConsensusEntry;
use player_registry::{Position, ResolvedPlayer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Folds each resolved player's provider records into one consensus entry
#[derive(Debug, Clone, Default)]
pub struct ConsensusAggregator {
    weights: BTreeMap<String, f64>,
}

impl ConsensusAggregator {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(config.source_weights.clone())
    }

    fn weight(&self, provider: &str) -> f64 {
        self.weights.get(provider).copied().unwrap_or(DEFAULT_SOURCE_WEIGHT)
    }

    /// Weighted consensus for a single player
    ///
    /// Rank is averaged over every source; points only over the sources
    /// that supplied a figure.
    pub fn aggregate(&self, player: &ResolvedPlayer) -> ConsensusEntry {
        let mut rank_sum = 0.0;
        let mut rank_weight = 0.0;
        let mut points_sum = 0.0;
        let mut points_weight = 0.0;
        let mut ranks_by_source = BTreeMap::new();

        for (provider, record) in &player.sources {
            let weight = self.weight(provider);
            rank_sum += weight * f64::from(record.rank);
            rank_weight += weight;

            if let Some(points) = record.projected_points {
                points_sum += weight * points;
                points_weight += weight;
            }

            ranks_by_source.insert(provider.clone(), record.rank);
        }

        let consensus_rank = if rank_weight > 0.0 { rank_sum / rank_weight } else { 0.0 };
        let projected_points = (points_weight > 0.0).then(|| points_sum / points_weight);

        let min_rank = ranks_by_source.values().copied().min().unwrap_or(0);
        let max_rank = ranks_by_source.values().copied().max().unwrap_or(0);
        let ranks: Vec<f64> = ranks_by_source.values().map(|r| f64::from(*r)).collect();

        ConsensusEntry {
            player: player.clone(),
            consensus_rank,
            projected_points,
            points_estimated: false,
            source_count: player.source_count(),
            rank_std_dev: sample_std_dev(&ranks),
            ranks_by_source,
            min_rank,
            max_rank,
            overall_rank: 0,
            position_rank: 0,
        }
    }

    /// Aggregate every player and number them in consensus order
    pub fn rank_all(&self, players: &[ResolvedPlayer]) -> Vec<ConsensusEntry> {
        let mut entries: Vec<ConsensusEntry> = players.iter().map(|p| self.aggregate(p)).collect();
        entries.sort_by(consensus_order);

        let mut per_position: HashMap<Position, usize> = HashMap::new();
        for (index, entry) in entries.iter_mut().enumerate() {
            let position_rank = per_position.entry(entry.position()).or_insert(0);
            *position_rank += 1;

            entry.overall_rank = index + 1;
            entry.position_rank = *position_rank;
        }

        debug!("Aggregated consensus for {} players", entries.len());
        entries
    }
}

/// Consensus ordering: rank ascending, points descending, more sources first, then name
///
/// Position and team settle the rare case of two players sharing a name.
pub fn consensus_order(a: &ConsensusEntry, b: &ConsensusEntry) -> Ordering {
    a.consensus_rank
        .total_cmp(&b.consensus_rank)
        .then_with(|| compare_points_desc(a.projected_points, b.projected_points))
        .then_with(|| b.source_count.cmp(&a.source_count))
        .then_with(|| a.player.name.cmp(&b.player.name))
        .then_with(|| a.player.position.cmp(&b.player.position))
        .then_with(|| a.player.team.cmp(&b.player.team))
}

/// Higher points first; a missing figure sorts after any figure
fn compare_points_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
