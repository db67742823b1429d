//! Ranking pipeline: match, aggregate, estimate, value

use crate::aggregation::ConsensusAggregator;
use crate::config::RosterConfig;
use crate::error::Result;
use crate::models::{BaselineMethod, Rankings};
use crate::projections::ProjectionEstimator;
use crate::vbd::compute_vbd;
use player_registry::{PlayerMatcher, PlayerRegistry, SourceRecord};
use tracing::info;

/// Runs complete ranking passes for one validated league configuration
///
/// Each call to [`RankingEngine::build_rankings`] is independent; nothing
/// carries over between runs.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: RosterConfig,
    matcher: PlayerMatcher,
    aggregator: ConsensusAggregator,
    estimator: ProjectionEstimator,
}

impl RankingEngine {
    pub fn new(config: RosterConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            matcher: PlayerMatcher::with_normalizer(config.match_policy(), config.normalizer()),
            aggregator: ConsensusAggregator::from_config(&config),
            estimator: ProjectionEstimator::new(config.scoring),
            config,
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Reconcile records into players without ranking them
    pub fn resolve(&self, records: Vec<SourceRecord>) -> PlayerRegistry {
        self.matcher.resolve(records)
    }

    /// Build the full ranked list for a complete batch of records
    pub fn build_rankings(
        &self,
        records: Vec<SourceRecord>,
        method: BaselineMethod,
    ) -> Result<Rankings> {
        let record_count = records.len();
        info!("Building {} rankings from {} source records", method, record_count);

        let (players, warnings) = self.resolve(records).into_parts();

        let mut entries = self.aggregator.rank_all(&players);
        let estimated = self.estimator.fill_missing(&mut entries);

        let board = compute_vbd(entries, method, &self.config)?;

        info!(
            "Ranked {} players ({} with estimated points, {} warnings)",
            board.players.len(),
            estimated,
            warnings.len()
        );

        Ok(Rankings { method, players: board.players, baselines: board.baselines, warnings })
    }
}

/// One-shot pipeline run with an explicit configuration
pub fn build_rankings(
    records: Vec<SourceRecord>,
    config: &RosterConfig,
    method: BaselineMethod,
) -> Result<Rankings> {
    RankingEngine::new(config.clone())?.build_rankings(records, method)
}
