//! Value-based drafting: replacement baselines, VORP and tiers
//!
//! The three methodologies share one algorithm and differ only in which
//! slot of a position's pool counts as replacement level:
//!
//! | method | slot |
//! |--------|------|
//! | VOLS   | `teams × starters` |
//! | VORP   | `teams × (starters + bench)` |
//! | BEER   | VORP slot plus `beer_weight × teams × bench` |
//!
//! A pool smaller than the slot uses its last player as the baseline.

use crate::aggregation::consensus_order;
use crate::config::RosterConfig;
use crate::error::{RankingError, Result};
use crate::models::{BaselineMethod, ConsensusEntry, PositionBaseline, RankedPlayer, VbdResult};
use player_registry::Position;
use std::collections::BTreeMap;
use tracing::debug;

impl BaselineMethod {
    /// 1-based replacement slot for a position
    pub fn baseline_slot(&self, teams: u32, starters: u32, bench: u32, beer_weight: f64) -> usize {
        let teams = teams as usize;
        let starters = starters as usize;
        let bench = bench as usize;

        match self {
            BaselineMethod::Vols => teams.saturating_mul(starters),
            BaselineMethod::Vorp => teams.saturating_mul(starters.saturating_add(bench)),
            BaselineMethod::Beer => {
                let extra = (beer_weight * teams.saturating_mul(bench) as f64).round() as usize;
                teams.saturating_mul(starters.saturating_add(bench)).saturating_add(extra)
            }
        }
    }
}

/// Players with value figures attached, plus one baseline per position
#[derive(Debug, Clone, PartialEq)]
pub struct VbdBoard {
    /// Ordered by VORP descending across all positions
    pub players: Vec<RankedPlayer>,

    /// In [`Position::ALL`] order
    pub baselines: Vec<PositionBaseline>,
}

/// Compute baselines, VORP and tiers for a consensus pool
///
/// Fails only on configuration that leaves a baseline undefined: no teams,
/// or a position that has players but no starting slots.
pub fn compute_vbd(
    entries: Vec<ConsensusEntry>,
    method: BaselineMethod,
    config: &RosterConfig,
) -> Result<VbdBoard> {
    if config.teams == 0 {
        return Err(RankingError::InvalidTeamCount(config.teams));
    }

    let mut pools: BTreeMap<Position, Vec<ConsensusEntry>> = BTreeMap::new();
    for entry in entries {
        pools.entry(entry.position()).or_default().push(entry);
    }

    for (position, pool) in &pools {
        if config.starters(*position) == 0 {
            return Err(RankingError::NoStarters { position: *position, players: pool.len() });
        }
    }

    let mut players = Vec::new();
    let mut baselines = Vec::with_capacity(Position::ALL.len());

    for position in Position::ALL {
        let starters = config.starters(position);
        let slot =
            method.baseline_slot(config.teams, starters, config.bench(position), config.beer_weight);

        let mut pool = pools.remove(&position).unwrap_or_default();
        if pool.is_empty() {
            debug!("No eligible players at {}, baseline marked empty", position);
            baselines.push(PositionBaseline::empty(position, method, slot));
            continue;
        }

        pool.sort_by(|a, b| b.points().total_cmp(&a.points()).then_with(|| consensus_order(a, b)));

        let baseline_index = slot.min(pool.len()).max(1) - 1;
        let baseline_points = pool[baseline_index].points();
        let baseline_player = pool[baseline_index].name().to_string();

        let vorps: Vec<f64> = pool.iter().map(|e| e.points() - baseline_points).collect();
        let tiers = assign_tiers(&vorps, config.tier_gap_threshold);
        let scarcity = positional_scarcity(&vorps, config.teams, starters);

        debug!(
            "{} baseline: slot {} -> {} ({:.1} pts), {} players, {} tiers",
            position,
            slot,
            baseline_player,
            baseline_points,
            pool.len(),
            tiers.last().copied().unwrap_or(0)
        );

        baselines.push(PositionBaseline {
            position,
            method,
            baseline_slot: slot,
            baseline_points,
            baseline_player: Some(baseline_player),
            player_count: pool.len(),
            scarcity,
        });

        for (index, entry) in pool.into_iter().enumerate() {
            players.push(RankedPlayer {
                vbd: VbdResult {
                    position,
                    baseline_slot: slot,
                    baseline_points,
                    vorp: vorps[index],
                    tier: tiers[index],
                    position_value_rank: index + 1,
                    value_rank: 0,
                },
                entry,
            });
        }
    }

    players.sort_by(|a, b| {
        b.vbd.vorp.total_cmp(&a.vbd.vorp).then_with(|| consensus_order(&a.entry, &b.entry))
    });
    for (index, player) in players.iter_mut().enumerate() {
        player.vbd.value_rank = index + 1;
    }

    Ok(VbdBoard { players, baselines })
}

/// Tier numbers for a VORP sequence already sorted descending
///
/// A drop of at least `gap` between neighbours starts the next tier.
pub fn assign_tiers(vorps: &[f64], gap: f64) -> Vec<u32> {
    let mut tiers = Vec::with_capacity(vorps.len());
    let mut tier = 1;
    for (index, vorp) in vorps.iter().enumerate() {
        if index > 0 && vorps[index - 1] - vorp >= gap {
            tier += 1;
        }
        tiers.push(tier);
    }
    tiers
}

/// Relative VORP drop from the top player to the one at twice the league's starters
fn positional_scarcity(vorps: &[f64], teams: u32, starters: u32) -> f64 {
    let Some(&top) = vorps.first() else {
        return 0.0;
    };
    if top <= 0.0 {
        return 0.0;
    }
    let index = (starters as usize)
        .saturating_mul(teams as usize)
        .saturating_mul(2)
        .min(vorps.len() - 1);
    (top - vorps[index]) / top
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_registry::ResolvedPlayer;

    fn entry(name: &str, position: Position, points: f64, consensus_rank: f64) -> ConsensusEntry {
        ConsensusEntry {
            player: ResolvedPlayer {
                name: name.to_string(),
                team: "FA".to_string(),
                position,
                bye_week: None,
                key_name: name.to_lowercase(),
                sources: BTreeMap::new(),
            },
            consensus_rank,
            projected_points: Some(points),
            points_estimated: false,
            source_count: 1,
            ranks_by_source: BTreeMap::new(),
            min_rank: consensus_rank as u32,
            max_rank: consensus_rank as u32,
            rank_std_dev: 0.0,
            overall_rank: 0,
            position_rank: 0,
        }
    }

    fn pool(position: Position, points: &[f64]) -> Vec<ConsensusEntry> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| entry(&format!("{}{}", position, i + 1), position, *p, (i + 1) as f64))
            .collect()
    }

    fn league(teams: u32, starters: u32, bench: u32) -> RosterConfig {
        let mut config = RosterConfig::default();
        config.teams = teams;
        for position in Position::ALL {
            config.starters_per_position.insert(position, starters);
            config.bench_depth_offset.insert(position, bench);
        }
        config
    }

    #[test]
    fn test_baseline_slots() {
        assert_eq!(BaselineMethod::Vols.baseline_slot(12, 2, 2, 0.5), 24);
        assert_eq!(BaselineMethod::Vorp.baseline_slot(12, 2, 2, 0.5), 48);
        assert_eq!(BaselineMethod::Beer.baseline_slot(12, 2, 2, 0.5), 60);
        assert_eq!(BaselineMethod::Beer.baseline_slot(12, 2, 2, 0.0), 48);
        assert_eq!(BaselineMethod::Vorp.baseline_slot(10, 1, 0, 0.5), 10);
    }

    #[test]
    fn test_baseline_slot_saturates() {
        let max = u32::MAX;
        assert_eq!(BaselineMethod::Beer.baseline_slot(12, 2, 2, 1e30), usize::MAX);
        assert_eq!(BaselineMethod::Vorp.baseline_slot(max, max, max, 0.5), usize::MAX);
        assert_eq!(BaselineMethod::Vols.baseline_slot(max, max, 0, 0.0), (max as usize).pow(2));
        assert_eq!(positional_scarcity(&[100.0, 50.0], max, max), 0.5);
    }

    #[test]
    fn test_unbounded_roster_uses_last_player() {
        let mut config = league(1, 1, 1);
        config.beer_weight = 1e30;
        let board =
            compute_vbd(pool(Position::WR, &[200.0, 150.0, 90.0]), BaselineMethod::Beer, &config)
                .unwrap();

        let wr = board.baselines.iter().find(|b| b.position == Position::WR).unwrap();
        assert_eq!(wr.baseline_slot, usize::MAX);
        assert_eq!(wr.baseline_points, 90.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(assign_tiers(&[50.0, 48.0, 30.0, 29.0, 10.0], 15.0), vec![1, 1, 2, 2, 3]);
        // a drop equal to the gap starts a tier
        assert_eq!(assign_tiers(&[20.0, 5.0], 15.0), vec![1, 2]);
        assert_eq!(assign_tiers(&[20.0, 5.1], 15.0), vec![1, 1]);
        assert!(assign_tiers(&[], 10.0).is_empty());
    }

    #[test]
    fn test_vols_baseline_and_negative_vorp() {
        let config = league(2, 1, 1);
        let board = compute_vbd(pool(Position::QB, &[300.0, 280.0, 250.0]), BaselineMethod::Vols, &config)
            .unwrap();

        let qb = board.baselines.iter().find(|b| b.position == Position::QB).unwrap();
        assert_eq!(qb.baseline_slot, 2);
        assert_eq!(qb.baseline_points, 280.0);
        assert_eq!(qb.baseline_player.as_deref(), Some("QB2"));

        let vorps: Vec<f64> = board.players.iter().map(|p| p.vbd.vorp).collect();
        assert_eq!(vorps, vec![20.0, 0.0, -30.0]);
        assert_eq!(board.players.len(), 3);
    }

    #[test]
    fn test_underfilled_position_uses_last_player() {
        let config = league(1, 3, 2);
        let board =
            compute_vbd(pool(Position::TE, &[200.0, 150.0]), BaselineMethod::Vorp, &config).unwrap();

        let te = board.baselines.iter().find(|b| b.position == Position::TE).unwrap();
        assert_eq!(te.baseline_slot, 5);
        assert_eq!(te.baseline_points, 150.0);
        assert_eq!(board.players[1].vbd.vorp, 0.0);
    }

    #[test]
    fn test_zero_starters_with_players_is_config_error() {
        let mut config = RosterConfig::default();
        config.starters_per_position.insert(Position::QB, 0);

        let err = compute_vbd(pool(Position::QB, &[300.0]), BaselineMethod::Vorp, &config)
            .unwrap_err();
        assert!(matches!(err, RankingError::NoStarters { position: Position::QB, players: 1 }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_starters_without_players_is_fine() {
        let mut config = RosterConfig::default();
        config.starters_per_position.insert(Position::K, 0);

        let board = compute_vbd(pool(Position::QB, &[300.0]), BaselineMethod::Vorp, &config).unwrap();
        let k = board.baselines.iter().find(|b| b.position == Position::K).unwrap();
        assert!(k.is_empty());
    }

    #[test]
    fn test_every_position_has_a_baseline() {
        let board =
            compute_vbd(pool(Position::RB, &[250.0, 200.0]), BaselineMethod::Vorp, &RosterConfig::default())
                .unwrap();

        let positions: Vec<Position> = board.baselines.iter().map(|b| b.position).collect();
        assert_eq!(positions, Position::ALL.to_vec());
        assert_eq!(board.baselines.iter().filter(|b| b.is_empty()).count(), 5);

        let dst = board.baselines.iter().find(|b| b.position == Position::DST).unwrap();
        assert_eq!(dst.baseline_points, 0.0);
        assert_eq!(dst.baseline_player, None);
    }

    #[test]
    fn test_global_order_and_tie_break() {
        let config = league(2, 1, 0);
        let mut entries = pool(Position::QB, &[300.0, 250.0]);
        entries.extend(pool(Position::RB, &[260.0, 210.0]));
        // QB1 and RB1 both sit 50 above baseline; QB1 has the better consensus rank
        entries[2].consensus_rank = 3.0;

        let board = compute_vbd(entries, BaselineMethod::Vols, &config).unwrap();
        let names: Vec<&str> = board.players.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["QB1", "RB1", "QB2", "RB2"]);

        let value_ranks: Vec<usize> = board.players.iter().map(|p| p.vbd.value_rank).collect();
        assert_eq!(value_ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_scarcity() {
        // top 100 vorp, player at index 2 (2 × 1 starter × 1 team) has 40
        assert!((positional_scarcity(&[100.0, 70.0, 40.0, 10.0], 1, 1) - 0.6).abs() < 1e-9);
        // index clamps to the last player
        assert!((positional_scarcity(&[100.0, 50.0], 12, 2) - 0.5).abs() < 1e-9);
        assert_eq!(positional_scarcity(&[0.0, -5.0], 1, 1), 0.0);
        assert_eq!(positional_scarcity(&[], 1, 1), 0.0);
    }
}
