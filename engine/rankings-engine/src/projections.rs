//! Rank-based projection estimates for players no provider projected
//!
//! Historical season totals by position rank, scaled for the league's
//! scoring format. Ranks past the end of a curve fall off by five points per
//! rank down to a floor.

use crate::models::{ConsensusEntry, ScoringFormat};
use player_registry::Position;
use tracing::debug;

const QB_CURVE: &[f64] = &[
    380.0, 365.0, 350.0, 340.0, 330.0, 320.0, 310.0, 300.0, 290.0, 280.0, 270.0, 260.0, 250.0,
    240.0, 230.0, 220.0, 210.0, 200.0, 190.0, 180.0,
];

const RB_CURVE: &[f64] = &[
    350.0, 320.0, 300.0, 280.0, 265.0, 250.0, 240.0, 230.0, 220.0, 210.0, 200.0, 190.0, 180.0,
    170.0, 165.0, 160.0, 155.0, 150.0, 145.0, 140.0, 135.0, 130.0, 125.0, 120.0, 115.0, 110.0,
    105.0, 100.0, 95.0, 90.0, 85.0, 80.0, 75.0, 70.0, 65.0, 60.0,
];

const WR_CURVE: &[f64] = &[
    340.0, 320.0, 300.0, 285.0, 270.0, 260.0, 250.0, 240.0, 230.0, 220.0, 210.0, 200.0, 195.0,
    190.0, 185.0, 180.0, 175.0, 170.0, 165.0, 160.0, 155.0, 150.0, 145.0, 140.0, 135.0, 130.0,
    125.0, 120.0, 115.0, 110.0, 105.0, 100.0, 95.0, 90.0, 85.0, 80.0,
];

const TE_CURVE: &[f64] = &[
    280.0, 240.0, 210.0, 190.0, 170.0, 155.0, 145.0, 135.0, 125.0, 115.0, 105.0, 95.0, 85.0, 75.0,
    70.0, 65.0, 60.0, 55.0, 50.0, 45.0,
];

const K_CURVE: &[f64] = &[
    150.0, 145.0, 142.0, 140.0, 138.0, 136.0, 134.0, 132.0, 130.0, 128.0, 126.0, 124.0, 122.0,
    120.0, 118.0, 116.0, 114.0, 112.0, 110.0, 108.0,
];

const DST_CURVE: &[f64] = &[
    160.0, 150.0, 145.0, 140.0, 135.0, 130.0, 125.0, 120.0, 115.0, 110.0, 105.0, 100.0, 95.0,
    90.0, 85.0, 80.0, 75.0, 70.0, 65.0, 60.0,
];

/// Points lost per rank past the end of a curve
const EXTRAPOLATION_STEP: f64 = 5.0;

/// Lowest extrapolated estimate
const EXTRAPOLATION_FLOOR: f64 = 20.0;

/// Estimates season points from a player's rank within the position
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEstimator {
    scoring: ScoringFormat,
}

impl ProjectionEstimator {
    pub fn new(scoring: ScoringFormat) -> Self {
        Self { scoring }
    }

    fn curve(position: Position) -> &'static [f64] {
        match position {
            Position::QB => QB_CURVE,
            Position::RB => RB_CURVE,
            Position::WR => WR_CURVE,
            Position::TE => TE_CURVE,
            Position::K => K_CURVE,
            Position::DST => DST_CURVE,
        }
    }

    /// Multiplier for pass-catching positions under the scoring format
    pub fn adjustment(&self, position: Position) -> f64 {
        match (self.scoring, position) {
            (ScoringFormat::Standard, Position::RB) => 0.95,
            (ScoringFormat::Standard, Position::WR) => 0.90,
            (ScoringFormat::Standard, Position::TE) => 0.85,
            (ScoringFormat::Ppr, Position::RB) => 1.05,
            (ScoringFormat::Ppr, Position::WR) => 1.15,
            (ScoringFormat::Ppr, Position::TE) => 1.20,
            _ => 1.0,
        }
    }

    /// Estimated points for the player at `position_rank` (1 = best)
    pub fn estimate(&self, position: Position, position_rank: usize) -> f64 {
        let curve = Self::curve(position);
        let rank = position_rank.max(1);

        let base = match curve.get(rank - 1) {
            Some(points) => *points,
            None => {
                let last = curve[curve.len() - 1];
                let beyond = (rank - curve.len()) as f64;
                (last - beyond * EXTRAPOLATION_STEP).max(EXTRAPOLATION_FLOOR)
            }
        };

        base * self.adjustment(position)
    }

    /// Fill in points for ranked entries that have none, flagging them as estimated
    ///
    /// Entries must already carry their position rank.
    pub fn fill_missing(&self, entries: &mut [ConsensusEntry]) -> usize {
        let mut filled = 0;
        for entry in entries.iter_mut().filter(|e| e.projected_points.is_none()) {
            let points = self.estimate(entry.position(), entry.position_rank);
            debug!(
                "Estimated {:.1} points for {} ({}{})",
                points,
                entry.name(),
                entry.position(),
                entry.position_rank
            );
            entry.projected_points = Some(points);
            entry.points_estimated = true;
            filled += 1;
        }
        filled
    }
}

impl Default for ProjectionEstimator {
    fn default() -> Self {
        Self::new(ScoringFormat::HalfPpr)
    }
}
