//! Rankings Engine - Consensus rankings and value-based drafting
//!
//! Turns a complete batch of provider records into one ranked player list:
//!
//! 1. records are reconciled into players by [`player_registry`]
//! 2. each player's provider ranks and projections are folded into a
//!    weighted consensus ([`aggregation`])
//! 3. players without any projection get a rank-based estimate
//!    ([`projections`])
//! 4. a replacement baseline is chosen per position and every player gets a
//!    value over replacement and a tier ([`vbd`])
//!
//! The pipeline is pure and deterministic: the same records, configuration
//! and baseline method always produce the same output. Data problems are
//! returned as warnings; only configuration that leaves a baseline undefined
//! is an error.
//!
//! ```no_run
//! use rankings_engine::{build_rankings, BaselineMethod, RosterConfig, SourceRecord};
//!
//! let records = vec![
//!     SourceRecord::new("espn", "Josh Allen", "BUF", "QB", 1).with_points(390.0),
//!     SourceRecord::new("yahoo", "Josh Allen", "BUF", "QB", 2),
//! ];
//! let rankings = build_rankings(records, &RosterConfig::default(), BaselineMethod::Vorp)?;
//! for player in rankings.top(10) {
//!     println!("{} {:.1}", player.name(), player.vbd.vorp);
//! }
//! # Ok::<(), rankings_engine::RankingError>(())
//! ```

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod projections;
pub mod snapshot;
pub mod vbd;


pub use aggregation::{consensus_order, ConsensusAggregator};
pub use config::{MatchingConfig, RosterConfig};
pub use engine::{build_rankings, RankingEngine};
pub use error::{RankingError, Result};
pub use models::{
    BaselineMethod, ConsensusEntry, PositionBaseline, RankedPlayer, Rankings, ScoringFormat,
    VbdResult,
};
pub use projections::ProjectionEstimator;
pub use snapshot::SourceSnapshot;
pub use vbd::{assign_tiers, compute_vbd, VbdBoard};

pub use player_registry::{Position, RegistryWarning, ResolvedPlayer, SourceRecord};
