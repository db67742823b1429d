//! Player Registry - Reconciles player identities across ranking providers
//!
//! Each provider names, labels and abbreviates players its own way. This
//! crate normalizes those spellings and groups every provider's record for
//! the same real player into one [`ResolvedPlayer`], using exact keys first
//! and fuzzy name similarity as a fallback.

pub mod normalization;
pub mod registry;
pub mod types;

pub use normalization::{normalize, Normalizer};
pub use registry::{MatchPolicy, PlayerMatcher, PlayerRegistry};
pub use types::{
    LookupError, NormalizedKey, Position, RecordIssue, RegistryWarning, ResolvedPlayer,
    SourceRecord,
};
