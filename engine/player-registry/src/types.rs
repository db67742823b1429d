use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fantasy position codes recognised by the registry
///
/// Serialized as the bare code ("QB", "DST") so it can key maps in both
/// JSON snapshots and TOML configuration. Parsing accepts provider aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    /// Every position, in display order
    pub const ALL: [Position; 6] =
        [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DST];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Position {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::normalization::normalize_position(s)
            .ok_or_else(|| LookupError::UnknownPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

/// One provider's view of one player for one scoring format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Provider identifier (e.g., "fantasypros", "espn")
    pub provider: String,

    /// Player name exactly as the provider displays it
    pub name: String,

    /// Team abbreviation as supplied (may be an alias such as "JAC")
    pub team: String,

    /// Position label as supplied (may be an alias such as "D/ST" or "RB12")
    pub position: String,

    /// Provider rank, 1 = best
    pub rank: u32,

    /// Projected fantasy points, when the provider publishes them
    #[serde(default)]
    pub projected_points: Option<f64>,

    #[serde(default)]
    pub bye_week: Option<u8>,
}

impl SourceRecord {
    pub fn new(
        provider: impl Into<String>,
        name: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<String>,
        rank: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            name: name.into(),
            team: team.into(),
            position: position.into(),
            rank,
            projected_points: None,
            bye_week: None,
        }
    }

    pub fn with_points(mut self, points: f64) -> Self {
        self.projected_points = Some(points);
        self
    }

    pub fn with_bye_week(mut self, bye_week: u8) -> Self {
        self.bye_week = Some(bye_week);
        self
    }
}

/// Comparable identity derived from a record's raw name, team and position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedKey {
    /// Case-folded, punctuation and suffix free name
    pub name: String,

    /// Canonical team code ("FA" when unsigned)
    pub team: String,

    /// Canonical position; `None` when the label was not recognised
    pub position: Option<Position>,
}

impl NormalizedKey {
    /// Sentinel returned for input that cannot identify a player
    pub fn invalid() -> Self {
        Self { name: String::new(), team: String::new(), position: None }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.position.is_some()
    }

    /// The (name, position) pair used for exact matching
    pub fn identity(&self) -> Option<(&str, Position)> {
        match self.position {
            Some(position) if !self.name.is_empty() => Some((self.name.as_str(), position)),
            _ => None,
        }
    }
}

/// The canonical identity for one real player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlayer {
    /// Display name taken from the highest-priority contributing provider
    pub name: String,

    pub team: String,

    pub position: Position,

    pub bye_week: Option<u8>,

    /// Normalized name used for matching
    pub key_name: String,

    /// Contributing records keyed by provider; one record per provider
    pub sources: BTreeMap<String, SourceRecord>,
}

impl ResolvedPlayer {
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn contributes(&self, provider: &str) -> bool {
        self.sources.contains_key(provider)
    }

    /// Teams reported by the contributing providers that differ from the canonical one
    pub fn conflicting_teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = self
            .sources
            .values()
            .filter(|record| {
                crate::normalization::normalize(&record.name, &record.team, &record.position).team
                    != self.team
            })
            .map(|record| record.team.as_str())
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }
}

/// Why a source record failed shape validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordIssue {
    MissingName,
    NonPositiveRank,
    RankOutOfRange(u32),
    UnknownProvider,
    UnknownPosition(String),
    NonFinitePoints,
    InvalidByeWeek(u8),
}

impl RecordIssue {
    /// Whether the whole record is discarded, rather than a single field
    pub fn drops_record(&self) -> bool {
        !matches!(self, RecordIssue::NonFinitePoints | RecordIssue::InvalidByeWeek(_))
    }
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::MissingName => write!(f, "missing player name"),
            RecordIssue::NonPositiveRank => write!(f, "rank must be at least 1"),
            RecordIssue::RankOutOfRange(rank) => write!(f, "rank {rank} exceeds the accepted range"),
            RecordIssue::UnknownProvider => write!(f, "unknown provider"),
            RecordIssue::UnknownPosition(position) => write!(f, "unknown position '{position}'"),
            RecordIssue::NonFinitePoints => write!(f, "projected points are not a finite number"),
            RecordIssue::InvalidByeWeek(week) => write!(f, "bye week {week} outside 1-18"),
        }
    }
}

/// Non-fatal findings accumulated while reconciling a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RegistryWarning {
    /// A record (or one of its fields) failed validation
    DataQuality { provider: String, name: String, issue: RecordIssue },

    /// A provider tried to contribute a second record to the same player
    DuplicateContribution {
        provider: String,
        name: String,
        player: String,
        rank: u32,
        projected_points: Option<f64>,
    },

    /// A fuzzy decision landed close to the threshold or needed a tie-break
    AmbiguousMatch {
        provider: String,
        name: String,
        candidate: String,
        score: f64,
        accepted: bool,
        tied: usize,
    },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryWarning::DataQuality { provider, name, issue } => {
                write!(f, "[{provider}] '{name}': {issue}")
            }
            RegistryWarning::DuplicateContribution { provider, name, player, rank, .. } => {
                write!(
                    f,
                    "[{provider}] '{name}' (rank {rank}) duplicates an existing contribution to '{player}'; ignored"
                )
            }
            RegistryWarning::AmbiguousMatch { provider, name, candidate, score, accepted, tied } => {
                let verdict = if *accepted { "merged into" } else { "kept apart from" };
                write!(f, "[{provider}] '{name}' {verdict} '{candidate}' at similarity {score:.2}")?;
                if *tied > 1 {
                    write!(f, " ({tied} candidates tied)")?;
                }
                Ok(())
            }
        }
    }
}

/// Errors that can occur during registry lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Player not found in registry
    PlayerNotFound(String),

    /// Position label not recognised
    UnknownPosition(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::PlayerNotFound(name) => {
                write!(f, "Player '{name}' not found in registry")
            }
            LookupError::UnknownPosition(position) => {
                write!(f, "Unknown position: {position}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parses_aliases() {
        assert_eq!("qb".parse::<Position>().unwrap(), Position::QB);
        assert_eq!("D/ST".parse::<Position>().unwrap(), Position::DST);
        assert_eq!("RB12".parse::<Position>().unwrap(), Position::RB);
        assert!("LB".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_serializes_as_code() {
        let json = serde_json::to_string(&Position::DST).unwrap();
        assert_eq!(json, "\"DST\"");

        let parsed: Position = serde_json::from_str("\"DEF\"").unwrap();
        assert_eq!(parsed, Position::DST);
    }

    #[test]
    fn test_source_record_defaults_optional_fields() {
        let json = r#"{"provider":"espn","name":"Josh Allen","team":"BUF","position":"QB","rank":2}"#;
        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.projected_points, None);
        assert_eq!(record.bye_week, None);
    }

    #[test]
    fn test_invalid_key_sentinel() {
        let key = NormalizedKey::invalid();
        assert!(!key.is_valid());
        assert!(key.identity().is_none());
    }

    #[test]
    fn test_record_issue_severity() {
        assert!(RecordIssue::MissingName.drops_record());
        assert!(RecordIssue::UnknownProvider.drops_record());
        assert!(!RecordIssue::InvalidByeWeek(22).drops_record());
        assert!(!RecordIssue::NonFinitePoints.drops_record());
    }
}
