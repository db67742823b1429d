use crate::normalization::{display_name, name_similarity, Normalizer};
use crate::types::{
    LookupError, NormalizedKey, Position, RecordIssue, RegistryWarning, ResolvedPlayer,
    SourceRecord,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Tunables for reconciling records into players
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Minimum similarity (0-100) for a fuzzy merge
    pub threshold: f64,

    /// Distance from the threshold inside which a fuzzy decision is reported
    pub ambiguity_band: f64,

    /// Providers in tie-break priority order, highest first
    pub provider_priority: Vec<String>,

    /// Accept providers missing from `provider_priority`
    pub accept_unlisted_providers: bool,

    /// Largest provider rank accepted
    pub max_rank: u32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: 90.0,
            ambiguity_band: 5.0,
            provider_priority: Vec::new(),
            accept_unlisted_providers: true,
            max_rank: 500,
        }
    }
}

impl MatchPolicy {
    fn priority_of(&self, provider: &str) -> usize {
        self.provider_priority
            .iter()
            .position(|p| p == provider)
            .unwrap_or(self.provider_priority.len())
    }

    fn is_known_provider(&self, provider: &str) -> bool {
        !provider.trim().is_empty()
            && (self.accept_unlisted_providers || self.provider_priority.iter().any(|p| p == provider))
    }
}

/// A record that passed validation, with its normalized identity
#[derive(Debug)]
struct Candidate {
    record: SourceRecord,
    key_name: String,
    team: String,
    position: Position,
    priority: usize,
}

/// Decides which source records describe the same real player
///
/// Exact (name, position) keys are grouped first; records left on their own
/// are then offered to existing players of the same position by fuzzy name
/// similarity. All ordering is fixed by provider priority, so the outcome
/// does not depend on the order records arrive in.
#[derive(Debug, Clone, Default)]
pub struct PlayerMatcher {
    normalizer: Normalizer,
    policy: MatchPolicy,
}

impl PlayerMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { normalizer: Normalizer::new(), policy }
    }

    pub fn with_normalizer(policy: MatchPolicy, normalizer: Normalizer) -> Self {
        Self { normalizer, policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Reconcile a complete batch of records into a registry
    pub fn resolve(&self, mut records: Vec<SourceRecord>) -> PlayerRegistry {
        let total = records.len();
        let mut warnings = Vec::new();

        // Fix the order up front so warnings and first-write-wins never
        // depend on the order records arrived in
        records.sort_by(|a, b| compare_records(&self.policy, a, b));

        let mut candidates: Vec<Candidate> =
            records.into_iter().filter_map(|r| self.admit(r, &mut warnings)).collect();
        candidates.sort_by(compare_candidates);

        let admitted = candidates.len();

        // Phase 1: exact key groups, in first-seen (priority) order
        let mut groups: Vec<Vec<Candidate>> = Vec::new();
        let mut group_index: HashMap<(String, Position), usize> = HashMap::new();
        for candidate in candidates {
            let key = (candidate.key_name.clone(), candidate.position);
            match group_index.get(&key) {
                Some(&i) => groups[i].push(candidate),
                None => {
                    group_index.insert(key, groups.len());
                    groups.push(vec![candidate]);
                }
            }
        }

        let seeded: Vec<ResolvedPlayer> =
            groups.into_iter().filter_map(|group| seed_player(group, &mut warnings)).collect();
        let (mut players, singles): (Vec<_>, Vec<_>) =
            seeded.into_iter().partition(|player| player.source_count() > 1);
        let exact = players.len();

        // Phase 2: fuzzy fallback for records nothing else agreed with
        let mut fuzzy = 0;
        for single in singles {
            match self.best_fuzzy_match(&single, &players, &mut warnings) {
                Some(index) => {
                    merge_into(&mut players[index], single);
                    fuzzy += 1;
                }
                None => players.push(single),
            }
        }

        for player in &players {
            let conflicts = player.conflicting_teams();
            if !conflicts.is_empty() {
                debug!(
                    "{} ({}) listed under other teams by some providers: {:?}",
                    player.name, player.team, conflicts
                );
            }
        }

        info!(
            "Resolved {} records ({} admitted) into {} players: {} exact groups, {} fuzzy merges, {} warnings",
            total,
            admitted,
            players.len(),
            exact,
            fuzzy,
            warnings.len()
        );

        PlayerRegistry::new(self.normalizer.clone(), players, warnings)
    }

    /// Validate a record and compute its key, reporting problems as warnings
    fn admit(
        &self,
        mut record: SourceRecord,
        warnings: &mut Vec<RegistryWarning>,
    ) -> Option<Candidate> {
        let mut report = |record: &SourceRecord, issue: RecordIssue| {
            warn!("Data quality: [{}] '{}': {}", record.provider, record.name, issue);
            warnings.push(RegistryWarning::DataQuality {
                provider: record.provider.clone(),
                name: record.name.clone(),
                issue,
            });
        };

        if !self.policy.is_known_provider(&record.provider) {
            report(&record, RecordIssue::UnknownProvider);
            return None;
        }
        if record.rank == 0 {
            report(&record, RecordIssue::NonPositiveRank);
            return None;
        }
        if record.rank > self.policy.max_rank {
            let rank = record.rank;
            report(&record, RecordIssue::RankOutOfRange(rank));
            return None;
        }

        let key: NormalizedKey =
            self.normalizer.normalize(&record.name, &record.team, &record.position);
        if key.name.is_empty() {
            report(&record, RecordIssue::MissingName);
            return None;
        }
        let Some(position) = key.position else {
            let label = record.position.clone();
            report(&record, RecordIssue::UnknownPosition(label));
            return None;
        };

        if record.projected_points.is_some_and(|p| !p.is_finite()) {
            report(&record, RecordIssue::NonFinitePoints);
            record.projected_points = None;
        }
        if let Some(week) = record.bye_week.filter(|w| !(1..=18).contains(w)) {
            report(&record, RecordIssue::InvalidByeWeek(week));
            record.bye_week = None;
        }

        Some(Candidate {
            priority: self.policy.priority_of(&record.provider),
            key_name: key.name,
            team: key.team,
            position,
            record,
        })
    }

    /// Pick the existing player a lone record should join, if any
    fn best_fuzzy_match(
        &self,
        single: &ResolvedPlayer,
        players: &[ResolvedPlayer],
        warnings: &mut Vec<RegistryWarning>,
    ) -> Option<usize> {
        let (provider, record) = single.sources.iter().next()?;

        let mut scored: Vec<(usize, f64)> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.position == single.position && !p.contributes(provider))
            .map(|(i, p)| (i, name_similarity(&single.key_name, &p.key_name)))
            .collect();
        if scored.is_empty() {
            return None;
        }

        // Score, then team agreement, then corroboration, then first seen
        scored.sort_by(|(ia, sa), (ib, sb)| {
            let (a, b) = (&players[*ia], &players[*ib]);
            sb.total_cmp(sa)
                .then_with(|| (b.team == single.team).cmp(&(a.team == single.team)))
                .then_with(|| b.source_count().cmp(&a.source_count()))
                .then_with(|| ia.cmp(ib))
        });

        let (best_index, best_score) = scored[0];
        let accepted = best_score >= self.policy.threshold;
        let tied = scored.iter().take_while(|(_, s)| *s == best_score).count();
        let near_threshold =
            (best_score - self.policy.threshold).abs() <= self.policy.ambiguity_band;
        let candidate = &players[best_index];

        if near_threshold || (accepted && tied > 1) {
            warn!(
                "Ambiguous match: [{}] '{}' vs '{}' scored {:.2} (threshold {:.2}, {} tied)",
                provider, record.name, candidate.name, best_score, self.policy.threshold, tied
            );
            warnings.push(RegistryWarning::AmbiguousMatch {
                provider: provider.clone(),
                name: record.name.clone(),
                candidate: candidate.name.clone(),
                score: best_score,
                accepted,
                tied,
            });
        }

        if accepted {
            debug!(
                "Fuzzy matched '{}' -> '{}' (score: {:.2})",
                record.name, candidate.name, best_score
            );
            Some(best_index)
        } else {
            None
        }
    }
}

fn compare_records(policy: &MatchPolicy, a: &SourceRecord, b: &SourceRecord) -> Ordering {
    policy
        .priority_of(&a.provider)
        .cmp(&policy.priority_of(&b.provider))
        .then_with(|| a.provider.cmp(&b.provider))
        .then_with(|| a.rank.cmp(&b.rank))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.team.cmp(&b.team))
        .then_with(|| a.position.cmp(&b.position))
        .then_with(|| a.bye_week.cmp(&b.bye_week))
        .then_with(|| match (a.projected_points, b.projected_points) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        })
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.record.provider.cmp(&b.record.provider))
        .then_with(|| a.record.rank.cmp(&b.record.rank))
        .then_with(|| a.key_name.cmp(&b.key_name))
        .then_with(|| a.record.name.cmp(&b.record.name))
        .then_with(|| a.team.cmp(&b.team))
}

/// Build a player from one exact-key group; first record per provider wins
fn seed_player(
    group: Vec<Candidate>,
    warnings: &mut Vec<RegistryWarning>,
) -> Option<ResolvedPlayer> {
    let mut group = group.into_iter();
    let lead = group.next()?;

    let mut player = ResolvedPlayer {
        name: display_name(&lead.record.name),
        team: lead.team,
        position: lead.position,
        bye_week: lead.record.bye_week,
        key_name: lead.key_name,
        sources: BTreeMap::new(),
    };
    player.sources.insert(lead.record.provider.clone(), lead.record);

    for candidate in group {
        add_source(&mut player, candidate.record, warnings);
    }
    Some(player)
}

fn add_source(
    player: &mut ResolvedPlayer,
    record: SourceRecord,
    warnings: &mut Vec<RegistryWarning>,
) {
    if player.contributes(&record.provider) {
        warn!(
            "Conflict: [{}] already contributes to '{}'; ignoring '{}' (rank {}, points {:?})",
            record.provider, player.name, record.name, record.rank, record.projected_points
        );
        warnings.push(RegistryWarning::DuplicateContribution {
            provider: record.provider,
            name: record.name,
            player: player.name.clone(),
            rank: record.rank,
            projected_points: record.projected_points,
        });
        return;
    }

    if player.bye_week.is_none() {
        player.bye_week = record.bye_week;
    }
    player.sources.insert(record.provider.clone(), record);
}

fn merge_into(target: &mut ResolvedPlayer, single: ResolvedPlayer) {
    for (provider, record) in single.sources {
        if target.bye_week.is_none() {
            target.bye_week = record.bye_week;
        }
        target.sources.insert(provider, record);
    }
}

/// Registry of resolved players produced by one matching run
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    normalizer: Normalizer,

    players: Vec<ResolvedPlayer>,

    /// Normalized (name, position) -> index into `players`
    by_key: HashMap<(String, Position), usize>,

    warnings: Vec<RegistryWarning>,
}

impl PlayerRegistry {
    fn new(
        normalizer: Normalizer,
        players: Vec<ResolvedPlayer>,
        warnings: Vec<RegistryWarning>,
    ) -> Self {
        let mut by_key = HashMap::new();
        for (index, player) in players.iter().enumerate() {
            by_key.insert((player.key_name.clone(), player.position), index);
            for record in player.sources.values() {
                let key = normalizer.normalize(&record.name, &record.team, &record.position);
                if let Some((name, position)) = key.identity() {
                    by_key.entry((name.to_string(), position)).or_insert(index);
                }
            }
        }
        Self { normalizer, players, by_key, warnings }
    }

    /// Get a player by any raw name variant a provider used
    pub fn get_by_name(&self, name: &str, position: &str) -> Result<&ResolvedPlayer, LookupError> {
        let position_code = position.parse::<Position>()?;
        let key = self.normalizer.normalize(name, "", position_code.as_str());
        key.identity()
            .and_then(|(key_name, pos)| self.by_key.get(&(key_name.to_string(), pos)))
            .map(|&index| &self.players[index])
            .ok_or_else(|| LookupError::PlayerNotFound(name.to_string()))
    }

    /// Case-insensitive substring search over canonical names
    pub fn search_players(&self, query: &str) -> Vec<&ResolvedPlayer> {
        let query_lower = query.to_lowercase();
        self.players.iter().filter(|p| p.name.to_lowercase().contains(&query_lower)).collect()
    }

    pub fn players(&self) -> &[ResolvedPlayer] {
        &self.players
    }

    pub fn warnings(&self) -> &[RegistryWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ResolvedPlayer>, Vec<RegistryWarning>) {
        (self.players, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy(threshold: f64) -> MatchPolicy {
        MatchPolicy {
            threshold,
            provider_priority: vec!["fantasypros".into(), "espn".into(), "yahoo".into()],
            ..MatchPolicy::default()
        }
    }

    fn record(provider: &str, name: &str, team: &str, position: &str, rank: u32) -> SourceRecord {
        SourceRecord::new(provider, name, team, position, rank)
    }

    #[test]
    fn test_exact_match_groups_across_providers() {
        let matcher = PlayerMatcher::new(policy(90.0));
        let registry = matcher.resolve(vec![
            record("fantasypros", "A.J. Brown", "PHI", "WR", 8),
            record("espn", "AJ Brown", "PHI", "WR", 10),
            record("yahoo", "A.J. Brown", "PHI", "WR1", 7),
        ]);

        assert_eq!(registry.len(), 1);
        let player = &registry.players()[0];
        assert_eq!(player.name, "A.J. Brown");
        assert_eq!(player.source_count(), 3);
        assert!(registry.warnings().is_empty());
    }

    #[test]
    fn test_same_name_different_position_stays_apart() {
        let matcher = PlayerMatcher::new(policy(90.0));
        let registry = matcher.resolve(vec![
            record("fantasypros", "Josh Allen", "BUF", "QB", 1),
            record("espn", "Josh Allen", "JAX", "DE", 300),
            record("espn", "Josh Allen", "BUF", "QB", 2),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.warnings().len(), 1);
        assert!(matches!(
            registry.warnings()[0],
            RegistryWarning::DataQuality { issue: RecordIssue::UnknownPosition(_), .. }
        ));
    }

    #[test]
    fn test_fuzzy_threshold_edge() {
        let records = vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "TEN", "RB", 42),
        ];

        // similarity is 92.86
        let merged = PlayerMatcher::new(policy(92.0)).resolve(records.clone());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.players()[0].source_count(), 2);

        let separate = PlayerMatcher::new(policy(93.0)).resolve(records);
        assert_eq!(separate.len(), 2);
    }

    #[test]
    fn test_fuzzy_merge_ignores_team_mismatch() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "NYJ", "RB", 42),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.players()[0].team, "TEN");
        assert_eq!(registry.players()[0].conflicting_teams(), vec!["NYJ"]);
    }

    #[test]
    fn test_defense_team_from_name_is_not_a_conflict() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "San Francisco 49ers", "SF", "DST", 1),
            record("espn", "49ers D/ST", "", "DEF", 2),
            record("yahoo", "SF Defense", "FA", "D/ST", 3),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.players()[0].team, "SF");
        assert!(registry.players()[0].conflicting_teams().is_empty());
    }

    #[test]
    fn test_fuzzy_requires_same_position() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "TEN", "WR", 42),
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_tie_break_prefers_team_match() {
        // "mike williams" sits one substitution from both existing spellings
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Mike Willians", "NYJ", "WR", 50),
            record("fantasypros", "Mike Williamz", "PIT", "WR", 60),
            record("espn", "Mike Williams", "PIT", "WR", 55),
        ]);

        assert_eq!(registry.len(), 2);
        let pit = registry.players().iter().find(|p| p.team == "PIT").unwrap();
        assert!(pit.contributes("espn"));
        assert!(registry
            .warnings()
            .iter()
            .any(|w| matches!(w, RegistryWarning::AmbiguousMatch { tied: 2, accepted: true, .. })));
    }

    #[test]
    fn test_tie_break_prefers_corroborated_player() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Mike Williamz", "PIT", "WR", 60),
            record("fantasypros", "Mike Willians", "NYJ", "WR", 50),
            record("espn", "Mike Willians", "NYJ", "WR", 51),
            record("yahoo", "Mike Williams", "FA", "WR", 55),
        ]);

        let corroborated = registry.players().iter().find(|p| p.team == "NYJ").unwrap();
        assert_eq!(corroborated.source_count(), 3);
        assert!(corroborated.contributes("yahoo"));
    }

    #[test]
    fn test_tie_break_falls_back_to_provider_priority() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("espn", "Mike Willians", "FA", "WR", 60),
            record("fantasypros", "Mike Williamz", "FA", "WR", 50),
            record("yahoo", "Mike Williams", "FA", "WR", 55),
        ]);

        let first = &registry.players()[0];
        assert_eq!(first.name, "Mike Williamz");
        assert!(first.contributes("yahoo"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_contribution_is_first_write_wins() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("espn", "Travis Kelce", "KC", "TE", 30).with_points(200.0),
            record("espn", "Travis Kelce", "KC", "TE", 5).with_points(250.0),
        ]);

        assert_eq!(registry.len(), 1);
        let player = &registry.players()[0];
        // sorted by rank within the provider, so rank 5 is seen first
        assert_eq!(player.sources["espn"].rank, 5);
        assert_eq!(registry.warnings().len(), 1);
        assert!(matches!(
            registry.warnings()[0],
            RegistryWarning::DuplicateContribution { rank: 30, .. }
        ));
    }

    #[test]
    fn test_provider_never_fuzzy_merges_with_itself() {
        let registry = PlayerMatcher::new(policy(80.0)).resolve(vec![
            record("espn", "Mike Williams", "NYJ", "WR", 50),
            record("espn", "Mike Willams", "PIT", "WR", 55),
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_invalid_records_are_dropped_with_warnings() {
        let mut strict = policy(90.0);
        strict.accept_unlisted_providers = false;

        let registry = PlayerMatcher::new(strict).resolve(vec![
            record("fantasypros", "", "KC", "QB", 1),
            record("fantasypros", "Patrick Mahomes", "KC", "QB", 0),
            record("fantasypros", "Patrick Mahomes", "KC", "QB", 501),
            record("sketchy", "Patrick Mahomes", "KC", "QB", 3),
            record("espn", "Patrick Mahomes II", "KC", "QB", 4),
        ]);

        assert_eq!(registry.len(), 1);
        let issues: Vec<&RecordIssue> = registry
            .warnings()
            .iter()
            .filter_map(|w| match w {
                RegistryWarning::DataQuality { issue, .. } => Some(issue),
                _ => None,
            })
            .collect();
        assert_eq!(
            issues,
            // provider priority, then rank
            vec![
                &RecordIssue::NonPositiveRank,
                &RecordIssue::MissingName,
                &RecordIssue::RankOutOfRange(501),
                &RecordIssue::UnknownProvider,
            ]
        );
    }

    #[test]
    fn test_bad_fields_are_cleared_not_fatal() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![record(
            "espn", "Bijan Robinson", "ATL", "RB", 1,
        )
        .with_points(f64::NAN)
        .with_bye_week(30)]);

        assert_eq!(registry.len(), 1);
        let source = &registry.players()[0].sources["espn"];
        assert_eq!(source.projected_points, None);
        assert_eq!(source.bye_week, None);
        assert_eq!(registry.warnings().len(), 2);
    }

    #[test]
    fn test_near_threshold_rejection_is_reported() {
        let registry = PlayerMatcher::new(policy(95.0)).resolve(vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "TEN", "RB", 42),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(matches!(
            registry.warnings()[0],
            RegistryWarning::AmbiguousMatch { accepted: false, tied: 1, .. }
        ));

        // a score exactly one band away still counts as near
        let score = name_similarity("chris johnson", "chris johnston");
        let mut edge = policy(95.0);
        edge.ambiguity_band = 95.0 - score;
        let registry = PlayerMatcher::new(edge).resolve(vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "TEN", "RB", 42),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.warnings().len(), 1);
    }

    #[test]
    fn test_bye_week_taken_from_first_source_that_has_one() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Puka Nacua", "LAR", "WR", 12),
            record("espn", "Puka Nacua", "LA", "WR", 11).with_bye_week(8),
        ]);
        assert_eq!(registry.players()[0].bye_week, Some(8));
        assert_eq!(registry.players()[0].team, "LAR");
    }

    #[test]
    fn test_lookup_by_variant_name() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Kenneth Walker III", "SEA", "RB", 20),
            record("espn", "Kenneth Walker", "SEA", "RB", 22),
        ]);

        let player = registry.get_by_name("K. Walker III", "RB").unwrap();
        assert_eq!(player.name, "Kenneth Walker III");
        assert!(registry.get_by_name("Kenneth Walker", "WR").is_err());
        assert_eq!(
            registry.get_by_name("Kenneth Walker", "LB"),
            Err(LookupError::UnknownPosition("LB".to_string()))
        );
    }

    #[test]
    fn test_search_players() {
        let registry = PlayerMatcher::new(policy(90.0)).resolve(vec![
            record("fantasypros", "Lamar Jackson", "BAL", "QB", 3),
            record("fantasypros", "Josh Allen", "BUF", "QB", 1),
        ]);

        let results = registry.search_players("lamar");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Lamar Jackson");
    }

    fn mixed_batch() -> Vec<SourceRecord> {
        vec![
            record("fantasypros", "Chris Johnson", "TEN", "RB", 40),
            record("espn", "Chris Johnston", "TEN", "RB", 42),
            record("yahoo", "Chris Johnson", "TEN", "RB", 39),
            record("espn", "Travis Kelce", "KC", "TE", 30).with_points(200.0),
            record("espn", "Travis Kelce", "KC", "TE", 30).with_points(250.0),
            record("fantasypros", "Mike Willians", "NYJ", "WR", 50),
            record("fantasypros", "Mike Williamz", "PIT", "WR", 60),
            record("yahoo", "Mike Williams", "FA", "WR", 55),
            record("sketchy", "", "KC", "QB", 1),
            record("espn", "Patrick Mahomes", "KC", "QB", 0),
        ]
    }

    proptest! {
        #[test]
        fn prop_resolution_ignores_input_order(records in Just(mixed_batch()).prop_shuffle()) {
            let matcher = PlayerMatcher::new(policy(90.0));
            let expected = matcher.resolve(mixed_batch());
            let actual = matcher.resolve(records);

            prop_assert_eq!(actual.players(), expected.players());
            prop_assert_eq!(actual.warnings(), expected.warnings());
        }
    }
}
