//! Canonicalisation of provider-supplied names, teams and positions
//!
//! Every provider spells players a little differently ("A.J. Brown" vs
//! "AJ Brown", "Kenneth Walker III" vs "Kenneth Walker", "JAC" vs "JAX").
//! The functions here reduce those spellings to a [`NormalizedKey`] that can
//! be compared for equality. Nothing in this module fails: unrecognised input
//! either passes through or yields the invalid sentinel key.

use crate::types::{NormalizedKey, Position};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Generational suffixes dropped from the end of a name
const NAME_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

/// Words providers attach to team-defense names
const DEFENSE_MARKERS: &[&str] = &["d", "st", "dst", "def", "defense", "special", "teams"];

/// Known name variants that punctuation and suffix stripping cannot reconcile
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("C.D. Lamb", "CeeDee Lamb"),
    ("Cedarian Lamb", "CeeDee Lamb"),
    ("DeKaylin Metcalf", "DK Metcalf"),
    ("Denniston Moore", "DJ Moore"),
    ("Kendrick Osborn", "KJ Osborn"),
    ("OBJ", "Odell Beckham Jr."),
    ("K. Walker III", "Kenneth Walker III"),
    ("B. Robinson Jr.", "Brian Robinson Jr."),
    ("Hollywood Brown", "Marquise Brown"),
    ("Gabe Davis", "Gabriel Davis"),
    ("Josh Palmer", "Joshua Palmer"),
    ("Chig Okonkwo", "Chigoziem Okonkwo"),
    ("Tank Dell", "Nathaniel Dell"),
];

struct Franchise {
    code: &'static str,
    city: &'static str,
    nickname: &'static str,
    aliases: &'static [&'static str],
}

const FRANCHISES: &[Franchise] = &[
    Franchise { code: "ARI", city: "arizona", nickname: "cardinals", aliases: &["ARZ"] },
    Franchise { code: "ATL", city: "atlanta", nickname: "falcons", aliases: &[] },
    Franchise { code: "BAL", city: "baltimore", nickname: "ravens", aliases: &["BLT"] },
    Franchise { code: "BUF", city: "buffalo", nickname: "bills", aliases: &[] },
    Franchise { code: "CAR", city: "carolina", nickname: "panthers", aliases: &[] },
    Franchise { code: "CHI", city: "chicago", nickname: "bears", aliases: &[] },
    Franchise { code: "CIN", city: "cincinnati", nickname: "bengals", aliases: &[] },
    Franchise { code: "CLE", city: "cleveland", nickname: "browns", aliases: &["CLV"] },
    Franchise { code: "DAL", city: "dallas", nickname: "cowboys", aliases: &[] },
    Franchise { code: "DEN", city: "denver", nickname: "broncos", aliases: &[] },
    Franchise { code: "DET", city: "detroit", nickname: "lions", aliases: &[] },
    Franchise { code: "GB", city: "green bay", nickname: "packers", aliases: &["GNB"] },
    Franchise { code: "HOU", city: "houston", nickname: "texans", aliases: &["HST"] },
    Franchise { code: "IND", city: "indianapolis", nickname: "colts", aliases: &[] },
    Franchise { code: "JAX", city: "jacksonville", nickname: "jaguars", aliases: &["JAC"] },
    Franchise { code: "KC", city: "kansas city", nickname: "chiefs", aliases: &["KAN", "KCC"] },
    Franchise { code: "LAC", city: "los angeles", nickname: "chargers", aliases: &["SD", "SDG"] },
    Franchise { code: "LAR", city: "los angeles", nickname: "rams", aliases: &["LA", "STL", "RAM"] },
    Franchise { code: "LV", city: "las vegas", nickname: "raiders", aliases: &["OAK", "LVR"] },
    Franchise { code: "MIA", city: "miami", nickname: "dolphins", aliases: &[] },
    Franchise { code: "MIN", city: "minnesota", nickname: "vikings", aliases: &[] },
    Franchise { code: "NE", city: "new england", nickname: "patriots", aliases: &["NWE"] },
    Franchise { code: "NO", city: "new orleans", nickname: "saints", aliases: &["NOR"] },
    Franchise { code: "NYG", city: "new york", nickname: "giants", aliases: &[] },
    Franchise { code: "NYJ", city: "new york", nickname: "jets", aliases: &[] },
    Franchise { code: "PHI", city: "philadelphia", nickname: "eagles", aliases: &[] },
    Franchise { code: "PIT", city: "pittsburgh", nickname: "steelers", aliases: &[] },
    Franchise { code: "SEA", city: "seattle", nickname: "seahawks", aliases: &[] },
    Franchise { code: "SF", city: "san francisco", nickname: "49ers", aliases: &["SFO"] },
    Franchise { code: "TB", city: "tampa bay", nickname: "buccaneers", aliases: &["TAM"] },
    Franchise { code: "TEN", city: "tennessee", nickname: "titans", aliases: &[] },
    Franchise { code: "WAS", city: "washington", nickname: "commanders", aliases: &["WSH"] },
];

/// Team code used for unsigned players and missing team fields
pub const FREE_AGENT: &str = "FA";

/// Name normalizer with a table of known aliases
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Normalized alias -> normalized canonical name
    aliases: HashMap<String, String>,
}

impl Normalizer {
    /// Create a normalizer with the built-in alias table
    pub fn new() -> Self {
        let mut normalizer = Self { aliases: HashMap::new() };
        normalizer.extend_aliases(BUILTIN_ALIASES.iter().copied());
        normalizer
    }

    /// Add extra alias -> canonical pairs, given as raw display names
    pub fn with_aliases<I, A, C>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        self.extend_aliases(aliases);
        self
    }

    fn extend_aliases<I, A, C>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        for (alias, canonical) in aliases {
            let alias = base_name_key(alias.as_ref());
            let canonical = base_name_key(canonical.as_ref());
            if !alias.is_empty() && !canonical.is_empty() && alias != canonical {
                self.aliases.insert(alias, canonical);
            }
        }
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Normalize a name, resolving known aliases
    pub fn normalize_name(&self, name: &str) -> String {
        let key = base_name_key(name);
        match self.aliases.get(&key) {
            Some(canonical) => canonical.clone(),
            None => key,
        }
    }

    /// Canonicalise a raw (name, team, position) triple
    ///
    /// Returns [`NormalizedKey::invalid`] when the name is blank. An
    /// unrecognised position yields a key whose `position` is `None`.
    pub fn normalize(&self, name: &str, team: &str, position: &str) -> NormalizedKey {
        if name.trim().is_empty() {
            return NormalizedKey::invalid();
        }

        let position = normalize_position(position);
        let team = normalize_team(team);

        if position == Some(Position::DST) {
            let franchise = franchise_by_code(&team).or_else(|| franchise_from_defense_name(name));
            if let Some(franchise) = franchise {
                return NormalizedKey {
                    name: franchise.code.to_lowercase(),
                    team: franchise.code.to_string(),
                    position,
                };
            }
        }

        NormalizedKey { name: self.normalize_name(name), team, position }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn default_normalizer() -> &'static Normalizer {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::new)
}

/// Canonicalise using the built-in alias table
pub fn normalize(name: &str, team: &str, position: &str) -> NormalizedKey {
    default_normalizer().normalize(name, team, position)
}

/// Case-fold, strip punctuation and generational suffixes, collapse whitespace
pub fn base_name_key(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '-' | '_' | '/' => Some(' '),
            c if c.is_alphanumeric() || c.is_whitespace() => Some(c),
            _ => None,
        })
        .collect();

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    while tokens.len() > 2 && tokens.last().is_some_and(|t| NAME_SUFFIXES.contains(t)) {
        tokens.pop();
    }

    tokens.join(" ")
}

/// Collapse whitespace in a raw name without changing its spelling
pub fn display_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a team abbreviation or alias to its canonical code
///
/// Unknown teams pass through (trimmed and upper-cased).
pub fn normalize_team(team: &str) -> String {
    let cleaned: String =
        team.trim().to_uppercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();

    if cleaned.is_empty() || cleaned == FREE_AGENT || cleaned == "FREEAGENT" {
        return FREE_AGENT.to_string();
    }

    FRANCHISES
        .iter()
        .find(|f| f.code == cleaned || f.aliases.contains(&cleaned.as_str()))
        .map(|f| f.code.to_string())
        .unwrap_or(cleaned)
}

/// Map a position label to one of the canonical positions
///
/// Provider position ranks ("RB12") are accepted.
pub fn normalize_position(position: &str) -> Option<Position> {
    let cleaned: String =
        position.trim().to_uppercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();

    match cleaned.trim_end_matches(|c: char| c.is_ascii_digit()) {
        "QB" => Some(Position::QB),
        "RB" | "HB" | "FB" => Some(Position::RB),
        "WR" => Some(Position::WR),
        "TE" => Some(Position::TE),
        "K" | "PK" => Some(Position::K),
        "DST" | "DEF" | "D" | "DEFENSE" => Some(Position::DST),
        _ => None,
    }
}

/// Similarity of two normalized names on a 0-100 scale
///
/// Normalized Levenshtein distance, rounded to two decimals so that
/// threshold comparisons are not at the mercy of float noise.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let similarity = strsim::normalized_levenshtein(a, b) * 100.0;
    (similarity * 100.0).round() / 100.0
}

fn franchise_by_code(code: &str) -> Option<&'static Franchise> {
    FRANCHISES.iter().find(|f| f.code == code)
}

fn franchise_from_defense_name(name: &str) -> Option<&'static Franchise> {
    let key = base_name_key(name);
    let remainder: Vec<&str> =
        key.split_whitespace().filter(|t| !DEFENSE_MARKERS.contains(t)).collect();
    let remainder = remainder.join(" ");
    if remainder.is_empty() {
        return None;
    }

    let upper = remainder.to_uppercase();
    FRANCHISES.iter().find(|f| {
        let shared_city = FRANCHISES.iter().filter(|other| other.city == f.city).count() > 1;
        remainder == f.nickname
            || remainder == format!("{} {}", f.city, f.nickname)
            || (!shared_city && remainder == f.city)
            || upper == f.code
            || f.aliases.contains(&upper.as_str())
    })
}
