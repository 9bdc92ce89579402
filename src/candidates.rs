//! Per-building candidate generation from raw text tokens.
//!
//! Building layouts use incompatible room-numbering schemes: plain
//! alphanumeric codes, dotted `floor.room` codes, building-code-prefixed
//! codes. No single normalization serves all of them, so each building key
//! selects a [`Convention`] - a small per-building grammar that expands a
//! token (plus optional surrounding context and a building-code prefix)
//! into a ranked list of normalized room-identifier candidates. Buildings
//! without a dedicated convention fall back to [`Convention::Generic`].
//!
//! Candidate order is significant: downstream matching takes the first
//! candidate that resolves, so insertion order encodes confidence,
//! most-specific first.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashSet;

/// Splitter for free-text context: any run of whitespace or common
/// punctuation found in calendar location strings.
fn context_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,.;:()•\-]+").unwrap())
}

/// An ordered, case-insensitive set of candidate strings.
///
/// Accepts each candidate at most once; every accepted value is stored
/// whitespace-stripped and uppercased. Insertion order is preserved because
/// it is the ranking.
#[derive(Debug, Default)]
pub struct CandidateSet {
    ordered: Vec<String>,
    seen: FxHashSet<String>,
}

impl CandidateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and inserts a candidate. Empty values (after stripping
    /// whitespace) and duplicates are dropped.
    pub fn push(&mut self, value: &str) {
        let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return;
        }
        let upper = stripped.to_uppercase();
        if self.seen.insert(upper.clone()) {
            self.ordered.push(upper);
        }
    }

    /// Iterates candidates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Consumes the set, yielding the ranked candidate list.
    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Keeps only ASCII letters and digits.
fn alphanumeric_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Keeps only ASCII digits.
fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Splits context text into at most five uppercased tokens, the normalized
/// primary token first, deduplicated in order of appearance.
fn context_tokens(token: &str, context: Option<&str>) -> Vec<String> {
    let normalized = token.trim().to_uppercase();

    let Some(context) = context else {
        return if normalized.is_empty() {
            Vec::new()
        } else {
            vec![normalized]
        };
    };

    let mut seen = FxHashSet::default();
    let mut tokens = Vec::new();
    if !normalized.is_empty() {
        seen.insert(normalized.clone());
        tokens.push(normalized);
    }
    for part in context_split_re().split(context) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let upper = part.to_uppercase();
        if seen.insert(upper.clone()) {
            tokens.push(upper);
        }
    }
    tokens.truncate(5);
    tokens
}

/// A building's room-naming convention.
///
/// Selected by building key via [`Convention::for_building`]; new buildings
/// get a new variant here (or land in [`Convention::Generic`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// Alphanumeric codes, optionally building-code-prefixed, sometimes
    /// split across tokens (`"S" "10"` for `S10`).
    Solbjerg,
    /// Dotted `floor.room` codes (`"2.17"`), often wrapped in letters
    /// (`"R2.17"`).
    Porcelaenshaven,
    /// Fallback: each context token stripped to its alphanumeric core.
    Generic,
}

impl Convention {
    /// Selects the convention for a building key.
    pub fn for_building(building_key: &str) -> Self {
        match building_key {
            "solbjerg" => Self::Solbjerg,
            "porcelaenshaven" => Self::Porcelaenshaven,
            _ => Self::Generic,
        }
    }

    /// Expands a token (plus optional context and building-code prefix)
    /// into ranked candidates under this convention.
    pub fn generate(
        &self,
        token: &str,
        context: Option<&str>,
        building_code: Option<&str>,
    ) -> Vec<String> {
        let tokens = context_tokens(token, context);
        let mut candidates = CandidateSet::new();
        if tokens.is_empty() {
            return candidates.into_vec();
        }

        match self {
            Self::Solbjerg => solbjerg(&tokens, building_code, &mut candidates),
            Self::Porcelaenshaven => porcelaenshaven(&tokens, &mut candidates),
            Self::Generic => {
                for token in &tokens {
                    candidates.push(&alphanumeric_only(token));
                }
            }
        }
        candidates.into_vec()
    }
}

fn solbjerg(tokens: &[String], building_code: Option<&str>, candidates: &mut CandidateSet) {
    fn add_variants(raw: &str, building_code: Option<&str>, candidates: &mut CandidateSet) {
        let sanitized = alphanumeric_only(raw);
        if sanitized.is_empty() {
            return;
        }
        candidates.push(&sanitized);
        if let Some(code) = building_code {
            candidates.push(&format!("{code}{sanitized}"));
        }
        // Digits-only variants catch identifiers quoted without their
        // letter prefix; lower confidence, so pushed last.
        let digits = digits_only(&sanitized);
        if !digits.is_empty() {
            candidates.push(&digits);
            if let Some(code) = building_code {
                candidates.push(&format!("{code}{digits}"));
            }
        }
    }

    for token in tokens {
        add_variants(token, building_code, candidates);
    }
    // A room code may arrive split across two tokens ("S" + "10").
    for pair in tokens.windows(2) {
        add_variants(&format!("{}{}", pair[0], pair[1]), building_code, candidates);
    }
}

fn porcelaenshaven(tokens: &[String], candidates: &mut CandidateSet) {
    let primary = tokens.first().map(String::as_str).unwrap_or("");
    let sanitized: String = primary
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c
            } else {
                '.'
            }
        })
        .collect();

    let numeric_segments: Vec<String> = sanitized
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(digits_only)
        .filter(|digits| !digits.is_empty())
        .collect();

    // More than two numeric runs means leading noise; the floor.room pair
    // is the last two.
    let relevant = if numeric_segments.len() > 2 {
        &numeric_segments[numeric_segments.len() - 2..]
    } else {
        &numeric_segments[..]
    };

    let (floor_part, room_part) = match relevant {
        [floor, room, ..] => (Some(floor.as_str()), Some(room.as_str())),
        [room] => (None, Some(room.as_str())),
        [] => (None, None),
    };

    if let (Some(floor), Some(room)) = (floor_part, room_part) {
        candidates.push(&format!("{floor}{room}"));
        candidates.push(&format!("{floor}.{room}"));
    }
    if let Some(room) = room_part {
        candidates.push(room);
    }

    // Context tokens 2 and 3 may carry a literal room code that does not
    // fit the floor.room pattern.
    for token in tokens.iter().skip(1).take(2) {
        let cleaned: String = token
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect();
        if !cleaned.is_empty() {
            candidates.push(&cleaned);
        }
    }
}

/// Generates ranked room-identifier candidates for a building from a raw
/// text token, optional surrounding context and an optional building code.
///
/// Dispatches on the building's [`Convention`].
///
/// # Examples
///
/// ```
/// use wayin::candidates::candidates_from_location;
///
/// let candidates = candidates_from_location("porcelaenshaven", "R2.17", None, None);
/// assert_eq!(candidates, ["217", "2.17", "17"]);
/// ```
pub fn candidates_from_location(
    building_key: &str,
    token: &str,
    context: Option<&str>,
    building_code: Option<&str>,
) -> Vec<String> {
    Convention::for_building(building_key).generate(token, context, building_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_set_dedups_case_insensitively() {
        let mut set = CandidateSet::new();
        set.push("s10");
        set.push("S10");
        set.push(" S 10 ");
        set.push("s11");
        assert_eq!(set.into_vec(), ["S10", "S11"]);
    }

    #[test]
    fn candidate_set_drops_empty() {
        let mut set = CandidateSet::new();
        set.push("   ");
        set.push("");
        assert!(set.into_vec().is_empty());
    }

    #[test]
    fn context_tokens_prepend_primary_and_truncate() {
        let tokens = context_tokens("s14", Some("a, b; c (d) e f"));
        assert_eq!(tokens, ["S14", "A", "B", "C", "D"]);
    }

    #[test]
    fn context_tokens_without_context() {
        assert_eq!(context_tokens(" s14 ", None), ["S14"]);
        assert!(context_tokens("   ", None).is_empty());
    }

    #[test]
    fn solbjerg_includes_code_prefixed_variants() {
        let candidates = candidates_from_location("solbjerg", "s14", Some("s14 PA"), Some("SP"));
        assert!(candidates.contains(&"SPS14".to_string()));
        assert!(candidates.contains(&"S14".to_string()));
        assert!(candidates.contains(&"14".to_string()));
        assert!(candidates.contains(&"SP14".to_string()));
    }

    #[test]
    fn solbjerg_joins_adjacent_tokens() {
        // A split room code like "S 10" yields the joined "S10".
        let candidates = candidates_from_location("solbjerg", "S", Some("S 10"), None);
        assert!(candidates.contains(&"S10".to_string()));
    }

    #[test]
    fn porcelaenshaven_floor_room_split() {
        let candidates = candidates_from_location("porcelaenshaven", "R2.17", None, None);
        assert_eq!(candidates, ["217", "2.17", "17"]);
    }

    #[test]
    fn porcelaenshaven_keeps_last_two_numeric_segments() {
        // Leading noise ("BYGNING 4") is discarded; floor.room is the
        // trailing pair.
        let candidates = candidates_from_location("porcelaenshaven", "B4.2.17", None, None);
        assert_eq!(candidates, ["217", "2.17", "17"]);
    }

    #[test]
    fn porcelaenshaven_single_segment_is_room_only() {
        let candidates = candidates_from_location("porcelaenshaven", "R17", None, None);
        assert_eq!(candidates, ["17"]);
    }

    #[test]
    fn porcelaenshaven_context_tokens_pushed_raw() {
        // The context splitter breaks on dots too, so "foo R2.17" becomes
        // FOO / R2 / 17; tokens two and three land as raw candidates.
        let candidates = candidates_from_location("porcelaenshaven", "foo", Some("foo R2.17"), None);
        assert_eq!(candidates, ["R2", "17"]);
    }

    #[test]
    fn generic_fallback_strips_to_alphanumeric() {
        let candidates = candidates_from_location("dalgas", "D-3.12", None, None);
        assert_eq!(candidates, ["D312"]);
    }

    #[test]
    fn no_duplicate_candidates() {
        let candidates =
            candidates_from_location("solbjerg", "s10", Some("s10 S10 s10"), Some("SP"));
        let mut unique = candidates.clone();
        unique.dedup();
        assert_eq!(candidates, unique);
        let set: std::collections::HashSet<_> = candidates.iter().collect();
        assert_eq!(set.len(), candidates.len());
    }

    #[test]
    fn empty_token_and_context_yield_nothing() {
        assert!(candidates_from_location("solbjerg", "", None, Some("SP")).is_empty());
    }
}
