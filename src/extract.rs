//! Free-text extraction: from calendar entries and typed queries to rooms.
//!
//! The [`Extractor`] runs an explicit, ordered list of resolution
//! strategies and stops at the first success:
//!
//! 1. [`Strategy::LabeledLocation`] - a Danish `lokalitet:` label followed
//!    by a location value containing a known building code.
//! 2. [`Strategy::DirectMatch`] - the whole input is already a room code.
//! 3. [`Strategy::TokenSweep`] - every room-code-looking token in the
//!    input, expanded into variants and tried across all buildings.
//!
//! Every stage is best-effort: malformed or empty input falls through to
//! `None`, never an error.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::candidates::{candidates_from_location, CandidateSet};
use crate::search::{search_across_buildings, search_room_in_building};
use crate::types::{BuildingsPayload, RoomMatch};

/// The Danish "location:" label in calendar text, capturing the rest of
/// the line.
fn location_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)lokalitet\s*:\s*([^\n]+)").unwrap())
}

/// Maximal runs of room-code characters, Danish letters included.
fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[A-ZÆØÅ0-9._\-]+").unwrap())
}

/// Ordered table mapping short building codes (e.g. `"SP"`) to building
/// keys (e.g. `"solbjerg"`).
///
/// Supplied as configuration at [`Extractor`] construction rather than read
/// from process-wide state, so tests can use synthetic tables. Codes are
/// uppercased on construction; iteration order is the order given.
#[derive(Debug, Clone)]
pub struct BuildingCodes {
    entries: Vec<(String, String)>,
}

impl BuildingCodes {
    /// Builds a code table from `(code, building_key)` pairs.
    pub fn new<I, C, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, K)>,
        C: Into<String>,
        K: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(code, key)| (code.into().to_uppercase(), key.into()))
                .collect(),
        }
    }

    /// Iterates `(code, building_key)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, key)| (code.as_str(), key.as_str()))
    }
}

impl Default for BuildingCodes {
    /// The campus code table: `SP` for Solbjerg Plads, `PH` for
    /// Porcelænshaven.
    fn default() -> Self {
        Self::new([("SP", "solbjerg"), ("PH", "porcelaenshaven")])
    }
}

/// One stage of the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Parse a `lokalitet:` label and resolve via building-code candidates.
    LabeledLocation,
    /// Treat the whole input as a room code across all buildings.
    DirectMatch,
    /// Expand each input token into variants and try them all.
    TokenSweep,
}

/// Resolves free text to a room using an ordered list of strategies.
///
/// # Examples
///
/// ```
/// use wayin::{BuildingsPayload, Extractor};
///
/// let payload = BuildingsPayload::from_json(r#"{
///     "buildings": {
///         "solbjerg": {
///             "originalName": "Solbjerg Plads",
///             "floors": {
///                 "stue": {
///                     "originalName": "Stueetage",
///                     "rooms": [{"id": "S10", "text": "S10", "x": 0.5, "y": 0.5}],
///                     "entrances": []
///                 }
///             }
///         }
///     }
/// }"#).unwrap();
///
/// let extractor = Extractor::default();
/// let matched = extractor
///     .extract("Kalender: møde i lokale S10 (SP)", &payload)
///     .unwrap();
/// assert_eq!(matched.building_key, "solbjerg");
/// assert_eq!(matched.result.room.id, "S10");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    codes: BuildingCodes,
    strategies: Vec<Strategy>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(BuildingCodes::default())
    }
}

impl Extractor {
    /// Creates an extractor with the full strategy pipeline and the given
    /// building-code table.
    pub fn new(codes: BuildingCodes) -> Self {
        Self {
            codes,
            strategies: vec![
                Strategy::LabeledLocation,
                Strategy::DirectMatch,
                Strategy::TokenSweep,
            ],
        }
    }

    /// Replaces the strategy pipeline. Order is priority; the first
    /// strategy that produces a match wins.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Resolves free text against the payload, trying each strategy in
    /// order and returning the first match.
    pub fn extract<'a>(&self, input: &str, buildings: &'a BuildingsPayload) -> Option<RoomMatch<'a>> {
        if input.trim().is_empty() {
            return None;
        }
        self.strategies.iter().find_map(|strategy| {
            trace!(?strategy, "trying extraction strategy");
            let matched = match strategy {
                Strategy::LabeledLocation => self.labeled_location(input, buildings),
                Strategy::DirectMatch => search_across_buildings(input, buildings),
                Strategy::TokenSweep => self.token_sweep(input, buildings),
            };
            if let Some(matched) = &matched {
                debug!(
                    ?strategy,
                    building = matched.building_key,
                    room = %matched.result.room.id,
                    "room resolved from text"
                );
            }
            matched
        })
    }

    /// Strategy 1: a `lokalitet:` label whose value names a building code.
    /// Everything after the code is the candidate context; its first word
    /// is the primary token.
    fn labeled_location<'a>(
        &self,
        input: &str,
        buildings: &'a BuildingsPayload,
    ) -> Option<RoomMatch<'a>> {
        let captures = location_label_re().captures(input)?;
        let location_value = captures.get(1)?.as_str().trim().to_uppercase();

        for (code, key) in self.codes.iter() {
            let Some(index) = location_value.find(code) else {
                continue;
            };
            let remainder = location_value[index + code.len()..].trim();
            let primary_token = remainder.split_whitespace().next().unwrap_or("");
            let Some((building_key, building)) = buildings.get_entry(key) else {
                continue;
            };

            for candidate in
                candidates_from_location(key, primary_token, Some(remainder), Some(code))
            {
                if let Some(result) = search_room_in_building(building, &candidate) {
                    return Some(RoomMatch {
                        building_key,
                        result,
                    });
                }
            }
        }
        None
    }

    /// Strategy 3: sweep every token, expand it into variants, and try each
    /// variant across all buildings. Variants from one building's
    /// convention may legitimately match a different building.
    fn token_sweep<'a>(
        &self,
        input: &str,
        buildings: &'a BuildingsPayload,
    ) -> Option<RoomMatch<'a>> {
        for token in token_re().find_iter(input) {
            let normalized = token.as_str().trim().to_uppercase();
            if normalized.is_empty() {
                continue;
            }

            let mut variants = CandidateSet::new();
            variants.push(&normalized);

            let sanitized: String = normalized
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect();
            if !sanitized.is_empty() {
                variants.push(&sanitized);
                let digits: String = sanitized.chars().filter(char::is_ascii_digit).collect();
                if !digits.is_empty() {
                    variants.push(&digits);
                }
                // Generic 1-3 letter prefix strip, not code-aware; can
                // produce false-positive variants, which is accepted.
                let letters = sanitized
                    .chars()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .count()
                    .min(3);
                if letters > 0 && letters < sanitized.len() {
                    variants.push(&sanitized[letters..]);
                }
            }

            for (code, key) in self.codes.iter() {
                if buildings.get(key).is_none() {
                    continue;
                }
                if let Some(remainder) = normalized.strip_prefix(code) {
                    let remainder = remainder.trim();
                    if !remainder.is_empty() {
                        variants.push(remainder);
                        let stripped: String = remainder
                            .chars()
                            .filter(char::is_ascii_alphanumeric)
                            .collect();
                        variants.push(&stripped);
                    }
                }
                for variant in
                    candidates_from_location(key, &normalized, Some(&normalized), Some(code))
                {
                    variants.push(&variant);
                }
            }

            for variant in variants.iter() {
                if let Some(matched) = search_across_buildings(variant, buildings) {
                    return Some(matched);
                }
            }
        }
        None
    }
}

/// Resolves free text (e.g. a calendar entry) to a room using the default
/// campus code table. See [`Extractor`] for the strategy pipeline.
///
/// # Examples
///
/// ```
/// use wayin::{extract_room_from_text, BuildingsPayload};
///
/// let empty = BuildingsPayload::default();
/// assert!(extract_room_from_text("anything", &empty).is_none());
/// ```
pub fn extract_room_from_text<'a>(
    input: &str,
    buildings: &'a BuildingsPayload,
) -> Option<RoomMatch<'a>> {
    Extractor::default().extract(input, buildings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> BuildingsPayload {
        BuildingsPayload::from_json(
            r#"{
                "buildings": {
                    "solbjerg": {
                        "originalName": "Solbjerg Plads",
                        "floors": {
                            "stue": {
                                "originalName": "Stueetage",
                                "rooms": [
                                    {"id": "S10", "text": "S10", "x": 0.5, "y": 0.5},
                                    {"id": "S14", "text": "S14", "x": 0.2, "y": 0.8}
                                ],
                                "entrances": [{"text": "Main", "x": 0.51, "y": 0.51}]
                            }
                        }
                    },
                    "porcelaenshaven": {
                        "originalName": "Porcelænshaven",
                        "floors": {
                            "2_sal": {
                                "originalName": "2. sal",
                                "rooms": [{"id": "2.17", "text": "2.17", "x": 0.3, "y": 0.3}],
                                "entrances": []
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn calendar_text_resolves_via_token_sweep() {
        let payload = payload();
        let matched = extract_room_from_text("Kalender: møde i lokale S10 (SP)", &payload).unwrap();
        assert_eq!(matched.building_key, "solbjerg");
        assert_eq!(matched.result.room.id, "S10");
        assert_eq!(matched.result.entrance.unwrap().text, "Main");
    }

    #[test]
    fn labeled_location_takes_priority() {
        let payload = payload();
        let matched =
            extract_room_from_text("Møde\nLokalitet: SP S14, 2. etage\nNoter: ingen", &payload)
                .unwrap();
        assert_eq!(matched.building_key, "solbjerg");
        assert_eq!(matched.result.room.id, "S14");
    }

    #[test]
    fn bare_room_code_is_a_direct_match() {
        let payload = payload();
        let matched = extract_room_from_text("s10", &payload).unwrap();
        assert_eq!(matched.building_key, "solbjerg");

        let matched = extract_room_from_text("2.17", &payload).unwrap();
        assert_eq!(matched.building_key, "porcelaenshaven");
    }

    #[test]
    fn code_prefixed_token_resolves() {
        let payload = payload();
        let matched = extract_room_from_text("Undervisning i SPS14", &payload).unwrap();
        assert_eq!(matched.building_key, "solbjerg");
        assert_eq!(matched.result.room.id, "S14");
    }

    #[test]
    fn dotted_room_code_resolves_from_noise() {
        let payload = payload();
        let matched = extract_room_from_text("Aud. R2.17, husk kaffe", &payload).unwrap();
        assert_eq!(matched.building_key, "porcelaenshaven");
        assert_eq!(matched.result.room.id, "2.17");
    }

    #[test]
    fn empty_inputs_short_circuit() {
        let payload = payload();
        assert!(extract_room_from_text("", &payload).is_none());
        assert!(extract_room_from_text("   \n  ", &payload).is_none());
    }

    #[test]
    fn empty_payload_never_matches() {
        let empty = BuildingsPayload::default();
        assert!(extract_room_from_text("anything", &empty).is_none());
        assert!(extract_room_from_text("Lokalitet: SP S10", &empty).is_none());
    }

    #[test]
    fn unresolvable_text_is_none() {
        let payload = payload();
        assert!(extract_room_from_text("frokost med Anna kl. 12", &payload).is_none());
    }

    #[test]
    fn synthetic_code_table() {
        let payload = payload();
        let extractor = Extractor::new(BuildingCodes::new([("XX", "porcelaenshaven")]));
        let matched = extractor
            .extract("Lokalitet: XX R2.17", &payload)
            .unwrap();
        assert_eq!(matched.building_key, "porcelaenshaven");
        assert_eq!(matched.result.room.id, "2.17");
    }

    #[test]
    fn strategy_pipeline_is_configurable() {
        let payload = payload();
        let direct_only =
            Extractor::default().with_strategies(vec![Strategy::DirectMatch]);
        // Resolvable by the token sweep, but that strategy is disabled.
        assert!(direct_only
            .extract("lokale S10 i morgen", &payload)
            .is_none());
        assert!(direct_only.extract("S10", &payload).is_some());
    }
}
