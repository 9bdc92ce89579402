//! Exact-match room resolution within and across buildings.

use std::collections::BTreeSet;

use crate::geometry::nearest_entrance;
use crate::types::{BuildingData, BuildingsPayload, RoomMatch, SearchResult};

/// Trims and uppercases a query for case-insensitive comparison.
fn normalize_query(query: &str) -> String {
    query.trim().to_uppercase()
}

/// Resolves a room query against one building.
///
/// The query is trimmed and uppercased; an empty result means no search.
/// Floors are scanned in payload order and rooms in list order; the first
/// room whose uppercased identifier equals the normalized query wins. The
/// nearest entrance is computed over the building's full floor set, not
/// just the matched floor.
///
/// # Examples
///
/// ```
/// use wayin::{search_room_in_building, BuildingsPayload};
///
/// let payload = BuildingsPayload::from_json(r#"{
///     "buildings": {
///         "solbjerg": {
///             "originalName": "Solbjerg Plads",
///             "floors": {
///                 "stue": {
///                     "originalName": "Stueetage",
///                     "rooms": [{"id": "S10", "text": "S10", "x": 0.5, "y": 0.5}],
///                     "entrances": [{"text": "Main", "x": 0.51, "y": 0.51}]
///                 }
///             }
///         }
///     }
/// }"#).unwrap();
/// let building = payload.get("solbjerg").unwrap();
///
/// let result = search_room_in_building(building, "s10").unwrap();
/// assert_eq!(result.floor_key, "stue");
/// assert_eq!(result.room.id, "S10");
/// assert_eq!(result.entrance.unwrap().text, "Main");
///
/// assert!(search_room_in_building(building, "s99").is_none());
/// ```
pub fn search_room_in_building<'a>(
    building: &'a BuildingData,
    query: &str,
) -> Option<SearchResult<'a>> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return None;
    }

    for (floor_key, floor) in &building.floors {
        for room in &floor.rooms {
            if room.id.to_uppercase() == normalized {
                return Some(SearchResult {
                    floor_key: floor_key.as_str(),
                    floor,
                    room,
                    entrance: nearest_entrance(&building.floors, room),
                });
            }
        }
    }
    None
}

/// All room identifiers in a building, uppercased, deduplicated and sorted.
/// Intended for UI suggestion lists.
pub fn list_room_ids(building: &BuildingData) -> Vec<String> {
    let mut ids = BTreeSet::new();
    for (_, floor) in &building.floors {
        for room in &floor.rooms {
            ids.insert(room.id.to_uppercase());
        }
    }
    ids.into_iter().collect()
}

/// Resolves a query against every building in payload order, returning the
/// first match. No aggregation: strictly first-found.
pub fn search_across_buildings<'a>(
    query: &str,
    buildings: &'a BuildingsPayload,
) -> Option<RoomMatch<'a>> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return None;
    }
    buildings.iter().find_map(|(building_key, building)| {
        search_room_in_building(building, &normalized).map(|result| RoomMatch {
            building_key,
            result,
        })
    })
}
