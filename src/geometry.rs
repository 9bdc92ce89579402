//! Ground-floor detection and nearest-entrance selection.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Entrance, FloorData, Room};

/// Matches a standalone `0` token: a zero not adjacent to another digit.
/// Part of the ground-floor heuristic; it can misfire on floor names that
/// contain an unrelated bare zero, which is accepted behavior.
fn lone_zero_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|[^0-9])0([^0-9]|$)").unwrap())
}

/// Whether a floor counts as a ground floor.
///
/// Classified from strings on every call, never persisted: the lowercased
/// `"{floor_key} {original_name}"` haystack matches if it contains `"stue"`
/// or `"ground"`, or contains a standalone `0` token.
///
/// # Examples
///
/// ```
/// use wayin::geometry::is_ground_floor;
/// use wayin::FloorData;
///
/// let floor = |name: &str| FloorData {
///     original_name: name.to_string(),
///     image: String::new(),
///     rooms: vec![],
///     entrances: vec![],
/// };
///
/// assert!(is_ground_floor("stue", &floor("Stueetage")));
/// assert!(is_ground_floor("etage_0", &floor("Etage 0")));
/// assert!(!is_ground_floor("1_sal", &floor("1. sal")));
/// ```
pub fn is_ground_floor(floor_key: &str, floor: &FloorData) -> bool {
    let haystack = format!("{} {}", floor_key, floor.original_name).to_lowercase();
    haystack.contains("stue") || haystack.contains("ground") || lone_zero_re().is_match(&haystack)
}

/// Pools candidate entrances from a building's floors.
///
/// When any ground floor exists, only ground floors contribute; otherwise
/// every floor does. A room on an upper floor is still directed to a
/// ground-floor entrance - "closest to building entry", not "closest floor".
pub fn collect_entrances<'a>(floors: &'a [(String, FloorData)]) -> Vec<&'a Entrance> {
    let ground: Vec<&FloorData> = floors
        .iter()
        .filter(|(key, floor)| is_ground_floor(key, floor))
        .map(|(_, floor)| floor)
        .collect();

    let pool: Vec<&FloorData> = if ground.is_empty() {
        floors.iter().map(|(_, floor)| floor).collect()
    } else {
        ground
    };

    pool.iter().flat_map(|floor| &floor.entrances).collect()
}

/// Selects the entrance nearest to a room, or `None` when the building has
/// no entrances in the pool. Ties go to the first entrance encountered.
pub fn nearest_entrance<'a>(floors: &'a [(String, FloorData)], room: &Room) -> Option<&'a Entrance> {
    let room_point = room.point();
    let mut nearest: Option<(&Entrance, f64)> = None;
    for entrance in collect_entrances(floors) {
        let distance = entrance.point().distance_to(&room_point);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((entrance, distance)),
        }
    }
    nearest.map(|(entrance, _)| entrance)
}
