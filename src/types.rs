//! Core data structures for building, floor and room data.
//!
//! This module defines the types the whole crate operates over:
//!
//! - [`BuildingsPayload`] - The root document: every known building
//! - [`BuildingData`] / [`FloorData`] - One building and its floors
//! - [`Room`] / [`Entrance`] - Labelled points on a floor plan
//! - [`Point`] - A relative coordinate pair with distance calculations
//! - [`SearchResult`] / [`RoomMatch`] - The output of a successful resolution
//!
//! Floors and buildings arrive as JSON objects whose *insertion order is
//! significant*: resolution is first-match-wins, so the order of entries in
//! the source document encodes priority. They are therefore stored as
//! `Vec<(String, _)>` pairs populated by an order-preserving map visitor
//! rather than a hash map. The `preserve_order` feature of `serde_json` is
//! required so that documents routed through `serde_json::Value` keep their
//! order too.

#![warn(missing_docs)]

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A coordinate pair relative to a floor-plan image.
///
/// Both components are fractions of the image's width/height in `[0, 1]`.
/// The core never converts these to GPS or pixel coordinates; it only
/// measures straight-line distances between them. Coordinates are taken as
/// given - validation belongs at the ingestion boundary, so malformed values
/// propagate into garbage distances rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, fraction of the floor-plan width.
    pub x: f64,
    /// Vertical position, fraction of the floor-plan height.
    pub y: f64,
}

impl Point {
    /// Constructs a new point from relative coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayin::Point;
    ///
    /// let p = Point::new(0.5, 0.25);
    /// assert_eq!(p.x, 0.5);
    /// assert_eq!(p.y, 0.25);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayin::Point;
    ///
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(0.3, 0.4);
    /// assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
    /// ```
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A room marker on a floor plan.
///
/// The identifier is compared case-insensitively everywhere; it is stored as
/// it appears in the source payload. The font-size fields are display
/// metadata carried through for the rendering layer and never consulted by
/// the resolution logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier, e.g. `"S10"` or `"2.17"`.
    pub id: String,
    /// Label text shown on the map.
    pub text: String,
    /// Horizontal position on the floor plan, `[0, 1]`.
    pub x: f64,
    /// Vertical position on the floor plan, `[0, 1]`.
    pub y: f64,
    /// Original label font size from the source material, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font size normalized across the floor, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_font_size: Option<f64>,
}

impl Room {
    /// The room's position as a [`Point`].
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An entrance marker on a floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    /// Label text, e.g. `"Hovedindgang"`.
    pub text: String,
    /// Horizontal position on the floor plan, `[0, 1]`.
    pub x: f64,
    /// Vertical position on the floor plan, `[0, 1]`.
    pub y: f64,
    /// Original label font size from the source material, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font size normalized across the floor, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_font_size: Option<f64>,
}

impl Entrance {
    /// The entrance's position as a [`Point`].
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A single floor of a building.
///
/// `original_name` doubles as UI display text and as input to the
/// ground-floor heuristic (see [`crate::geometry::is_ground_floor`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorData {
    /// Display name of the floor, e.g. `"1_sal"` or `"stue"`.
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// Path to the floor-plan image, passed through untouched for the UI.
    #[serde(default)]
    pub image: String,
    /// Rooms on this floor.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Entrances on this floor.
    #[serde(default)]
    pub entrances: Vec<Entrance>,
}

/// A building: a display name plus its floors in payload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    /// Display name of the building.
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// Floors keyed by floor key (e.g. `"stue"`, `"1_sal"`), in the order
    /// they appear in the source document.
    #[serde(
        deserialize_with = "ordered_entries",
        serialize_with = "entries_as_map"
    )]
    pub floors: Vec<(String, FloorData)>,
}

impl BuildingData {
    /// Looks up a floor by its key.
    pub fn floor(&self, key: &str) -> Option<&FloorData> {
        self.floors
            .iter()
            .find(|(floor_key, _)| floor_key == key)
            .map(|(_, floor)| floor)
    }
}

/// The root document: every known building, keyed by building key.
///
/// This is the read-only input the whole crate operates over. It is sourced
/// externally (a remote JSON document in the surrounding system) and parsed
/// with [`BuildingsPayload::from_json`].
///
/// # Examples
///
/// ```
/// use wayin::BuildingsPayload;
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
/// assert!(payload.get("solbjerg").is_some());
/// assert!(payload.get("dalgas").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingsPayload {
    /// Buildings keyed by building key (e.g. `"solbjerg"`), in the order
    /// they appear in the source document.
    #[serde(
        default,
        deserialize_with = "ordered_entries",
        serialize_with = "entries_as_map"
    )]
    pub buildings: Vec<(String, BuildingData)>,
}

impl BuildingsPayload {
    /// Parses a payload from its JSON document form.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Looks up a building by its key.
    pub fn get(&self, key: &str) -> Option<&BuildingData> {
        self.get_entry(key).map(|(_, building)| building)
    }

    /// Looks up a building by its key, returning the payload's own key
    /// string alongside it.
    pub fn get_entry(&self, key: &str) -> Option<(&str, &BuildingData)> {
        self.buildings
            .iter()
            .find(|(building_key, _)| building_key == key)
            .map(|(building_key, building)| (building_key.as_str(), building))
    }

    /// Iterates over buildings in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BuildingData)> {
        self.buildings
            .iter()
            .map(|(key, building)| (key.as_str(), building))
    }

    /// Whether the payload contains no buildings at all.
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

/// The result of resolving a room query against one building.
///
/// Borrows from the payload it was resolved against; it is constructed fresh
/// per successful resolution and never cached. `entrance` is `None` when the
/// building has no entrances anywhere - that is a normal result, not a
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    /// Key of the floor the room was found on.
    pub floor_key: &'a str,
    /// The floor the room was found on.
    pub floor: &'a FloorData,
    /// The matched room.
    pub room: &'a Room,
    /// The entrance nearest to the room, preferring ground-floor entrances.
    pub entrance: Option<&'a Entrance>,
}

/// A [`SearchResult`] paired with the key of the building it was found in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMatch<'a> {
    /// Key of the building the room was found in.
    pub building_key: &'a str,
    /// The resolution result within that building.
    pub result: SearchResult<'a>,
}

fn ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of string keys to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

fn entries_as_map<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_keep_payload_order() {
        let building: BuildingData = serde_json::from_value(serde_json::json!({
            "originalName": "Test",
            "floors": {
                "2_sal": {"originalName": "2. sal", "rooms": [], "entrances": []},
                "stue": {"originalName": "Stueetage", "rooms": [], "entrances": []},
                "1_sal": {"originalName": "1. sal", "rooms": [], "entrances": []}
            }
        }))
        .unwrap();

        let keys: Vec<&str> = building.floors.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["2_sal", "stue", "1_sal"]);
    }

    #[test]
    fn order_survives_value_detour() {
        // Deserializing through an intermediate serde_json::Value must not
        // alphabetize map entries.
        let value: serde_json::Value = serde_json::from_str(
            r#"{
                "buildings": {
                    "zeta": {"originalName": "Zeta", "floors": {}},
                    "alpha": {"originalName": "Alpha", "floors": {}},
                    "mid": {"originalName": "Mid", "floors": {}}
                }
            }"#,
        )
        .unwrap();
        let payload: BuildingsPayload = serde_json::from_value(value).unwrap();
        let keys: Vec<&str> = payload.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn optional_fields_default() {
        let floor: FloorData = serde_json::from_value(serde_json::json!({
            "originalName": "Stueetage"
        }))
        .unwrap();
        assert!(floor.rooms.is_empty());
        assert!(floor.entrances.is_empty());
        assert!(floor.image.is_empty());

        let room: Room = serde_json::from_value(serde_json::json!({
            "id": "S10", "text": "S10", "x": 0.5, "y": 0.5
        }))
        .unwrap();
        assert_eq!(room.font_size, None);
    }

    #[test]
    fn payload_round_trips_as_map() {
        let payload = BuildingsPayload::from_json(
            r#"{"buildings": {"solbjerg": {"originalName": "Solbjerg", "floors": {}}}}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["buildings"]["solbjerg"]["originalName"], "Solbjerg");
    }

    #[test]
    fn missing_buildings_key_means_empty() {
        let payload = BuildingsPayload::from_json("{}").unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.1, 0.1);
        assert_eq!(a.distance_to(&a), 0.0);

        let c = Point::new(0.4, 0.5);
        assert!((a.distance_to(&c) - 0.5).abs() < 1e-12);
    }
}
