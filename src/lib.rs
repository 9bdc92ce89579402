//! Indoor wayfinding core: resolve rooms and nearest entrances from text.
//!
//! `wayin` takes loosely-structured human text - calendar titles, locations,
//! notes, or a free-typed query - and resolves it to a room on a building's
//! floor plan, together with the geometrically nearest entrance. It is the
//! text-to-room resolution engine behind a campus wayfinding app; rendering,
//! map projection and calendar access live outside this crate.
//!
//! # Features
//!
//! - **Simple API** - Single function call: [`extract_room_from_text`]
//! - **Per-building grammars** - Each building's room-numbering convention
//!   gets its own candidate generator, with a generic fallback
//! - **Ranked candidates** - Candidate order encodes confidence; the first
//!   one that resolves wins
//! - **Nearest entrance** - Ground-floor entrances are preferred, detected
//!   heuristically from floor names
//! - **Total over `Option`** - No error control flow: every operation
//!   returns a result or `None`, never panics on malformed text
//! - **Pure and thread-safe** - No caching, no I/O, no shared mutable
//!   state; safe to call on every keystroke
//!
//! # Quick Start
//!
//! ```
//! use wayin::{extract_room_from_text, BuildingsPayload};
//!
//! let payload = BuildingsPayload::from_json(r#"{
//!     "buildings": {
//!         "solbjerg": {
//!             "originalName": "Solbjerg Plads",
//!             "floors": {
//!                 "stue": {
//!                     "originalName": "Stueetage",
//!                     "rooms": [{"id": "S10", "text": "S10", "x": 0.5, "y": 0.5}],
//!                     "entrances": [{"text": "Hovedindgang", "x": 0.51, "y": 0.51}]
//!                 }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let matched = extract_room_from_text("Kalender: møde i lokale S10 (SP)", &payload).unwrap();
//! assert_eq!(matched.building_key, "solbjerg");
//! assert_eq!(matched.result.room.id, "S10");
//! assert_eq!(matched.result.entrance.unwrap().text, "Hovedindgang");
//! ```
//!
//! # Resolution Pipeline
//!
//! [`Extractor`] runs an explicit, ordered list of strategies and stops at
//! the first success:
//!
//! 1. **Labeled location** - a Danish `lokalitet:` label whose value names
//!    a known building code (`SP`, `PH`); everything after the code is
//!    expanded by that building's convention.
//! 2. **Direct match** - the entire input is already a room code; tried
//!    against every building in payload order.
//! 3. **Token sweep** - every room-code-looking token in the input is
//!    expanded into variants (alphanumeric form, digits-only form,
//!    prefix-stripped forms, per-building convention output) and each
//!    variant is tried across all buildings.
//!
//! Candidate generation is per building: see [`candidates::Convention`].
//! The building-code table is configuration, owned by the extractor; pass a
//! synthetic [`BuildingCodes`] table in tests.
//!
//! # Coordinates
//!
//! All positions are fractions of a floor-plan image in `[0, 1]`. The crate
//! only measures Euclidean distances between them; projecting to GPS or
//! pixels is the caller's concern. Coordinates are not validated - garbage
//! in, garbage distances out, by design.
//!
//! # Thread Safety
//!
//! All operations are read-only over an immutable [`BuildingsPayload`] and
//! allocate only local output. There is no global state beyond lazily
//! compiled regular expressions, so concurrent callers need no
//! synchronization.
//!
//! # Modules
//!
//! - [`types`] - Data model ([`BuildingsPayload`], [`Room`], [`SearchResult`], ...)
//! - [`geometry`] - Ground-floor detection and nearest-entrance selection
//! - [`search`] - Exact-match room resolution within and across buildings
//! - [`candidates`] - Per-building candidate generation
//! - [`extract`] - The strategy pipeline over free text

#![warn(missing_docs)]

pub mod candidates;
pub mod extract;
pub mod geometry;
pub mod search;
pub mod types;

pub use extract::{extract_room_from_text, BuildingCodes, Extractor, Strategy};
pub use search::{list_room_ids, search_across_buildings, search_room_in_building};
pub use types::{
    BuildingData, BuildingsPayload, Entrance, FloorData, Point, Room, RoomMatch, SearchResult,
};
