//! Typed views of the game-state resources.
//!
//! Field sets follow the server's serializers. Collections can be fetched
//! with `?depth=1`, in which case related resources arrive embedded instead
//! of as URLs; [`Related`] covers both shapes.

use hexgrid::HexCoord;
use serde::Deserialize;
use serde_json::Value;

/// A related resource: its URL at depth 0, the embedded object at depth 1.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    Url(String),
    Full(T),
}

impl<T> Related<T> {
    /// The embedded resource, when the fetch asked for it.
    pub fn full(&self) -> Option<&T> {
        match self {
            Related::Full(value) => Some(value),
            Related::Url(_) => None,
        }
    }
}

/// `/worlds` entry: the global turn clock.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldStatus {
    pub url: String,
    pub now: u64,
    #[serde(default)]
    pub last_tick_timestamp: Option<f64>,
    pub remaining_seconds: i64,
}

/// `/users` entry: the logged-in player.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub empire: Option<String>,
}

/// `/unveiled` entry: a field revealed to the player's empire.
#[derive(Debug, Clone, Deserialize)]
pub struct Unveiled {
    pub url: String,
    pub position: HexCoord,
    #[serde(default)]
    pub by_whom: Option<String>,
}

/// A populated hex field holding one or more celestials.
#[derive(Debug, Clone, Deserialize)]
pub struct Sector {
    pub url: String,
    pub position: HexCoord,
    pub name: String,
    #[serde(default)]
    pub celestial_set: Vec<Related<Celestial>>,
    /// Build process currently running in this sector, if any.
    #[serde(default)]
    pub process: Option<String>,
}

/// A star or planet inside a sector.
#[derive(Debug, Clone, Deserialize)]
pub struct Celestial {
    pub url: String,
    pub sector: String,
    /// Orbital position within the sector; 0 is the central body.
    pub position: u32,
    pub features: CelestialFeatures,
    #[serde(default)]
    pub habitated_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialKind {
    Star,
    Planet,
}

/// Free-form feature map with a typed `type` discriminant. The server emits
/// arbitrary extra keys (mass, habitable zone, …) that the UI lists as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct CelestialFeatures {
    #[serde(rename = "type")]
    pub kind: CelestialKind,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A fleet: ships sharing a position, moving as one.
#[derive(Debug, Clone, Deserialize)]
pub struct Movable {
    pub url: String,
    pub position: HexCoord,
    /// Equal to `position` when the movable has no pending order.
    pub destination: HexCoord,
    pub speed: f32,
    pub next_position: HexCoord,
    #[serde(default)]
    pub ship_set: Vec<Related<Ship>>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub process: Option<String>,
}

impl Movable {
    pub fn is_moving(&self) -> bool {
        self.destination != self.position
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ship {
    pub url: String,
    /// URL of the blueprint this ship was built from.
    pub blueprint: String,
    #[serde(default)]
    pub movable: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// The player's empire, as the private endpoint reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Empire {
    pub url: String,
    pub name: String,
    /// Habitated celestials; the first one is the home world.
    #[serde(default)]
    pub habitat: Vec<String>,
    #[serde(default)]
    pub movables: Vec<String>,
    #[serde(default)]
    pub ships: Vec<String>,
    #[serde(default)]
    pub blueprint_set: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Blueprint {
    pub url: String,
    /// `constructions/<name>` or `ships/<name>`.
    pub base_id: String,
    pub empire: String,
    pub data: BlueprintData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintData {
    pub name: String,
    #[serde(default)]
    pub cost: Option<u64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A running background process (movement, building).
#[derive(Debug, Clone, Deserialize)]
pub struct Process {
    pub url: String,
    pub start_tick: u64,
    pub end_tick: u64,
    #[serde(default)]
    pub handler_id: Option<String>,
    /// Handler-private payload; the build menu reads `blueprint_url` and
    /// `celestial_url` out of it when the server provides them.
    #[serde(default)]
    pub data: Value,
}

impl Process {
    /// Completed fraction at `tick`, rounded to whole percent.
    pub fn progress_percent(&self, tick: u64) -> u32 {
        let total = self.end_tick.saturating_sub(self.start_tick);
        if total == 0 {
            return 100;
        }
        let done = tick.saturating_sub(self.start_tick).min(total);
        ((100.0 * done as f64 / total as f64).round()) as u32
    }

    pub fn remaining_turns(&self, tick: u64) -> u64 {
        self.end_tick.saturating_sub(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movable_payload_deserializes_with_embedded_ships() {
        let movable: Movable = serde_json::from_value(json!({
            "url": "http://game.test/api/movables/4/",
            "position": [2, 0],
            "destination": [6, 2],
            "speed": 1.0,
            "next_position": [3, 1],
            "ship_set": [
                { "url": "http://game.test/api/ships/9/",
                  "blueprint": "http://game.test/api/blueprints/1/" }
            ],
            "owner": "http://game.test/api/empires/1/",
            "process": null
        }))
        .unwrap();

        assert_eq!(movable.position, HexCoord::new(2, 0));
        assert!(movable.is_moving());
        let ship = movable.ship_set[0].full().unwrap();
        assert_eq!(ship.blueprint, "http://game.test/api/blueprints/1/");
    }

    #[test]
    fn related_resources_may_arrive_as_urls() {
        let sector: Sector = serde_json::from_value(json!({
            "url": "http://game.test/api/sectors/1/",
            "position": [0, 0],
            "name": "Castor",
            "celestial_set": ["http://game.test/api/celestials/1/"],
            "process": null
        }))
        .unwrap();

        assert!(sector.celestial_set[0].full().is_none());
        match &sector.celestial_set[0] {
            Related::Url(url) => assert_eq!(url, "http://game.test/api/celestials/1/"),
            Related::Full(_) => panic!("expected a URL"),
        }
    }

    #[test]
    fn celestial_features_split_kind_from_free_form_pairs() {
        let celestial: Celestial = serde_json::from_value(json!({
            "url": "http://game.test/api/celestials/2/",
            "sector": "http://game.test/api/sectors/1/",
            "position": 1,
            "features": { "type": "planet", "capacity": 3, "atmosphere": "thin" },
            "habitated_by": null
        }))
        .unwrap();

        assert_eq!(celestial.features.kind, CelestialKind::Planet);
        assert_eq!(celestial.features.extra.len(), 2);
        assert_eq!(celestial.features.extra["capacity"], json!(3));
        assert!(celestial.habitated_by.is_none());
    }

    #[test]
    fn process_progress_is_rounded_and_clamped() {
        let process: Process = serde_json::from_value(json!({
            "url": "http://game.test/api/processes/5/",
            "start_tick": 10,
            "end_tick": 13,
            "handler_id": "BuildingHandler",
            "data": { "blueprint_url": "http://game.test/api/blueprints/1/" }
        }))
        .unwrap();

        assert_eq!(process.progress_percent(10), 0);
        assert_eq!(process.progress_percent(11), 33);
        assert_eq!(process.progress_percent(12), 67);
        assert_eq!(process.progress_percent(13), 100);
        assert_eq!(process.progress_percent(20), 100);
        assert_eq!(process.remaining_turns(11), 2);
        assert_eq!(process.remaining_turns(20), 0);
    }

    #[test]
    fn world_status_reports_the_turn_clock() {
        let status: WorldStatus = serde_json::from_value(json!({
            "url": "http://game.test/api/worlds/1/",
            "now": 42,
            "last_tick_timestamp": 1700000000.5,
            "remaining_seconds": 90
        }))
        .unwrap();

        assert_eq!(status.now, 42);
        assert_eq!(status.remaining_seconds, 90);
    }
}
