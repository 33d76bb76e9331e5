//! Test support: an in-memory [`ApiClient`] over canned JSON payloads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use api::{ApiClient, ApiError};
use serde_json::{json, Value};

pub const BASE: &str = "http://game.test/api";

pub struct StubApi {
    resources: RefCell<HashMap<String, Value>>,
    pub gets: RefCell<Vec<String>>,
    pub posts: RefCell<Vec<(String, Value)>>,
}

impl StubApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            resources: RefCell::new(HashMap::new()),
            gets: RefCell::new(Vec::new()),
            posts: RefCell::new(Vec::new()),
        })
    }

    pub fn insert(&self, url: &str, value: Value) {
        self.resources.borrow_mut().insert(url.to_owned(), value);
    }
}

impl ApiClient for StubApi {
    fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        self.gets.borrow_mut().push(url.to_owned());
        self.resources
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                url: url.to_owned(),
                status: 404,
            })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.posts.borrow_mut().push((url.to_owned(), body.clone()));
        self.resources
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                url: url.to_owned(),
                status: 404,
            })
    }

    fn base_url(&self) -> &str {
        BASE
    }
}

pub fn url(path: &str) -> String {
    format!("{}/{}", BASE, path)
}

/// Seeds the canonical scenario: the empire of user "ada" habitates the
/// central star of sector "Castor" at the origin; a one-corvette fleet sits
/// on the adjacent field (1, 1); two blueprints; a build process is running
/// in the home sector.
pub fn seed_world(stub: &StubApi) {
    let empire_url = url("empires/1/");
    let sector_url = url("sectors/1/");
    let bp_corvette = url("blueprints/1/");
    let bp_mine = url("blueprints/2/");

    let celestial_star = json!({
        "url": url("celestials/1/"),
        "sector": sector_url,
        "position": 0,
        "features": { "type": "star", "brightness": "G2" },
        "habitated_by": empire_url
    });
    let celestial_planet = json!({
        "url": url("celestials/2/"),
        "sector": sector_url,
        "position": 1,
        "features": { "type": "planet", "capacity": 3, "atmosphere": "thin" },
        "habitated_by": null
    });
    let sector = json!({
        "url": sector_url,
        "position": [0, 0],
        "name": "Castor",
        "celestial_set": [celestial_star, celestial_planet],
        "process": url("processes/9/")
    });
    let movable = json!({
        "url": url("movables/4/"),
        "position": [1, 1],
        "destination": [1, 1],
        "speed": 1.0,
        "next_position": [1, 1],
        "ship_set": [
            { "url": url("ships/9/"), "blueprint": bp_corvette, "movable": url("movables/4/") }
        ],
        "owner": empire_url,
        "process": null
    });

    stub.insert(
        &url("users"),
        json!([{ "url": url("users/1/"), "username": "ada", "empire": empire_url }]),
    );
    stub.insert(
        &url("worlds"),
        json!([{ "url": url("worlds/1/"), "now": 42, "remaining_seconds": 90 }]),
    );
    stub.insert(
        &url("unveiled"),
        json!([
            { "url": url("unveiled/1/"), "position": [0, 0] },
            { "url": url("unveiled/2/"), "position": [2, 0] },
            { "url": url("unveiled/3/"), "position": [1, 1] }
        ]),
    );
    stub.insert(&url("sectors?depth=1"), json!([sector]));
    stub.insert(&url("movables?depth=1"), json!([movable]));
    stub.insert(&url("movables/4/"), movable.clone());
    stub.insert(&url("sectors/1/"), sector.clone());
    stub.insert(&url("sectors/1/?depth=1"), sector.clone());
    stub.insert(&url("celestials/1/"), celestial_star);
    stub.insert(&url("celestials/2/"), celestial_planet);
    stub.insert(
        &empire_url,
        json!({
            "url": empire_url,
            "name": "Ada's Empire",
            "habitat": [url("celestials/1/")],
            "movables": [url("movables/4/")],
            "ships": [url("ships/9/")],
            "blueprint_set": [bp_corvette, bp_mine]
        }),
    );
    stub.insert(
        &bp_corvette,
        json!({
            "url": bp_corvette,
            "base_id": "ships/corvette",
            "empire": empire_url,
            "data": { "name": "Corvette", "cost": 3, "speed": 1.0 }
        }),
    );
    stub.insert(
        &bp_mine,
        json!({
            "url": bp_mine,
            "base_id": "constructions/mine",
            "empire": empire_url,
            "data": { "name": "Ore Mine", "cost": 2 }
        }),
    );
    stub.insert(
        &url("processes/9/"),
        json!({
            "url": url("processes/9/"),
            "start_tick": 40,
            "end_tick": 44,
            "handler_id": "BuildingHandler",
            "data": {
                "blueprint_url": bp_corvette,
                "celestial_url": url("celestials/2/")
            }
        }),
    );

    // Canned action responses.
    stub.insert(&url("movables/4/move_to/"), movable);
    stub.insert(
        &url("blueprints/2/build/"),
        json!({
            "url": url("processes/10/"),
            "start_tick": 42,
            "end_tick": 44,
            "handler_id": "BuildingHandler",
            "data": {
                "blueprint_url": bp_mine,
                "celestial_url": url("celestials/2/")
            }
        }),
    );
    stub.insert(&url("celestials/2/colonize/"), json!({ "status": "started" }));
}
