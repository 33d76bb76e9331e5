//! Remote game-state access.
//!
//! The game server exposes a hyperlinked REST API: every resource carries
//! its own `url` and refers to related resources by URL. The client's only
//! effectful primitive is "fetch (or post to) a JSON resource by URL";
//! everything else in this crate is typed views over those payloads.

mod client;
mod error;
mod resources;

pub use client::{action_url, collection_url, get, post, with_depth, ApiClient, HttpApi};
pub use error::ApiError;
pub use resources::{
    Blueprint, BlueprintData, Celestial, CelestialFeatures, CelestialKind, Empire, Movable,
    Process, Related, Sector, Ship, Unveiled, User, WorldStatus,
};
