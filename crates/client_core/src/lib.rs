//! Core client primitives for Starhold.
//!
//! This crate provides the foundational types used across all client modules:
//! - Stacked event dispatch (the map-click event bus)
//! - Turn status and countdown formatting

pub mod events;
pub mod status;

pub use events::EventStack;
pub use status::TurnStatus;
