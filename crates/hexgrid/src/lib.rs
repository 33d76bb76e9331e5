//! Hex-grid coordinates and pixel projection for the galaxy map.
//!
//! We use the doubled coordinate system: a pair `(x, y)` addresses a hex
//! field iff `x + y` is even. Columns step by 2 within a row; odd rows are
//! shifted half a field sideways, giving each field the six neighbours
//! `(x±2, y)` and `(x±1, y±1)`.

mod coord;
mod layout;

pub use coord::{DistanceSet, HexCoord};
pub use layout::{HexLayout, OVERLAP_SCALE};
