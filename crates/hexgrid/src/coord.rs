//! Doubled hex coordinates, adjacency, and movement stepping.

use serde::{Deserialize, Serialize};

/// A hex-field address in doubled coordinates. Invariant: `x + y` is even.
///
/// Serialized as the two-element array the game-state feed uses for
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    /// Panics when `(x, y)` is not a valid hex coordinate; use [`try_new`]
    /// for unvalidated input.
    ///
    /// [`try_new`]: HexCoord::try_new
    pub fn new(x: i32, y: i32) -> Self {
        assert!(
            Self::is_valid(x, y),
            "hex coordinates ({}, {}) are invalid",
            x,
            y
        );
        Self { x, y }
    }

    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        Self::is_valid(x, y).then_some(Self { x, y })
    }

    /// A pair addresses a hex field iff its sum is even.
    pub fn is_valid(x: i32, y: i32) -> bool {
        (x + y).rem_euclid(2) == 0
    }

    /// The six adjacent fields.
    pub fn neighbours(&self) -> [HexCoord; 6] {
        let Self { x, y } = *self;
        [
            Self { x: x - 2, y },
            Self { x: x + 2, y },
            Self { x: x - 1, y: y - 1 },
            Self { x: x + 1, y: y - 1 },
            Self { x: x - 1, y: y + 1 },
            Self { x: x + 1, y: y + 1 },
        ]
    }

    pub fn is_adjacent(&self, other: HexCoord) -> bool {
        self.neighbours().contains(&other)
    }

    /// One movement step toward `destination`: the delta is clamped to
    /// `[-2, +2]`, or to `[-1, +1]` when it leaves the row, with a parity
    /// correction so the result stays on the grid. Matches the stepping the
    /// game server applies each turn, so trajectories can be previewed
    /// client-side.
    pub fn step_toward(&self, destination: HexCoord) -> HexCoord {
        let mut dx = (destination.x - self.x).clamp(-2, 2);
        let mut dy = (destination.y - self.y).clamp(-2, 2);
        if dy.abs() >= 1 {
            dx = dx.clamp(-1, 1);
            dy = dy.clamp(-1, 1);
            if !Self::is_valid(self.x + dx, self.y + dy) {
                dx -= 1;
            }
        }
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position after one turn of movement at `speed` (steps `ceil(speed)`
    /// times).
    pub fn advance_toward(&self, destination: HexCoord, speed: f32) -> HexCoord {
        let mut position = *self;
        for _ in 0..speed.ceil() as u32 {
            position = position.step_toward(destination);
        }
        position
    }

    /// Per-turn waypoints from here to `destination`.
    pub fn trajectory_toward(&self, destination: HexCoord, speed: f32) -> Vec<HexCoord> {
        let mut trajectory = Vec::new();
        let mut position = *self;
        while position != destination {
            let next = position.advance_toward(destination, speed);
            if next == position {
                break; // zero speed makes no progress
            }
            position = next;
            trajectory.push(position);
        }
        trajectory
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from([x, y]: [i32; 2]) -> Self {
        debug_assert!(Self::is_valid(x, y), "hex coordinates ({}, {}) are invalid", x, y);
        Self { x, y }
    }
}

impl From<HexCoord> for [i32; 2] {
    fn from(c: HexCoord) -> Self {
        [c.x, c.y]
    }
}

/// The radius-`r` hexagon of fields around a center: the sub-level set of
/// the grid distance, represented as the intersection of six half-planes.
#[derive(Debug, Clone, Copy)]
pub struct DistanceSet {
    center: HexCoord,
    radius: i32,
}

impl DistanceSet {
    pub fn new(center: HexCoord, radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: HexCoord) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let r = self.radius;
        // Half-planes for the six hexagon edges, top-left around to
        // bottom-left.
        -dx + dy <= 2 * r
            && dy <= r
            && dx + dy <= 2 * r
            && dx - dy <= 2 * r
            && -dy <= r
            && -dx - dy <= 2 * r
    }

    /// Bounding box as `(x_min, x_max, y_min, y_max)`.
    pub fn bbox(&self) -> (i32, i32, i32, i32) {
        (
            self.center.x - 2 * self.radius,
            self.center.x + 2 * self.radius,
            self.center.y - self.radius,
            self.center.y + self.radius,
        )
    }

    /// All valid coordinates contained in the set.
    pub fn iter(&self) -> impl Iterator<Item = HexCoord> + '_ {
        let (x_min, x_max, y_min, y_max) = self.bbox();
        (y_min..=y_max).flat_map(move |y| {
            (x_min..=x_max)
                .filter_map(move |x| HexCoord::try_new(x, y))
                .filter(move |c| self.contains(*c))
        })
    }
}
