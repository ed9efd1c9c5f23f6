//! Grid coordinates.
//!
//! The world is the closed square `[GRID_MIN, GRID_MAX]` on both axes.
//! Every [`Position`] produced by movement passes through [`Position::clamped`],
//! so no agent or resource can sit outside the square.

use serde::{Deserialize, Serialize};

/// Lowest coordinate on either axis.
pub const GRID_MIN: i32 = 0;

/// Highest coordinate on either axis.
pub const GRID_MAX: i32 = 100;

/// A point on the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Create a position without clamping.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a position with both axes clamped into the grid.
    pub const fn clamped(x: i32, y: i32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Whether both axes lie inside the grid.
    pub const fn in_bounds(self) -> bool {
        self.x >= GRID_MIN && self.x <= GRID_MAX && self.y >= GRID_MIN && self.y <= GRID_MAX
    }

    /// Displace by `(dx, dy)` and clamp the result into the grid.
    #[must_use]
    pub const fn offset_clamped(self, dx: i32, dy: i32) -> Self {
        Self::clamped(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const fn clamp_axis(value: i32) -> i32 {
    if value < GRID_MIN {
        GRID_MIN
    } else if value > GRID_MAX {
        GRID_MAX
    } else {
        value
    }
}
