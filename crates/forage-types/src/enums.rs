//! Enumeration types shared across the workspace.

use serde::{Deserialize, Serialize};

/// The role tag carried by every agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Autonomous random walker (even roster slots).
    Gatherer,
    /// Autonomous random walker (odd roster slots).
    Hunter,
    /// The single externally steered agent.
    Controlled,
}

impl Role {
    /// Role assigned to the roster agent at `index`.
    pub const fn for_roster_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Gatherer
        } else {
            Self::Hunter
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Gatherer => "gatherer",
            Self::Hunter => "hunter",
            Self::Controlled => "controlled",
        };
        f.write_str(name)
    }
}

/// A unit direction vector with each component in `{-1, 0, 1}`.
///
/// The positive `y` axis points up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    dx: i32,
    dy: i32,
}

impl Direction {
    /// `(0, 1)`
    pub const UP: Self = Self { dx: 0, dy: 1 };
    /// `(0, -1)`
    pub const DOWN: Self = Self { dx: 0, dy: -1 };
    /// `(-1, 0)`
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    /// `(1, 0)`
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    /// `(0, 0)`, no displacement.
    pub const NEUTRAL: Self = Self { dx: 0, dy: 0 };

    /// Build a direction from arbitrary components, keeping only their sign.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Horizontal component.
    pub const fn dx(self) -> i32 {
        self.dx
    }

    /// Vertical component.
    pub const fn dy(self) -> i32 {
        self.dy
    }

    /// Whether this is the neutral vector.
    pub const fn is_neutral(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Displacement of `magnitude` along this direction.
    pub const fn scaled(self, magnitude: i32) -> (i32, i32) {
        (
            self.dx.saturating_mul(magnitude),
            self.dy.saturating_mul(magnitude),
        )
    }
}
