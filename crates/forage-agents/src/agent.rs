//! Agent state and movement.
//!
//! Every agent is an [`AgentState`] record paired with a [`Movement`]
//! policy. Roster agents random-walk; the controlled agent follows a
//! direction set from outside the simulation. The tick cycle calls
//! [`Agent::step`] and never needs to know which kind it holds.
//!
//! # Energy
//!
//! Each move costs [`EnergyConfig::move_cost`] whether or not the agent
//! actually changed position (a clamped move into a wall still costs).
//! Each successful collection pays [`EnergyConfig::collect_reward`].

use forage_types::{Direction, Position, Role};
use forage_world::RandomSource;
use serde::Serialize;

use crate::config::EnergyConfig;
use crate::error::AgentError;

/// The mutable state shared by every kind of agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentState {
    /// Role tag.
    pub role: Role,
    /// Maximum step magnitude per tick on each axis.
    pub speed: u32,
    /// Pickup radius.
    pub perception: f64,
    /// Remaining energy. Roster agents at or below zero are removed.
    pub energy: i32,
    /// Current grid position.
    pub position: Position,
    /// Number of resources collected so far.
    pub resources_collected: u32,
}

impl AgentState {
    /// Create an agent record. The position is clamped into the grid.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidSpeed`] for a zero speed and
    /// [`AgentError::InvalidPerception`] for a non-finite or non-positive
    /// radius.
    pub fn new(
        role: Role,
        speed: u32,
        perception: f64,
        energy: i32,
        position: Position,
    ) -> Result<Self, AgentError> {
        if speed == 0 {
            return Err(AgentError::InvalidSpeed(speed));
        }
        if !perception.is_finite() || perception <= 0.0 {
            return Err(AgentError::InvalidPerception(perception));
        }
        Ok(Self {
            role,
            speed,
            perception,
            energy,
            position: Position::clamped(position.x, position.y),
            resources_collected: 0,
        })
    }

    /// Random-walk one step.
    ///
    /// Draws an offset in `[-speed, speed]` for `x`, then for `y`, clamps
    /// the result into the grid, and pays the move cost.
    pub fn move_random<R: RandomSource + ?Sized>(&mut self, rng: &mut R, energy: &EnergyConfig) {
        let reach = self.reach();
        let dx = rng.int_in(reach.saturating_neg(), reach);
        let dy = rng.int_in(reach.saturating_neg(), reach);
        self.position = self.position.offset_clamped(dx, dy);
        self.pay_move(energy);
    }

    /// Move `speed` cells along `direction`, clamp, and pay the move cost.
    pub fn move_controlled(&mut self, direction: Direction, energy: &EnergyConfig) {
        let (dx, dy) = direction.scaled(self.reach());
        self.position = self.position.offset_clamped(dx, dy);
        self.pay_move(energy);
    }

    /// Euclidean distance from the current position to `point`.
    pub fn distance_to(&self, point: Position) -> f64 {
        self.position.distance_to(point)
    }

    /// Whether `point` lies strictly inside the perception radius.
    pub fn can_reach(&self, point: Position) -> bool {
        self.distance_to(point) < self.perception
    }

    /// Collect the resource at `resource` if it is within perception.
    ///
    /// Only updates this agent; removing the resource from the environment
    /// is the caller's job. Returns whether the collection happened.
    pub fn collect(&mut self, resource: Position, energy: &EnergyConfig) -> bool {
        if !self.can_reach(resource) {
            return false;
        }
        self.resources_collected = self.resources_collected.saturating_add(1);
        self.energy = self.energy.saturating_add(energy.collect_reward);
        true
    }

    /// Whether energy is still above zero.
    pub const fn is_alive(&self) -> bool {
        self.energy > 0
    }

    fn reach(&self) -> i32 {
        i32::try_from(self.speed).unwrap_or(i32::MAX)
    }

    const fn pay_move(&mut self, energy: &EnergyConfig) {
        self.energy = self.energy.saturating_sub(energy.move_cost);
    }
}

/// How an agent chooses its displacement each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "direction")]
pub enum Movement {
    /// Uniform random offset on each axis.
    RandomWalk,
    /// Deterministic step along the held direction.
    Directional(Direction),
}

/// An agent: shared state plus movement policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    /// The agent's record.
    pub state: AgentState,
    /// The agent's movement policy.
    pub movement: Movement,
}

impl Agent {
    /// A random-walking agent.
    pub const fn roaming(state: AgentState) -> Self {
        Self {
            state,
            movement: Movement::RandomWalk,
        }
    }

    /// A directionally steered agent, initially facing [`Direction::NEUTRAL`].
    pub const fn steered(state: AgentState) -> Self {
        Self {
            state,
            movement: Movement::Directional(Direction::NEUTRAL),
        }
    }

    /// Move once according to the movement policy.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R, energy: &EnergyConfig) {
        match self.movement {
            Movement::RandomWalk => self.state.move_random(rng, energy),
            Movement::Directional(direction) => self.state.move_controlled(direction, energy),
        }
    }

    /// Replace the held direction of a steered agent.
    ///
    /// The direction persists until the next call. Returns `false` and
    /// changes nothing for a random-walking agent.
    pub const fn set_direction(&mut self, direction: Direction) -> bool {
        match self.movement {
            Movement::Directional(_) => {
                self.movement = Movement::Directional(direction);
                true
            }
            Movement::RandomWalk => false,
        }
    }

    /// The held direction, if this agent is steered.
    pub const fn direction(&self) -> Option<Direction> {
        match self.movement {
            Movement::Directional(direction) => Some(direction),
            Movement::RandomWalk => None,
        }
    }

    /// Current position.
    pub const fn position(&self) -> Position {
        self.state.position
    }

    /// Whether energy is still above zero.
    pub const fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}
