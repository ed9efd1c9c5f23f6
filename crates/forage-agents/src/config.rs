//! Configuration constants and defaults for agent mechanics.
//!
//! These structs map onto the `energy`, `agents`, and `controlled` sections
//! of `forage-config.yaml`. Every field has a serde default, so a partial
//! section overrides only what it names.

use serde::Deserialize;

use crate::error::AgentError;

/// Energy bookkeeping applied by movement and collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnergyConfig {
    /// Energy spent per move (default: 1).
    #[serde(default = "default_move_cost")]
    pub move_cost: i32,

    /// Energy regained per collected resource (default: 10).
    #[serde(default = "default_collect_reward")]
    pub collect_reward: i32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            move_cost: default_move_cost(),
            collect_reward: default_collect_reward(),
        }
    }
}

const fn default_move_cost() -> i32 {
    1
}

const fn default_collect_reward() -> i32 {
    10
}

/// Spawn parameters for the autonomous roster.
///
/// Speed and perception are drawn per agent, uniformly over the inclusive
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RosterParams {
    /// Lowest speed a roster agent can draw (default: 1).
    #[serde(default = "default_speed_min")]
    pub speed_min: u32,

    /// Highest speed a roster agent can draw (default: 5).
    #[serde(default = "default_speed_max")]
    pub speed_max: u32,

    /// Lowest perception radius a roster agent can draw (default: 5).
    #[serde(default = "default_perception_min")]
    pub perception_min: u32,

    /// Highest perception radius a roster agent can draw (default: 10).
    #[serde(default = "default_perception_max")]
    pub perception_max: u32,

    /// Starting energy for every roster agent (default: 100).
    #[serde(default = "default_starting_energy")]
    pub starting_energy: i32,
}

impl Default for RosterParams {
    fn default() -> Self {
        Self {
            speed_min: default_speed_min(),
            speed_max: default_speed_max(),
            perception_min: default_perception_min(),
            perception_max: default_perception_max(),
            starting_energy: default_starting_energy(),
        }
    }
}

impl RosterParams {
    /// Check that both ranges are ordered and produce valid agents.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvertedRange`] for an inverted range,
    /// [`AgentError::InvalidSpeed`] if the speed range admits zero, and
    /// [`AgentError::InvalidPerception`] if the perception range admits zero.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.speed_min > self.speed_max {
            return Err(AgentError::InvertedRange {
                name: "speed",
                min: self.speed_min,
                max: self.speed_max,
            });
        }
        if self.perception_min > self.perception_max {
            return Err(AgentError::InvertedRange {
                name: "perception",
                min: self.perception_min,
                max: self.perception_max,
            });
        }
        if self.speed_min == 0 {
            return Err(AgentError::InvalidSpeed(0));
        }
        if self.perception_min == 0 {
            return Err(AgentError::InvalidPerception(0.0));
        }
        Ok(())
    }
}

const fn default_speed_min() -> u32 {
    1
}

const fn default_speed_max() -> u32 {
    5
}

const fn default_perception_min() -> u32 {
    5
}

const fn default_perception_max() -> u32 {
    10
}

const fn default_starting_energy() -> i32 {
    100
}

/// Fixed attributes of the controlled agent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ControlledParams {
    /// Step magnitude per tick (default: 5).
    #[serde(default = "default_controlled_speed")]
    pub speed: u32,

    /// Pickup radius (default: 10).
    #[serde(default = "default_controlled_perception")]
    pub perception: f64,

    /// Starting energy (default: 100).
    #[serde(default = "default_starting_energy")]
    pub starting_energy: i32,
}

impl Default for ControlledParams {
    fn default() -> Self {
        Self {
            speed: default_controlled_speed(),
            perception: default_controlled_perception(),
            starting_energy: default_starting_energy(),
        }
    }
}

const fn default_controlled_speed() -> u32 {
    5
}

const fn default_controlled_perception() -> f64 {
    10.0
}
