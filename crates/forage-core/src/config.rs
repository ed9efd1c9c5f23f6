//! Configuration loading and typed config structures for the Forage simulation.
//!
//! The canonical configuration lives in `forage-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, and
//! provides a loader that reads and validates the file. Every field has a
//! default, so an empty document yields the stock ten-agent, fifty-day run.

use std::path::Path;

use forage_agents::{AgentError, ControlledParams, EnergyConfig, RosterParams};
use serde::Deserialize;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// Agent spawn parameters are invalid.
    #[error("invalid agent parameters: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `forage-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run length, pacing, and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// How many agents and resources to start with.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Spawn ranges for the autonomous roster.
    #[serde(default)]
    pub agents: RosterParams,

    /// Fixed attributes of the controlled agent.
    #[serde(default)]
    pub controlled: ControlledParams,

    /// Energy cost of moving and reward for collecting.
    #[serde(default)]
    pub energy: EnergyConfig,

    /// Resource regeneration and removal behavior.
    #[serde(default)]
    pub resources: ResourceConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// The environment variable `FORAGE_SEED` overrides `world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] or [`ConfigError::Agent`] naming the
    /// first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.agent_count == 0 {
            return Err(invalid("population.agent_count must be at least 1"));
        }
        if self.world.tick_interval_ms == 0 {
            return Err(invalid("world.tick_interval_ms must be at least 1"));
        }
        if self.resources.regen_min > self.resources.regen_max {
            return Err(invalid(format!(
                "resources.regen_min ({}) exceeds resources.regen_max ({})",
                self.resources.regen_min, self.resources.regen_max
            )));
        }
        self.agents.validate()?;
        if self.controlled.speed == 0 {
            return Err(AgentError::InvalidSpeed(self.controlled.speed).into());
        }
        if !self.controlled.perception.is_finite() || self.controlled.perception <= 0.0 {
            return Err(AgentError::InvalidPerception(self.controlled.perception).into());
        }
        Ok(())
    }

    /// Number of autonomous agents: every agent except the controlled one.
    pub const fn roster_size(&self) -> u32 {
        self.population.agent_count.saturating_sub(1)
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Run length, pacing, and seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Last day that may be simulated (default: 50).
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Real-time milliseconds between frames (default: 500).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of frames the driver renders (default: 50).
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_days: default_max_days(),
            tick_interval_ms: default_tick_interval_ms(),
            max_frames: default_max_frames(),
        }
    }
}

impl WorldConfig {
    /// Override the seed from `FORAGE_SEED` when it is set and numeric.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("FORAGE_SEED")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            self.seed = Some(seed);
        }
    }
}

/// Starting population.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Total agents including the controlled one (default: 10).
    #[serde(default = "default_agent_count")]
    pub agent_count: u32,

    /// Resources placed before the first tick (default: 20).
    #[serde(default = "default_resource_count")]
    pub resource_count: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agent_count: default_agent_count(),
            resource_count: default_resource_count(),
        }
    }
}

/// What happens to the environment when an agent collects a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Remove every resource at the collected coordinate.
    #[default]
    Position,
    /// Remove only the collected resource.
    Identity,
}

/// Resource regeneration and removal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceConfig {
    /// Fewest resources added per tick (default: 1).
    #[serde(default = "default_regen_min")]
    pub regen_min: u32,

    /// Most resources added per tick (default: 5).
    #[serde(default = "default_regen_max")]
    pub regen_max: u32,

    /// Removal behavior on collection (default: `position`).
    #[serde(default)]
    pub removal: RemovalPolicy,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            regen_min: default_regen_min(),
            regen_max: default_regen_max(),
            removal: RemovalPolicy::default(),
        }
    }
}

const fn default_max_days() -> u32 {
    50
}

const fn default_tick_interval_ms() -> u64 {
    500
}

const fn default_max_frames() -> u32 {
    50
}

const fn default_agent_count() -> u32 {
    10
}

const fn default_resource_count() -> u32 {
    20
}

const fn default_regen_min() -> u32 {
    1
}

const fn default_regen_max() -> u32 {
    5
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.world.max_days, 50);
        assert_eq!(config.world.tick_interval_ms, 500);
        assert_eq!(config.world.max_frames, 50);
        assert_eq!(config.world.seed, None);
        assert_eq!(config.population.agent_count, 10);
        assert_eq!(config.population.resource_count, 20);
        assert_eq!(config.resources.regen_min, 1);
        assert_eq!(config.resources.regen_max, 5);
        assert_eq!(config.resources.removal, RemovalPolicy::Position);
        assert_eq!(config.roster_size(), 9);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r"
world:
  seed: 42
  max_days: 10
  tick_interval_ms: 100
  max_frames: 12
population:
  agent_count: 3
  resource_count: 0
agents:
  speed_min: 2
  speed_max: 2
controlled:
  speed: 3
  perception: 4.5
energy:
  move_cost: 2
  collect_reward: 5
resources:
  regen_min: 0
  regen_max: 0
  removal: identity
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.seed, Some(42));
        assert_eq!(config.world.max_days, 10);
        assert_eq!(config.world.max_frames, 12);
        assert_eq!(config.population.agent_count, 3);
        assert_eq!(config.agents.speed_min, 2);
        assert_eq!(config.agents.perception_max, 10);
        assert_eq!(config.controlled.speed, 3);
        assert_eq!(config.energy.move_cost, 2);
        assert_eq!(config.resources.removal, RemovalPolicy::Identity);
    }

    #[test]
    fn zero_agents_rejected() {
        let result = SimulationConfig::parse("population:\n  agent_count: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let result = SimulationConfig::parse("world:\n  tick_interval_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn inverted_regen_range_rejected() {
        let result = SimulationConfig::parse("resources:\n  regen_min: 6\n  regen_max: 2\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn bad_roster_params_rejected() {
        let result = SimulationConfig::parse("agents:\n  speed_min: 0\n");
        assert!(matches!(result, Err(ConfigError::Agent { .. })));
    }

    #[test]
    fn bad_controlled_params_rejected() {
        let result = SimulationConfig::parse("controlled:\n  perception: -1.0\n");
        assert!(matches!(result, Err(ConfigError::Agent { .. })));
    }

    #[test]
    fn negative_count_is_a_parse_error() {
        let result = SimulationConfig::parse("population:\n  resource_count: -3\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimulationConfig::from_file(Path::new("/nonexistent/forage-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped =
            SimulationConfig::parse(include_str!("../../../forage-config.yaml")).unwrap();
        assert_eq!(shipped, SimulationConfig::default());
    }
}
