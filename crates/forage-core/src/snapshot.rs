//! Read-only views of the simulation for renderers.
//!
//! A [`SimulationSnapshot`] is an owned copy of everything a frame needs to
//! draw. It is detached from the simulation, so renderers may hold it across
//! ticks.

use forage_agents::AgentState;
use forage_types::{Position, Role};
use serde::{Deserialize, Serialize};

/// What a renderer needs to know about one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentView {
    /// Role tag.
    pub role: Role,
    /// Current grid position.
    pub position: Position,
    /// Remaining energy.
    pub energy: i32,
    /// Resources collected so far.
    pub resources_collected: u32,
}

impl From<&AgentState> for AgentView {
    fn from(state: &AgentState) -> Self {
        Self {
            role: state.role,
            position: state.position,
            energy: state.energy,
            resources_collected: state.resources_collected,
        }
    }
}

/// One frame's worth of simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Current day number.
    pub day: u32,
    /// Whether the last tick continued the simulation.
    pub running: bool,
    /// The living roster, in roster order.
    pub agents: Vec<AgentView>,
    /// The controlled agent.
    pub controlled: AgentView,
    /// Resource positions in iteration order.
    pub resources: Vec<Position>,
}

impl SimulationSnapshot {
    /// Positions of the roster agents, in roster order.
    pub fn agent_positions(&self) -> Vec<Position> {
        self.agents.iter().map(|agent| agent.position).collect()
    }
}
