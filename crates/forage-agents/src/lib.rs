//! Agent state, movement, and roster spawning for the Forage simulation.
//!
//! This crate contains the logic layer for agents: everything that operates
//! on a single agent's state without knowing about the tick cycle. The core
//! crate drives these operations once per tick.
//!
//! # Modules
//!
//! - [`agent`] -- [`AgentState`] (the shared record) and [`Agent`]
//!   (record plus [`Movement`] policy)
//! - [`config`] -- Tunable energy costs and spawn parameters
//! - [`error`] -- Error types for agent construction ([`AgentError`])
//! - [`spawner`] -- Roster and controlled-agent creation

pub mod agent;
pub mod config;
pub mod error;
pub mod spawner;

// Re-export primary types at crate root for convenience.
pub use agent::{Agent, AgentState, Movement};
pub use config::{ControlledParams, EnergyConfig, RosterParams};
pub use error::AgentError;
pub use spawner::{spawn_controlled, spawn_roster};
