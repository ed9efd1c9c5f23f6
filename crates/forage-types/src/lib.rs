//! Shared type definitions for the Forage simulation.
//!
//! This crate is the single source of truth for the small value types that
//! flow between the world, agent, and core crates and out to renderers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`enums`] -- Agent roles and movement directions
//! - [`position`] -- Grid coordinates and the bounded-square clamp

pub mod enums;
pub mod ids;
pub mod position;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, Role};
pub use ids::ResourceId;
pub use position::{GRID_MAX, GRID_MIN, Position};
