//! Grid environment, resources, and randomness for the Forage simulation.
//!
//! This crate models the physical world: a bounded square grid holding an
//! unordered bag of resource points that grows by random regeneration and
//! shrinks when agents collect from it.
//!
//! # Modules
//!
//! - [`environment`] -- The resource collection with regeneration and
//!   position- or identity-based removal.
//! - [`error`] -- Error types for world construction.
//! - [`random`] -- The [`RandomSource`] seam with a seeded `rand` backend and
//!   a scripted backend for deterministic tests.
//! - [`resource`] -- A single collectible resource point.
//!
//! [`RandomSource`]: random::RandomSource

pub mod environment;
pub mod error;
pub mod random;
pub mod resource;

// Re-export primary types at crate root.
pub use environment::Environment;
pub use error::WorldError;
pub use random::{RandomSource, RngSource, SequenceSource};
pub use resource::Resource;
