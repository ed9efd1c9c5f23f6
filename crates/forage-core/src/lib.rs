//! Tick cycle, configuration, and frame runner for the Forage simulation.
//!
//! This crate owns the per-tick state mutation that drives the simulation
//! and the read-only views that renderers consume.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `forage-config.yaml` into
//!   strongly-typed structs.
//! - [`input`] -- Mapping of raw key signals to movement directions.
//! - [`runner`] -- The async frame loop: fixed-period ticks interleaved
//!   with direction changes from an input channel.
//! - [`simulation`] -- [`Simulation`], the two-state tick machine.
//! - [`snapshot`] -- Serializable per-frame views for renderers.
//!
//! [`Simulation`]: simulation::Simulation

pub mod config;
pub mod input;
pub mod runner;
pub mod simulation;
pub mod snapshot;
