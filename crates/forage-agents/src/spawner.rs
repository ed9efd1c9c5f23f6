//! Agent spawner for seeding the simulation.
//!
//! Roster agents alternate gatherer/hunter by index and draw their speed,
//! perception, and starting position from the random source in that order
//! (position `x` before `y`). The controlled agent has fixed attributes and
//! only draws its position.

use forage_types::Role;
use forage_world::RandomSource;
use tracing::debug;

use crate::agent::{Agent, AgentState};
use crate::config::{ControlledParams, RosterParams};
use crate::error::AgentError;

/// Create `count` random-walking roster agents.
///
/// # Errors
///
/// Returns [`AgentError`] if `params` fails validation.
pub fn spawn_roster<R: RandomSource + ?Sized>(
    count: u32,
    params: &RosterParams,
    rng: &mut R,
) -> Result<Vec<Agent>, AgentError> {
    params.validate()?;

    let mut roster = Vec::new();
    for index in 0..count {
        let role = Role::for_roster_index(usize::try_from(index).unwrap_or(usize::MAX));
        let speed = draw_u32(rng, params.speed_min, params.speed_max);
        let perception = draw_u32(rng, params.perception_min, params.perception_max);
        let position = rng.grid_position();

        let state = AgentState::new(
            role,
            speed,
            f64::from(perception),
            params.starting_energy,
            position,
        )?;
        debug!(index, %role, speed, perception, %position, "roster agent spawned");
        roster.push(Agent::roaming(state));
    }
    Ok(roster)
}

/// Create the controlled agent at a random position, facing neutral.
///
/// # Errors
///
/// Returns [`AgentError`] if the fixed speed or perception is invalid.
pub fn spawn_controlled<R: RandomSource + ?Sized>(
    params: &ControlledParams,
    rng: &mut R,
) -> Result<Agent, AgentError> {
    let position = rng.grid_position();
    let state = AgentState::new(
        Role::Controlled,
        params.speed,
        params.perception,
        params.starting_energy,
        position,
    )?;
    debug!(%position, speed = params.speed, "controlled agent spawned");
    Ok(Agent::steered(state))
}

/// Draw from an inclusive `u32` range through the `i32` random source.
fn draw_u32<R: RandomSource + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let low = i32::try_from(min).unwrap_or(i32::MAX);
    let high = i32::try_from(max).unwrap_or(i32::MAX);
    u32::try_from(rng.int_in(low, high)).unwrap_or(min)
}
