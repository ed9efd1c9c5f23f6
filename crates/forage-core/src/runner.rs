//! Frame loop driving the simulation in real time.
//!
//! This module provides [`run_simulation`], the async function that owns the
//! simulation for the duration of a run:
//!
//! - **Fixed pacing**: one tick per `tick_interval`
//! - **Bounded run**: stop after `max_frames` frames or when a tick returns
//!   `false`
//! - **Live input**: direction changes arrive on a channel and are applied
//!   between ticks, never during one
//!
//! Both sources are multiplexed on a single task, so the simulation is never
//! touched concurrently and needs no locking.

use std::time::Duration;

use forage_types::Direction;
use forage_world::RandomSource;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::WorldConfig;
use crate::simulation::{Simulation, StopReason};
use crate::snapshot::SimulationSnapshot;

/// Reason why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The simulation reached its day limit.
    MaxDaysReached,
    /// Every roster agent died and the controlled agent ran out of energy.
    Extinction,
    /// The configured number of frames was rendered.
    FrameLimit,
}

impl From<StopReason> for EndReason {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::DayLimit => Self::MaxDaysReached,
            StopReason::Extinction => Self::Extinction,
        }
    }
}

/// Pacing and bounds for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Real time between ticks. Never zero.
    pub tick_interval: Duration,
    /// Maximum number of frames.
    pub max_frames: u32,
}

impl RunOptions {
    /// Build options, raising a zero interval to one millisecond.
    pub fn new(tick_interval: Duration, max_frames: u32) -> Self {
        Self {
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            max_frames,
        }
    }

    /// Options from the `world` config section.
    pub fn from_config(world: &WorldConfig) -> Self {
        Self::new(Duration::from_millis(world.tick_interval_ms), world.max_frames)
    }
}

/// Result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// Frames rendered (ticks that returned `true`).
    pub frames: u32,
    /// Day counter when the run ended.
    pub final_day: u32,
}

/// Callback invoked after each successful tick.
pub trait FrameCallback {
    /// Called with the post-tick snapshot.
    fn on_frame(&mut self, snapshot: &SimulationSnapshot);
}

/// A no-op frame callback for testing.
pub struct NoOpCallback;

impl FrameCallback for NoOpCallback {
    fn on_frame(&mut self, _snapshot: &SimulationSnapshot) {}
}

/// Run the simulation until it stops or the frame budget is spent.
///
/// Directions received on `inputs` are applied to the controlled agent as
/// they arrive; when several are pending at a frame boundary they are all
/// applied, in order, before the tick. A closed input channel is not an
/// error: the controlled agent keeps its last direction.
pub async fn run_simulation<R: RandomSource>(
    sim: &mut Simulation<R>,
    inputs: &mut mpsc::Receiver<Direction>,
    options: &RunOptions,
    callback: &mut dyn FrameCallback,
) -> SimulationResult {
    let mut ticker = tokio::time::interval(options.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut inputs_open = true;
    let mut frames: u32 = 0;

    info!(
        tick_interval_ms = u64::try_from(options.tick_interval.as_millis()).unwrap_or(u64::MAX),
        max_frames = options.max_frames,
        max_days = sim.max_days(),
        "Simulation starting"
    );

    if options.max_frames == 0 {
        return finish(sim, EndReason::FrameLimit, frames);
    }

    loop {
        tokio::select! {
            biased;

            received = inputs.recv(), if inputs_open => match received {
                Some(direction) => sim.set_direction(direction),
                None => {
                    warn!("input channel closed, controlled agent keeps its last direction");
                    inputs_open = false;
                }
            },

            _ = ticker.tick() => {
                if !sim.tick() {
                    let reason = sim
                        .stop_reason()
                        .map_or(EndReason::MaxDaysReached, EndReason::from);
                    return finish(sim, reason, frames);
                }
                frames = frames.saturating_add(1);
                callback.on_frame(&sim.snapshot());
                if frames >= options.max_frames {
                    return finish(sim, EndReason::FrameLimit, frames);
                }
            }
        }
    }
}

fn finish<R>(sim: &Simulation<R>, end_reason: EndReason, frames: u32) -> SimulationResult {
    SimulationResult {
        end_reason,
        frames,
        final_day: sim.day(),
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        frames = result.frames,
        final_day = result.final_day,
        "Simulation ended"
    );
}
