//! Injectable randomness.
//!
//! Every random draw in the simulation (walk offsets, resource placement,
//! roster attributes, regeneration counts) goes through [`RandomSource`].
//! Production code uses [`RngSource`] over a seeded [`StdRng`]; tests use
//! [`SequenceSource`] to script exact values.
//!
//! Draw order is part of the contract: when a caller needs a point it draws
//! `x` before `y`.

use forage_types::{GRID_MAX, GRID_MIN, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Return an integer in the inclusive range `[low, high]`.
    ///
    /// Implementations treat an inverted range as if its bounds were
    /// swapped.
    fn int_in(&mut self, low: i32, high: i32) -> i32;

    /// Return a point uniformly distributed over the grid, drawing `x` first.
    fn grid_position(&mut self) -> Position {
        let x = self.int_in(GRID_MIN, GRID_MAX);
        let y = self.int_in(GRID_MIN, GRID_MAX);
        Position::new(x, y)
    }
}

const fn ordered(low: i32, high: i32) -> (i32, i32) {
    if low <= high { (low, high) } else { (high, low) }
}

/// [`RandomSource`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed always yields the same run.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = ordered(low, high);
        self.rng.random_range(low..=high)
    }
}

/// Scripted [`RandomSource`] that replays a fixed list of values.
///
/// Values are returned in order and the list wraps around when exhausted.
/// Each value is clamped into the requested range, so a script can say
/// "always the maximum" with a single large value. An empty script always
/// yields the low bound.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<i32>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source that replays `values`.
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = ordered(low, high);
        let value = self
            .cursor
            .checked_rem(self.values.len())
            .and_then(|idx| self.values.get(idx).copied())
            .unwrap_or(low);
        self.cursor = self.cursor.saturating_add(1);
        value.clamp(low, high)
    }
}
