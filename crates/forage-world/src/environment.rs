//! The resource environment.
//!
//! An [`Environment`] owns an ordered bag of [`Resource`]s. Iteration order
//! is insertion order and is significant: the tick cycle collects the
//! *first* resource within reach, so two runs with the same insertion order
//! make the same choices.
//!
//! # Removal
//!
//! Two removal paths exist:
//!
//! - [`Environment::remove`] drops *every* resource at an exact position.
//!   Coincident resources vanish together.
//! - [`Environment::remove_by_id`] drops exactly one resource.

use forage_types::{Position, ResourceId};
use tracing::trace;

use crate::error::WorldError;
use crate::random::RandomSource;
use crate::resource::Resource;

/// The collection of resources on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Resources in insertion order.
    resources: Vec<Resource>,
    /// Identifier handed to the next inserted resource.
    next_id: ResourceId,
}

impl Environment {
    /// Create an environment with `count` resources at random positions.
    pub fn new<R: RandomSource + ?Sized>(count: u32, rng: &mut R) -> Self {
        let mut env = Self::default();
        env.regenerate(count, rng);
        env
    }

    /// Create an environment holding resources at exactly `positions`, in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if any position lies outside the
    /// grid.
    pub fn from_positions<I>(positions: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut env = Self::default();
        for position in positions {
            if !position.in_bounds() {
                return Err(WorldError::OutOfBounds(position));
            }
            env.push(position);
        }
        Ok(env)
    }

    /// Append `count` resources at uniformly random grid positions.
    ///
    /// Returns the number of resources added, which is always `count`.
    pub fn regenerate<R: RandomSource + ?Sized>(&mut self, count: u32, rng: &mut R) -> u32 {
        for _ in 0..count {
            let position = rng.grid_position();
            self.push(position);
        }
        trace!(added = count, total = self.resources.len(), "resources regenerated");
        count
    }

    /// Remove every resource lying exactly at `position`.
    ///
    /// Returns how many resources were removed.
    pub fn remove(&mut self, position: Position) -> usize {
        let before = self.resources.len();
        self.resources.retain(|res| res.position != position);
        let removed = before.saturating_sub(self.resources.len());
        trace!(%position, removed, "resources removed by position");
        removed
    }

    /// Remove the single resource with identifier `id`.
    pub fn remove_by_id(&mut self, id: ResourceId) -> Option<Resource> {
        let idx = self.resources.iter().position(|res| res.id == id)?;
        let removed = self.resources.remove(idx);
        trace!(%id, position = %removed.position, "resource removed by id");
        Some(removed)
    }

    /// The first resource, in iteration order, strictly closer than
    /// `radius` to `point`.
    pub fn first_within(&self, point: Position, radius: f64) -> Option<Resource> {
        self.resources
            .iter()
            .find(|res| res.within(point, radius))
            .copied()
    }

    /// All resources in iteration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Positions of all resources in iteration order.
    pub fn positions(&self) -> Vec<Position> {
        self.resources.iter().map(|res| res.position).collect()
    }

    /// Number of resources currently on the grid.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the grid holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn push(&mut self, position: Position) {
        let id = self.next_id;
        self.next_id = id.next();
        self.resources.push(Resource { id, position });
    }
}
