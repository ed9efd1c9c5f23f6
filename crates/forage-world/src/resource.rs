//! A single collectible resource point.

use forage_types::{Position, ResourceId};
use serde::{Deserialize, Serialize};

/// A resource lying on the grid.
///
/// Two resources may share a position; they are still distinct by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier unique within the owning environment.
    pub id: ResourceId,
    /// Where the resource lies.
    pub position: Position,
}

impl Resource {
    /// Whether `point` is strictly closer than `radius`.
    pub fn within(&self, point: Position, radius: f64) -> bool {
        self.position.distance_to(point) < radius
    }
}
