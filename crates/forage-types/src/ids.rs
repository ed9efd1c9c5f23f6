//! Type-safe identifier wrappers.
//!
//! Resource identifiers are sequential integers handed out by the owning
//! environment, so seeded runs produce identical ids.

use serde::{Deserialize, Serialize};

/// Unique identifier for a resource within one environment.
///
/// The default id is zero, the first one an environment hands out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// The identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "res-{}", self.0)
    }
}
