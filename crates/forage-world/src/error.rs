//! Error types for the `forage-world` crate.

use forage_types::Position;

/// Errors that can occur while building world state.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A resource was placed outside the bounded grid.
    #[error("resource position {0} is outside the grid")]
    OutOfBounds(Position),
}
