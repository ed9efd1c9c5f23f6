//! Error types for the forage-agents crate.
//!
//! Agent construction validates its inputs so that a bad speed or
//! perception radius never reaches the tick cycle.

/// Errors that can occur while creating agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Speed must be a positive step magnitude.
    #[error("invalid speed {0}: must be at least 1")]
    InvalidSpeed(u32),

    /// Perception must be a finite, positive radius.
    #[error("invalid perception radius {0}: must be finite and positive")]
    InvalidPerception(f64),

    /// A spawn range has its lower bound above its upper bound.
    #[error("invalid {name} range: {min} > {max}")]
    InvertedRange {
        /// Which parameter the range belongs to.
        name: &'static str,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
}
