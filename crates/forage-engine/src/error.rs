//! Error types for the engine binary.
//!
//! [`EngineError`] wraps the failure modes of startup and frame output so
//! that `main` can propagate them with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: forage_core::config::ConfigError,
    },

    /// Writing frames to the output stream failed.
    #[error("frame output error: {source}")]
    Render {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
