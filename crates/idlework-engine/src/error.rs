//! Error types for the runner binary.
//!
//! [`EngineError`] wraps every failure that can stop the runner during
//! startup. Nothing in the frame loop itself is fatal.

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: idlework_core::ConfigError,
    },

    /// The game could not be assembled.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: idlework_core::GameError,
    },
}
