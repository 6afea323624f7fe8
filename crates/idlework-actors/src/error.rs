//! Error types for the idlework-actors crate.

/// Errors that can occur when building an actor rig.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// The rig configuration violates a bound.
    #[error("invalid actor configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
