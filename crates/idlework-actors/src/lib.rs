//! Procedural actor controllers for the idlework progression engine.
//!
//! Each actor is a two-phase swing state machine driven purely by the
//! scheduler's absolute elapsed time and its own parameters. The whole pool
//! is registered with the scheduler as a single [`ActorRig`] receiver.
//!
//! # Modules
//!
//! - [`config`] -- Rig tunables ([`RigConfig`])
//! - [`controller`] -- One animated unit ([`ActorController`])
//! - [`easing`] -- Phase and swing curves
//! - [`error`] -- Error types ([`ActorError`])
//! - [`rig`] -- The controller pool and the [`ActorFleet`] control seam

pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod rig;

// Re-export primary types at crate root for convenience.
pub use config::RigConfig;
pub use controller::{ActorController, SwingShape};
pub use error::ActorError;
pub use rig::{ActorFleet, ActorRig};
