//! Frame timing, scheduling, configuration, and the game facade for idlework.
//!
//! This crate owns the frame loop. A [`FrameClock`] turns instants into
//! clamped [`Frame`](idlework_types::Frame)s, the [`Scheduler`] hands each
//! frame to every registered receiver, and [`Game`] ties the session, the
//! actor rig, and persistence together.
//!
//! # Modules
//!
//! - [`clock`] -- Clamped frame timing
//! - [`scheduler`] -- Receiver registry and the frame pass
//! - [`config`] -- YAML configuration ([`GameConfig`])
//! - [`session`] -- Shared progression state, upgrades, and observers
//! - [`observer`] -- The [`GameObserver`] presentation hooks
//! - [`auto_yield`] -- Timed automatic actions
//! - [`hints`] -- Tap hints for new players
//! - [`game`] -- The [`Game`] facade

pub mod auto_yield;
pub mod clock;
pub mod config;
pub mod game;
pub mod hints;
pub mod observer;
pub mod scheduler;
pub mod session;

// Re-export primary types at crate root for convenience.
pub use clock::{ClockError, FrameClock};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameError};
pub use observer::{ActionSource, GameObserver, NoOpObserver};
pub use scheduler::{ReceiverHandle, ReceiverId, Scheduler};
pub use session::{Session, SharedSession};
