//! Progression rules and the upgrade engine for idlework.
//!
//! The engine never panics on bad input and never lets funds go negative:
//! every counter is unsigned and every addition saturates. Purchases are
//! all-or-nothing; a rejected purchase leaves state exactly as it was.
//!
//! # Modules
//!
//! - [`progression`] -- The primary action, leveling, and auto-yield timing.
//! - [`cost`] -- [`CostCurve`] price growth per level.
//! - [`catalog`] -- [`UpgradeDefinition`] and the standard catalog.
//! - [`upgrades`] -- The [`UpgradeEngine`] that owns levels and performs purchases.
//!
//! # Usage
//!
//! ```
//! use idlework_actors::ActorFleet;
//! use idlework_economy::{UpgradeEngine, progression};
//! use idlework_types::ProgressionState;
//!
//! struct NoActors;
//!
//! impl ActorFleet for NoActors {
//!     fn set_visible_count(&mut self, _count: u32) {}
//!     fn set_speed(&mut self, _speed: f64) {}
//! }
//!
//! let mut state = ProgressionState::default();
//! let receipt = progression::perform_action(&mut state);
//! assert_eq!(receipt.funds_gained, 10);
//!
//! if let Ok(mut engine) = UpgradeEngine::standard(8) {
//!     let outcome = engine.purchase("boost_cpu", &mut state, &mut NoActors);
//!     assert!(outcome.is_purchased());
//!     assert_eq!(state.funds, 0);
//! }
//! ```

pub mod catalog;
pub mod cost;
pub mod progression;
pub mod upgrades;

// Re-export primary types at crate root.
pub use catalog::{
    CapacityCap, CappedField, PostApplyHook, UpgradeDefinition, standard_catalog,
};
pub use cost::CostCurve;
pub use progression::ActionReceipt;
pub use upgrades::UpgradeEngine;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while assembling an upgrade catalog.
///
/// Gameplay operations never error: purchases report rejections through
/// [`idlework_types::PurchaseOutcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    /// Two definitions share an id.
    #[error("duplicate upgrade id: {id}")]
    DuplicateUpgrade {
        /// The repeated id.
        id: String,
    },

    /// A cost curve could not produce a rising price.
    #[error("invalid cost curve for {id}: {reason}")]
    InvalidCostCurve {
        /// Upgrade the curve belongs to.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}
