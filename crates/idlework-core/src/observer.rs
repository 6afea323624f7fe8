//! Presentation hooks.
//!
//! The game pushes every user-visible change through [`GameObserver`]. All
//! methods default to no-ops so an observer implements only what it shows.

use idlework_economy::ActionReceipt;
use idlework_types::{
    ProgressionState, PurchaseRejection, UpgradeInstance, UpgradeListing,
};

/// Where a primary action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    /// The player tapped.
    Manual,
    /// The auto-yield timer fired.
    Auto,
}

/// Receives game notifications after each state change.
pub trait GameObserver {
    /// Any progression field changed.
    fn on_progression_changed(&mut self, _state: &ProgressionState) {}

    /// A primary action ran.
    fn on_action(&mut self, _receipt: &ActionReceipt, _source: ActionSource) {}

    /// The player reached a new level.
    fn on_level_up(&mut self, _level: u32) {}

    /// An upgrade was bought. `maxed` is set when its cap is now reached.
    fn on_upgrade_purchased(&mut self, _instance: &UpgradeInstance, _maxed: bool) {}

    /// A purchase was refused.
    fn on_purchase_rejected(&mut self, _id: &str, _reason: PurchaseRejection) {}

    /// The upgrade menu was opened.
    fn on_upgrade_menu_opened(&mut self, _listings: &[UpgradeListing]) {}

    /// Nudge a new player to tap.
    fn on_tap_hint(&mut self) {}

    /// Progress was reset to the starting state.
    fn on_reset(&mut self) {}
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl GameObserver for NoOpObserver {}
