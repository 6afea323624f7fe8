//! The shared game session: progression state, upgrades, and observers.
//!
//! One [`Session`] exists per game. The facade and the frame receivers reach
//! it through a [`SharedSession`] handed to them at construction. Every
//! mutation goes through a method here so observers always hear about it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use idlework_actors::ActorFleet;
use idlework_economy::{ActionReceipt, UpgradeEngine, progression};
use idlework_types::{
    GameData, ProgressionState, PurchaseOutcome, SaveRecord, UpgradeListing,
};
use tracing::{info, warn};

use crate::observer::{ActionSource, GameObserver};

/// Shared handle to the session.
pub type SharedSession = Rc<RefCell<Session>>;

/// Progression state plus the upgrade engine, with observer fan-out.
pub struct Session {
    state: ProgressionState,
    upgrades: UpgradeEngine,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Session {
    /// A session starting from `state`.
    pub const fn new(state: ProgressionState, upgrades: UpgradeEngine) -> Self {
        Self {
            state,
            upgrades,
            observers: Vec::new(),
        }
    }

    /// Wrap the session in a shared handle.
    pub fn into_shared(self) -> SharedSession {
        Rc::new(RefCell::new(self))
    }

    /// Current progression state.
    pub const fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// The upgrade engine.
    pub const fn upgrades(&self) -> &UpgradeEngine {
        &self.upgrades
    }

    /// Add an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Run one primary action and notify observers.
    pub fn perform_action(&mut self, source: ActionSource) -> ActionReceipt {
        let receipt = progression::perform_action(&mut self.state);
        let state = &self.state;
        for observer in &mut self.observers {
            observer.on_action(&receipt, source);
            if receipt.levels_gained > 0 {
                observer.on_level_up(receipt.level);
            }
            observer.on_progression_changed(state);
        }
        receipt
    }

    /// Feed frame time to the auto-yield timer, firing an automatic action
    /// when the interval is reached.
    pub fn accumulate_auto_yield(&mut self, delta_ms: f64) -> Option<ActionReceipt> {
        progression::accumulate_auto_yield(&mut self.state, delta_ms)
            .then(|| self.perform_action(ActionSource::Auto))
    }

    /// Current menu rows, announced to observers.
    pub fn open_upgrade_menu(&mut self) -> Vec<UpgradeListing> {
        let listings = self.upgrades.listings(&self.state);
        for observer in &mut self.observers {
            observer.on_upgrade_menu_opened(&listings);
        }
        listings
    }

    /// Current menu rows without notifying anyone.
    pub fn listings(&self) -> Vec<UpgradeListing> {
        self.upgrades.listings(&self.state)
    }

    /// Buy one level of an upgrade.
    pub fn purchase(&mut self, id: &str, fleet: &mut dyn ActorFleet) -> PurchaseOutcome {
        let outcome = self.upgrades.purchase(id, &mut self.state, fleet);
        let state = &self.state;
        for observer in &mut self.observers {
            match &outcome {
                PurchaseOutcome::Purchased { instance, maxed } => {
                    observer.on_upgrade_purchased(instance, *maxed);
                    observer.on_progression_changed(state);
                }
                PurchaseOutcome::Rejected { reason } => {
                    observer.on_purchase_rejected(id, *reason);
                }
            }
        }
        outcome
    }

    /// Build the persistable record. The gateway stamps the save time.
    pub fn capture(&self) -> SaveRecord {
        SaveRecord {
            game_data: GameData::capture(&self.state),
            upgrade_data: self.upgrades.records(),
            saved_at: None,
        }
    }

    /// Load a saved record over the current state.
    ///
    /// Scalars are trusted as saved and upgrade effects are not replayed.
    /// Leveling is re-normalized, then upgrade levels and prices restored.
    pub fn restore(&mut self, record: &SaveRecord) {
        let skipped = progression::restore(&mut self.state, &record.game_data);
        for field in &skipped {
            warn!(field, "invalid saved value skipped");
        }
        let restored = self.upgrades.restore_levels(&record.upgrade_data);
        info!(
            funds = self.state.funds,
            level = self.state.level,
            upgrades = restored,
            "session restored"
        );
        self.notify_progression();
    }

    /// Return to `state` with every upgrade at level 1.
    pub fn reset(&mut self, state: ProgressionState) {
        self.state = state;
        self.upgrades.reset();
        for observer in &mut self.observers {
            observer.on_reset();
        }
        self.notify_progression();
    }

    /// Tell observers to show a tap hint.
    pub fn emit_tap_hint(&mut self) {
        for observer in &mut self.observers {
            observer.on_tap_hint();
        }
    }

    fn notify_progression(&mut self) {
        let state = &self.state;
        for observer in &mut self.observers {
            observer.on_progression_changed(state);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("upgrades", &self.upgrades)
            .field("observers", &self.observers.len())
            .finish()
    }
}
