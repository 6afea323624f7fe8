//! The game facade: everything a front end needs, behind one type.
//!
//! [`Game::new`] loads any existing save, builds the actor rig to match the
//! restored state, and registers the frame receivers:
//!
//! ```text
//! Scheduler
//!   |-- ActorRig   (animates visible actors)
//!   |-- AutoYield  (timed automatic actions)
//!   +-- TapHint    (until the score threshold)
//! ```
//!
//! Purchases save immediately. Other progress is saved when the front end
//! calls [`Game::save`] (the runner does so on a timer and on shutdown).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use idlework_actors::{ActorError, ActorFleet, ActorRig};
use idlework_db::{KeyValueStore, SaveGateway};
use idlework_economy::{ActionReceipt, EconomyError, UpgradeEngine};
use idlework_types::{ActorPose, Frame, ProgressionState, PurchaseOutcome, UpgradeListing};
use tracing::info;

use crate::auto_yield::AutoYield;
use crate::clock::{ClockError, FrameClock};
use crate::config::{ConfigError, GameConfig};
use crate::hints::TapHint;
use crate::observer::{ActionSource, GameObserver};
use crate::scheduler::{ReceiverId, Scheduler};
use crate::session::{Session, SharedSession};

/// Errors that can occur while assembling a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Configuration failed validation.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The frame clock could not be built.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// The actor rig could not be built.
    #[error("actor error: {0}")]
    Actors(#[from] ActorError),

    /// The upgrade catalog is invalid.
    #[error("economy error: {0}")]
    Economy(#[from] EconomyError),
}

/// One running game over a key-value store.
#[derive(Debug)]
pub struct Game<S> {
    config: GameConfig,
    session: SharedSession,
    rig: Rc<RefCell<ActorRig>>,
    scheduler: Scheduler,
    gateway: SaveGateway<S>,
    hint: Option<ReceiverId>,
}

impl<S: KeyValueStore> Game<S> {
    /// Build a game, restoring any save found in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the configuration is invalid or a component
    /// cannot be built. A missing or corrupt save is not an error.
    pub fn new(config: GameConfig, store: S) -> Result<Self, GameError> {
        config.validate()?;

        let clock = FrameClock::new(&config.time)?;
        let rig = ActorRig::from_config(&config.actors)?;
        let upgrades = UpgradeEngine::standard(config.actors.pool_size)?;
        let gateway = SaveGateway::new(store, config.persistence.save_key.clone());

        let mut session = Session::new(config.economy.starting_state(), upgrades);
        let restored = if let Some(record) = gateway.load() {
            session.restore(&record);
            true
        } else {
            false
        };

        let mut game = Self {
            config,
            session: session.into_shared(),
            rig: Rc::new(RefCell::new(rig)),
            scheduler: Scheduler::new(clock),
            gateway,
            hint: None,
        };
        game.sync_rig();

        let _ = game.scheduler.register(game.rig.clone());
        let _ = game
            .scheduler
            .register(Rc::new(RefCell::new(AutoYield::new(game.session.clone()))));
        game.register_hint();

        info!(
            restored,
            receivers = game.scheduler.len(),
            actors = game.rig.borrow().len(),
            "game ready"
        );
        Ok(game)
    }

    /// Run the primary action once.
    pub fn perform_action(&self) -> ActionReceipt {
        self.session
            .borrow_mut()
            .perform_action(ActionSource::Manual)
    }

    /// Menu rows for the current state, announced to observers.
    pub fn open_upgrade_menu(&self) -> Vec<UpgradeListing> {
        self.session.borrow_mut().open_upgrade_menu()
    }

    /// Menu rows for the current state.
    pub fn listings(&self) -> Vec<UpgradeListing> {
        self.session.borrow().listings()
    }

    /// Buy one level of an upgrade. A successful purchase is saved at once.
    pub fn purchase(&mut self, id: &str) -> PurchaseOutcome {
        let outcome = {
            let mut rig = self.rig.borrow_mut();
            self.session.borrow_mut().purchase(id, &mut *rig)
        };
        if outcome.is_purchased() {
            let _ = self.save();
        }
        outcome
    }

    /// A copy of the progression state.
    pub fn snapshot(&self) -> ProgressionState {
        self.session.borrow().state().clone()
    }

    /// Latest pose of every visible actor.
    pub fn poses(&self) -> Vec<ActorPose> {
        self.rig.borrow().visible_poses()
    }

    /// Number of visible actors.
    pub fn visible_actors(&self) -> usize {
        self.rig.borrow().visible_count()
    }

    /// Write the current progress. Returns `false` if the write was skipped.
    pub fn save(&mut self) -> bool {
        let record = self.session.borrow().capture();
        self.gateway.save(&record)
    }

    /// Delete the save and return to the configured starting state.
    pub fn reset(&mut self) {
        let _ = self.gateway.clear();
        self.session
            .borrow_mut()
            .reset(self.config.economy.starting_state());
        self.sync_rig();
        self.register_hint();
        info!("game reset");
    }

    /// Start producing frames from `now`. No-op if running.
    pub fn start(&self, now: Instant) {
        self.scheduler.start(now);
    }

    /// Stop producing frames. State is left as is. No-op if stopped.
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    /// Whether frames are being produced.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Run one frame pass ending at `now`. Returns `None` while stopped.
    pub fn frame(&self, now: Instant) -> Option<Frame> {
        self.scheduler.frame(now)
    }

    /// Add a presentation observer.
    pub fn subscribe(&self, observer: Box<dyn GameObserver>) {
        self.session.borrow_mut().subscribe(observer);
    }

    /// The configuration the game was built with.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scheduler, for registering extra receivers.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        self.gateway.store()
    }

    /// Push visible count and speed from the state onto the rig.
    fn sync_rig(&self) {
        let session = self.session.borrow();
        let state = session.state();
        let mut rig = self.rig.borrow_mut();
        rig.set_visible_count(state.active_actor_count);
        rig.set_speed(state.actor_speed);
    }

    /// Register the tap hint unless it is already running or the player is
    /// past the threshold.
    fn register_hint(&mut self) {
        if self.hint.is_some_and(|id| self.scheduler.contains(id)) {
            return;
        }
        let score = self.session.borrow().state().score;
        if score >= self.config.hints.score_threshold {
            self.hint = None;
            return;
        }
        let hint = TapHint::new(self.session.clone(), &self.config.hints);
        self.hint = Some(self.scheduler.register(Rc::new(RefCell::new(hint))));
    }
}
