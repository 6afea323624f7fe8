//! The pool of actor controllers driven as one update receiver.
//!
//! All actors are created up front. Purchasing more actors flips idle units
//! to visible rather than creating new ones, and the rig's pass skips
//! invisible units entirely.

use idlework_types::{ActorControllerState, ActorPose, Frame, RotationSign, TickFlow, Updatable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::RigConfig;
use crate::controller::{ActorController, SwingShape};
use crate::error::ActorError;

/// The two live controls the upgrade engine may exercise on actors.
pub trait ActorFleet {
    /// Make the first `count` actors (by creation order) visible and the
    /// rest invisible.
    fn set_visible_count(&mut self, count: u32);

    /// Set every actor's speed multiplier.
    fn set_speed(&mut self, speed: f64);
}

/// A fixed pool of controllers.
#[derive(Debug, Clone)]
pub struct ActorRig {
    controllers: Vec<ActorController>,
}

impl ActorRig {
    /// Build the pool from configuration with all actors invisible.
    ///
    /// Amplitude jitter comes from `config.seed` when set, otherwise from
    /// OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::InvalidConfig`] if the configuration is invalid.
    pub fn from_config(config: &RigConfig) -> Result<Self, ActorError> {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(config, &mut rng)
    }

    /// Build the pool using the given random source for amplitude jitter.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::InvalidConfig`] if the configuration is invalid.
    pub fn with_rng(config: &RigConfig, rng: &mut impl Rng) -> Result<Self, ActorError> {
        config.validate()?;

        let shape = SwingShape {
            cycle_secs: config.cycle_secs,
            reach: config.reach,
            max_angle: config.max_angle,
        };

        let controllers = (0..config.pool_size)
            .map(|i| {
                let index = f64::from(i);
                let state = ActorControllerState {
                    base_offset: index * config.spacing,
                    rotation_sign: RotationSign::for_index(i),
                    phase_offset: index * config.stagger_secs,
                    speed_multiplier: 1.0,
                    amplitude_factor: rng
                        .random_range(config.amplitude_min..=config.amplitude_max),
                    visible: false,
                };
                ActorController::new(state, shape)
            })
            .collect();

        Ok(Self { controllers })
    }

    /// Number of actors in the pool.
    pub const fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether the pool is empty.
    pub const fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Number of currently visible actors.
    pub fn visible_count(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_visible()).count()
    }

    /// All controllers in creation order.
    pub fn controllers(&self) -> &[ActorController] {
        &self.controllers
    }

    /// Latest pose of every visible actor, in creation order.
    pub fn visible_poses(&self) -> Vec<ActorPose> {
        self.controllers
            .iter()
            .filter(|c| c.is_visible())
            .map(ActorController::pose)
            .collect()
    }
}

impl ActorFleet for ActorRig {
    fn set_visible_count(&mut self, count: u32) {
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        for (i, controller) in self.controllers.iter_mut().enumerate() {
            controller.set_visible(i < count);
        }
        debug!(
            requested = count,
            visible = self.visible_count(),
            pool = self.controllers.len(),
            "actor visibility synced"
        );
    }

    fn set_speed(&mut self, speed: f64) {
        for controller in &mut self.controllers {
            controller.set_speed(speed);
        }
        debug!(speed, "actor speed synced");
    }
}

impl Updatable for ActorRig {
    fn tick(&mut self, frame: Frame) -> TickFlow {
        for controller in self.controllers.iter_mut().filter(|c| c.is_visible()) {
            controller.evaluate(frame.elapsed);
        }
        TickFlow::Continue
    }
}
