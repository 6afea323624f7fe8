//! Tunables for the actor rig.
//!
//! These values live under the `actors` key of `idlework-config.yaml`. The
//! [`RigConfig`] struct bundles every tunable so that callers (the game
//! facade, tests) can override defaults.

use serde::Deserialize;

use crate::error::ActorError;

/// Configuration for the pool of animated actors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RigConfig {
    /// Number of actors created up front (default: 8). Purchases activate
    /// idle actors from this pool; none are created later.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Length of one full swing cycle in seconds at speed 1 (default: 2.0).
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: f64,

    /// Time offset between consecutive actors in seconds (default: 0.25).
    #[serde(default = "default_stagger_secs")]
    pub stagger_secs: f64,

    /// Distance between consecutive actors' resting positions (default: 0.4).
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// Maximum positional travel at full swing (default: 0.5).
    #[serde(default = "default_reach")]
    pub reach: f64,

    /// Maximum rotation at full swing, in radians (default: 0.6).
    #[serde(default = "default_max_angle")]
    pub max_angle: f64,

    /// Lower bound of the per-actor amplitude jitter (default: 0.85).
    #[serde(default = "default_amplitude_min")]
    pub amplitude_min: f64,

    /// Upper bound of the per-actor amplitude jitter (default: 1.15).
    #[serde(default = "default_amplitude_max")]
    pub amplitude_max: f64,

    /// Fixed RNG seed for reproducible jitter. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            cycle_secs: default_cycle_secs(),
            stagger_secs: default_stagger_secs(),
            spacing: default_spacing(),
            reach: default_reach(),
            max_angle: default_max_angle(),
            amplitude_min: default_amplitude_min(),
            amplitude_max: default_amplitude_max(),
            seed: None,
        }
    }
}

impl RigConfig {
    /// Check every bound the rig relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::InvalidConfig`] naming the first violated bound.
    pub fn validate(&self) -> Result<(), ActorError> {
        if !(self.cycle_secs.is_finite() && self.cycle_secs > 0.0) {
            return Err(invalid("cycle_secs must be a positive number"));
        }
        if !self.stagger_secs.is_finite() || !self.spacing.is_finite() {
            return Err(invalid("stagger_secs and spacing must be finite"));
        }
        if !(self.reach.is_finite() && self.max_angle.is_finite()) {
            return Err(invalid("reach and max_angle must be finite"));
        }
        if !(self.amplitude_min.is_finite()
            && self.amplitude_max.is_finite()
            && self.amplitude_min > 0.0
            && self.amplitude_min <= self.amplitude_max)
        {
            return Err(invalid(
                "amplitude range must be positive with amplitude_min <= amplitude_max",
            ));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ActorError {
    ActorError::InvalidConfig {
        reason: reason.to_owned(),
    }
}

const fn default_pool_size() -> u32 {
    8
}

const fn default_cycle_secs() -> f64 {
    2.0
}

const fn default_stagger_secs() -> f64 {
    0.25
}

const fn default_spacing() -> f64 {
    0.4
}

const fn default_reach() -> f64 {
    0.5
}

const fn default_max_angle() -> f64 {
    0.6
}

const fn default_amplitude_min() -> f64 {
    0.85
}

const fn default_amplitude_max() -> f64 {
    1.15
}
