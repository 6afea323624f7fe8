//! The authoritative economy record.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Player economy and capability values.
///
/// Integral economy counters are `u64` and only ever move through saturating
/// arithmetic. Rates and timers are `f64`. After every mutation performed by
/// the economy crate, `experience < next_experience_threshold` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProgressionState {
    /// Spendable currency.
    pub funds: u64,
    /// Lifetime yield total.
    pub score: u64,
    /// Experience accumulated toward the next level.
    pub experience: u64,
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience required to reach the next level. Always positive.
    pub next_experience_threshold: u64,
    /// Growth factor applied to the threshold on each level-up. Greater than 1.
    pub experience_level_multiplier: f64,
    /// Units yielded by one primary action.
    pub per_action_yield: u64,
    /// Funds earned per yielded unit.
    pub funds_per_yield_unit: u64,
    /// Interval between automatic actions, in milliseconds. Positive.
    pub auto_yield_interval_ms: f64,
    /// Time accumulated toward the next automatic action, in milliseconds.
    pub auto_yield_elapsed_ms: f64,
    /// Number of actors currently animating.
    pub active_actor_count: u32,
    /// Speed multiplier applied to every actor. Positive.
    pub actor_speed: f64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            funds: 0,
            score: 0,
            experience: 0,
            level: 1,
            next_experience_threshold: 5,
            experience_level_multiplier: 1.68,
            per_action_yield: 1,
            funds_per_yield_unit: 10,
            auto_yield_interval_ms: 1000.0,
            auto_yield_elapsed_ms: 0.0,
            active_actor_count: 1,
            actor_speed: 1.0,
        }
    }
}

impl ProgressionState {
    /// Whether the leveling invariant currently holds.
    pub const fn is_normalized(&self) -> bool {
        self.experience < self.next_experience_threshold
    }
}
