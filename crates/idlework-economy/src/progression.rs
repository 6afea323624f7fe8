//! Progression state transitions: the primary action, leveling, auto-yield
//! timing, and restoring persisted scalars.
//!
//! All counters use saturating arithmetic. No panics, no silent wraparound.

use idlework_types::{GameData, ProgressionState};
use tracing::{debug, info};

/// What one primary action produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Units yielded (added to score and experience).
    pub yield_amount: u64,
    /// Funds credited.
    pub funds_gained: u64,
    /// Levels gained during normalization (0 or 1).
    pub levels_gained: u32,
    /// Level after the action.
    pub level: u32,
}

/// Run the primary action once.
///
/// # Order of operations
///
/// 1. `score += per_action_yield`
/// 2. `funds += per_action_yield * funds_per_yield_unit`
/// 3. `experience += per_action_yield`
/// 4. Leveling normalization
pub fn perform_action(state: &mut ProgressionState) -> ActionReceipt {
    let yield_amount = state.per_action_yield;
    let funds_gained = yield_amount.saturating_mul(state.funds_per_yield_unit);

    state.score = state.score.saturating_add(yield_amount);
    state.funds = state.funds.saturating_add(funds_gained);
    state.experience = state.experience.saturating_add(yield_amount);

    let levels_gained = normalize_leveling(state);

    ActionReceipt {
        yield_amount,
        funds_gained,
        levels_gained,
        level: state.level,
    }
}

/// Restore the `experience < next_experience_threshold` invariant.
///
/// A single level-up step: the threshold grows by the level multiplier and
/// experience resets to zero rather than carrying the excess, so one step is
/// always enough. Returns the number of levels gained.
pub fn normalize_leveling(state: &mut ProgressionState) -> u32 {
    if state.experience < state.next_experience_threshold {
        return 0;
    }

    let previous = state.next_experience_threshold;
    let scaled = scale_floor(previous, state.experience_level_multiplier);
    // Guard against a multiplier so close to 1 that floor() would stall.
    state.next_experience_threshold = scaled.max(previous.saturating_add(1));
    state.experience = 0;
    state.level = state.level.saturating_add(1);

    info!(
        level = state.level,
        next_threshold = state.next_experience_threshold,
        "level up"
    );
    1
}

/// Accumulate frame time toward the next automatic action.
///
/// Returns `true` when the interval is reached. The accumulator then resets
/// to zero and any time beyond the interval is discarded.
pub fn accumulate_auto_yield(state: &mut ProgressionState, delta_ms: f64) -> bool {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        state.auto_yield_elapsed_ms += delta_ms;
    }
    if state.auto_yield_elapsed_ms >= state.auto_yield_interval_ms {
        state.auto_yield_elapsed_ms = 0.0;
        return true;
    }
    false
}

/// Assign persisted scalars into `state` and re-normalize leveling.
///
/// Returns the names of fields that were present but invalid and therefore
/// left at their current values.
pub fn restore(state: &mut ProgressionState, data: &GameData) -> Vec<&'static str> {
    let skipped = data.apply_to(state);
    state.auto_yield_elapsed_ms = 0.0;
    let levels = normalize_leveling(state);
    debug!(
        skipped = skipped.len(),
        renormalized = levels > 0,
        "progression scalars restored"
    );
    skipped
}

/// `floor(value * factor)`, saturating at the `u64` range.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn scale_floor(value: u64, factor: f64) -> u64 {
    // Float-to-int `as` saturates and maps NaN to zero.
    (value as f64 * factor).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(per_action_yield: u64, funds_per_yield_unit: u64) -> ProgressionState {
        ProgressionState {
            funds: 0,
            per_action_yield,
            funds_per_yield_unit,
            next_experience_threshold: 1_000,
            ..ProgressionState::default()
        }
    }

    #[test]
    fn three_actions_accrue_score_and_funds() {
        let mut s = state(2, 10);
        for _ in 0..3 {
            let _ = perform_action(&mut s);
        }
        assert_eq!(s.score, 6);
        assert_eq!(s.funds, 60);
        assert_eq!(s.experience, 6);
    }

    #[test]
    fn every_action_adds_exactly_one_yield() {
        let mut s = state(3, 7);
        let mut last_score = s.score;
        let mut last_funds = s.funds;
        for _ in 0..50 {
            let receipt = perform_action(&mut s);
            assert_eq!(s.score - last_score, 3);
            assert_eq!(s.funds - last_funds, 21);
            assert_eq!(receipt.funds_gained, 21);
            last_score = s.score;
            last_funds = s.funds;
        }
    }

    #[test]
    fn crossing_threshold_levels_up_and_resets_experience() {
        let mut s = ProgressionState {
            experience: 4,
            next_experience_threshold: 5,
            experience_level_multiplier: 1.68,
            per_action_yield: 1,
            ..ProgressionState::default()
        };
        let receipt = perform_action(&mut s);

        assert_eq!(receipt.levels_gained, 1);
        assert_eq!(s.level, 2);
        assert_eq!(s.experience, 0);
        assert_eq!(s.next_experience_threshold, 8);
    }

    #[test]
    fn huge_yield_levels_once_and_keeps_invariant() {
        let mut s = ProgressionState {
            per_action_yield: 10_000,
            next_experience_threshold: 5,
            ..ProgressionState::default()
        };
        let receipt = perform_action(&mut s);

        assert_eq!(receipt.levels_gained, 1);
        assert!(s.is_normalized());
    }

    #[test]
    fn invariant_and_monotonic_level_over_many_actions() {
        let mut s = ProgressionState {
            per_action_yield: 3,
            ..ProgressionState::default()
        };
        let mut level = s.level;
        for _ in 0..500 {
            let _ = perform_action(&mut s);
            assert!(s.is_normalized());
            assert!(s.level >= level);
            level = s.level;
        }
        assert!(s.level > 1);
    }

    #[test]
    fn threshold_always_grows() {
        let mut s = ProgressionState {
            experience: 1,
            next_experience_threshold: 1,
            experience_level_multiplier: 1.01,
            ..ProgressionState::default()
        };
        let _ = normalize_leveling(&mut s);
        assert_eq!(s.next_experience_threshold, 2);
    }

    #[test]
    fn auto_yield_fires_at_interval_and_discards_excess() {
        let mut s = ProgressionState {
            auto_yield_interval_ms: 100.0,
            ..ProgressionState::default()
        };
        assert!(!accumulate_auto_yield(&mut s, 60.0));
        assert!(accumulate_auto_yield(&mut s, 70.0));
        assert!(s.auto_yield_elapsed_ms.abs() < f64::EPSILON);
        assert!(!accumulate_auto_yield(&mut s, 99.0));
    }

    #[test]
    fn auto_yield_ignores_bad_deltas() {
        let mut s = ProgressionState::default();
        assert!(!accumulate_auto_yield(&mut s, f64::NAN));
        assert!(!accumulate_auto_yield(&mut s, -50.0));
        assert!(s.auto_yield_elapsed_ms.abs() < f64::EPSILON);
    }

    #[test]
    fn restore_renormalizes_inconsistent_records() {
        let data = GameData {
            experience: Some(50),
            next_experience_threshold: Some(10),
            level: Some(3),
            ..GameData::default()
        };
        let mut s = ProgressionState::default();
        let skipped = restore(&mut s, &data);

        assert!(skipped.is_empty());
        assert!(s.is_normalized());
        assert_eq!(s.level, 4);
    }
}
