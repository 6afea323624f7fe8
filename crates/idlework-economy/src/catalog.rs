//! Upgrade definitions and the standard catalog.
//!
//! A definition is immutable: identity, display text, price curve, optional
//! capacity cap, the effect applied to progression state on each purchase,
//! and an optional hook that pushes the new state onto live actors.

use idlework_actors::ActorFleet;
use idlework_types::ProgressionState;

use crate::cost::CostCurve;

/// Floor for the auto-yield interval after overclocking.
pub const MIN_AUTO_YIELD_INTERVAL_MS: f64 = 100.0;

/// Automatic actions per minute at [`MIN_AUTO_YIELD_INTERVAL_MS`]. The
/// overclock upgrade is maxed here.
pub const MAX_AUTO_YIELDS_PER_MINUTE: u64 = 600;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Mutation applied to progression state when an upgrade is bought.
pub type Effect = fn(&mut ProgressionState);

// ---------------------------------------------------------------------------
// Capacity caps
// ---------------------------------------------------------------------------

/// A progression field an upgrade may be capped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CappedField {
    /// `active_actor_count`.
    ActiveActorCount,
    /// `per_action_yield`.
    PerActionYield,
    /// `funds_per_yield_unit`.
    FundsPerYieldUnit,
    /// Whole automatic actions per minute, derived from
    /// `auto_yield_interval_ms`.
    AutoYieldsPerMinute,
}

impl CappedField {
    /// Current value of the field.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn read(self, state: &ProgressionState) -> u64 {
        match self {
            Self::ActiveActorCount => u64::from(state.active_actor_count),
            Self::PerActionYield => state.per_action_yield,
            Self::FundsPerYieldUnit => state.funds_per_yield_unit,
            // Float-to-int `as` saturates and maps NaN to zero.
            Self::AutoYieldsPerMinute => {
                (MS_PER_MINUTE / state.auto_yield_interval_ms).floor() as u64
            }
        }
    }
}

/// Upper bound on a progression field. At or beyond the limit the upgrade
/// is maxed and purchases are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityCap {
    /// Field that is bounded.
    pub field: CappedField,
    /// Inclusive limit.
    pub limit: u64,
}

impl CapacityCap {
    /// Whether the cap has been reached.
    pub fn reached(&self, state: &ProgressionState) -> bool {
        self.field.read(state) >= self.limit
    }
}

// ---------------------------------------------------------------------------
// Post-apply hooks
// ---------------------------------------------------------------------------

/// Follow-up that propagates a purchase to the live actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostApplyHook {
    /// Show the first `active_actor_count` actors.
    SyncVisibleActors,
    /// Push `actor_speed` to every actor.
    SyncActorSpeed,
}

impl PostApplyHook {
    /// Run the hook against the fleet.
    pub fn run(self, state: &ProgressionState, fleet: &mut dyn ActorFleet) {
        match self {
            Self::SyncVisibleActors => fleet.set_visible_count(state.active_actor_count),
            Self::SyncActorSpeed => fleet.set_speed(state.actor_speed),
        }
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Static description of one upgrade.
#[derive(Debug, Clone)]
pub struct UpgradeDefinition {
    /// Stable identifier, also the persistence key.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Price curve.
    pub cost: CostCurve,
    /// Optional capacity cap.
    pub cap: Option<CapacityCap>,
    /// Mutation applied on purchase.
    pub effect: Effect,
    /// Optional actor follow-up.
    pub hook: Option<PostApplyHook>,
}

impl UpgradeDefinition {
    /// A definition with no icon, cap, or hook.
    pub const fn new(id: &'static str, title: &'static str, cost: CostCurve, effect: Effect) -> Self {
        Self {
            id,
            title,
            icon: "",
            cost,
            cap: None,
            effect,
            hook: None,
        }
    }

    /// Set the display icon.
    #[must_use]
    pub const fn icon(mut self, icon: &'static str) -> Self {
        self.icon = icon;
        self
    }

    /// Cap the upgrade on a progression field.
    #[must_use]
    pub const fn capped(mut self, field: CappedField, limit: u64) -> Self {
        self.cap = Some(CapacityCap { field, limit });
        self
    }

    /// Attach an actor follow-up.
    #[must_use]
    pub const fn hook(mut self, hook: PostApplyHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Whether the upgrade's cap has been reached for `state`.
    pub fn is_maxed(&self, state: &ProgressionState) -> bool {
        self.cap.is_some_and(|cap| cap.reached(state))
    }
}

const fn add_actor(state: &mut ProgressionState) {
    state.active_actor_count = state.active_actor_count.saturating_add(1);
}

const fn boost_actor_speed(state: &mut ProgressionState) {
    state.actor_speed += 1.0;
}

const fn add_yield(state: &mut ProgressionState) {
    state.per_action_yield = state.per_action_yield.saturating_add(1);
}

const fn raise_funds_rate(state: &mut ProgressionState) {
    state.funds_per_yield_unit = state.funds_per_yield_unit.saturating_add(2);
}

fn shorten_auto_yield(state: &mut ProgressionState) {
    state.auto_yield_interval_ms =
        (state.auto_yield_interval_ms * 0.9).max(MIN_AUTO_YIELD_INTERVAL_MS);
}

/// The shipped upgrade catalog, in display order.
///
/// The actor upgrade is capped at the size of the actor pool and the
/// overclock upgrade at the auto-yield interval floor.
pub fn standard_catalog(actor_pool_size: u32) -> Vec<UpgradeDefinition> {
    vec![
        UpgradeDefinition::new(
            "scale_infra",
            "Scale Infra (Arms +1)",
            CostCurve::Exponential {
                base: 10,
                growth: 2.2,
            },
            add_actor,
        )
        .icon("⚡")
        .capped(CappedField::ActiveActorCount, u64::from(actor_pool_size))
        .hook(PostApplyHook::SyncVisibleActors),
        UpgradeDefinition::new(
            "boost_cpu",
            "Boost CPU (Speed +1)",
            CostCurve::Geometric {
                base: 10,
                growth: 1.5,
            },
            boost_actor_speed,
        )
        .icon("📈")
        .hook(PostApplyHook::SyncActorSpeed),
        UpgradeDefinition::new(
            "add_threads",
            "Add Threads (Yield +1)",
            CostCurve::Geometric {
                base: 50,
                growth: 1.5,
            },
            add_yield,
        )
        .icon("💼"),
        UpgradeDefinition::new(
            "add_jurisdiction",
            "Add Jurisdiction (Funds +2)",
            CostCurve::Geometric {
                base: 50,
                growth: 1.5,
            },
            raise_funds_rate,
        )
        .icon("🏛"),
        UpgradeDefinition::new(
            "overclock_scheduler",
            "Overclock Scheduler (Auto -10%)",
            CostCurve::Exponential {
                base: 100,
                growth: 1.8,
            },
            shorten_auto_yield,
        )
        .icon("⏱")
        .capped(CappedField::AutoYieldsPerMinute, MAX_AUTO_YIELDS_PER_MINUTE),
    ]
}
