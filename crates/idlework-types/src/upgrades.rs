//! Upgrade instances, menu listings, and purchase outcomes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Mutable per-definition record tracked during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeInstance {
    /// Identifier of the definition this instance belongs to.
    pub id: String,
    /// Current level, starting at 1.
    pub current_level: u32,
    /// Price of the next purchase, derived from the cost curve.
    pub current_cost: u64,
}

/// One row of the upgrade menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeListing {
    /// Definition identifier, passed back to `purchase`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display icon.
    pub icon: String,
    /// Current level.
    pub level: u32,
    /// Price of the next purchase.
    pub cost: u64,
    /// The capacity cap has been reached; no further purchases.
    pub maxed: bool,
    /// The player can pay for the next purchase right now.
    pub affordable: bool,
}

/// Why a purchase was refused. A rejection never mutates any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PurchaseRejection {
    /// No definition with the requested id exists.
    UnknownUpgrade,
    /// The capacity-linked value already meets the cap.
    CapacityReached,
    /// Funds are below the current cost.
    InsufficientFunds {
        /// Price of the purchase.
        cost: u64,
        /// Funds available at the time of the attempt.
        funds: u64,
    },
}

impl core::fmt::Display for PurchaseRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownUpgrade => write!(f, "unknown upgrade"),
            Self::CapacityReached => write!(f, "capacity reached"),
            Self::InsufficientFunds { cost, funds } => {
                write!(f, "insufficient funds: cost {cost}, have {funds}")
            }
        }
    }
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PurchaseOutcome {
    /// The purchase went through.
    Purchased {
        /// The instance after level and cost were advanced.
        instance: UpgradeInstance,
        /// The capacity cap is now reached.
        maxed: bool,
    },
    /// The purchase was refused without any state change.
    Rejected {
        /// Why it was refused.
        reason: PurchaseRejection,
    },
}

impl PurchaseOutcome {
    /// Whether the purchase went through.
    pub const fn is_purchased(&self) -> bool {
        matches!(self, Self::Purchased { .. })
    }

    /// The rejection reason, if the purchase was refused.
    pub const fn rejection(&self) -> Option<PurchaseRejection> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            Self::Purchased { .. } => None,
        }
    }
}
