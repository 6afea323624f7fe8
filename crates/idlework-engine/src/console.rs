//! Terminal presentation.
//!
//! [`ConsoleObserver`] prints player-facing lines to stdout and mirrors
//! them as `debug!` events, so stderr logs and stdout output stay
//! separate. Formatting lives in free functions for testing.

use idlework_core::{ActionSource, GameObserver};
use idlework_economy::ActionReceipt;
use idlework_types::{ProgressionState, PurchaseRejection, UpgradeInstance, UpgradeListing};
use tracing::debug;

use crate::commands::HELP;

/// Prints game notifications to stdout. Automatic actions are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl GameObserver for ConsoleObserver {
    fn on_action(&mut self, receipt: &ActionReceipt, source: ActionSource) {
        debug!(
            ?source,
            yield_amount = receipt.yield_amount,
            funds_gained = receipt.funds_gained,
            "action"
        );
        if source == ActionSource::Manual {
            println!("{}", format_receipt(receipt, source));
        }
    }

    fn on_level_up(&mut self, level: u32) {
        debug!(level, "level up");
        println!("*** LEVEL UP! now level {level} ***");
    }

    fn on_upgrade_purchased(&mut self, instance: &UpgradeInstance, maxed: bool) {
        debug!(
            upgrade = instance.id,
            level = instance.current_level,
            maxed,
            "upgrade purchased"
        );
        println!("{}", format_purchase(instance, maxed));
    }

    fn on_purchase_rejected(&mut self, id: &str, reason: PurchaseRejection) {
        debug!(upgrade = id, %reason, "purchase rejected");
        println!("cannot buy {id}: {reason}");
    }

    fn on_upgrade_menu_opened(&mut self, listings: &[UpgradeListing]) {
        debug!(rows = listings.len(), "upgrade menu opened");
        for listing in listings {
            println!("{}", format_listing(listing));
        }
    }

    fn on_tap_hint(&mut self) {
        println!("(psst: type `tap` to get to work)");
    }

    fn on_reset(&mut self) {
        println!("progress reset");
    }
}

/// One line for an action.
pub fn format_receipt(receipt: &ActionReceipt, source: ActionSource) -> String {
    let tag = match source {
        ActionSource::Manual => "tap",
        ActionSource::Auto => "auto",
    };
    format!(
        "{tag}: +{} score, +{} funds",
        receipt.yield_amount, receipt.funds_gained
    )
}

/// One line for a completed purchase.
pub fn format_purchase(instance: &UpgradeInstance, maxed: bool) -> String {
    if maxed {
        format!(
            "bought {} -> level {}  MAXED!!!",
            instance.id, instance.current_level
        )
    } else {
        format!(
            "bought {} -> level {}, next costs {}",
            instance.id, instance.current_level, instance.current_cost
        )
    }
}

/// One menu row.
pub fn format_listing(listing: &UpgradeListing) -> String {
    let price = if listing.maxed {
        "MAXED".to_owned()
    } else if listing.affordable {
        format!("{} funds", listing.cost)
    } else {
        format!("{} funds (locked)", listing.cost)
    };
    format!(
        "{} {:<22} [{}] lvl {:<3} {price}",
        listing.icon, listing.title, listing.id, listing.level
    )
}

/// Multi-line progress summary.
pub fn format_status(state: &ProgressionState, visible_actors: usize, running: bool) -> String {
    format!(
        "level {} ({}/{} xp)\nscore {}  funds {}\nyield {}/action, {} funds/unit, auto every {:.0} ms\nactors {} visible at speed {:.1}\nloop {}",
        state.level,
        state.experience,
        state.next_experience_threshold,
        state.score,
        state.funds,
        state.per_action_yield,
        state.funds_per_yield_unit,
        state.auto_yield_interval_ms,
        visible_actors,
        state.actor_speed,
        if running { "running" } else { "stopped" },
    )
}

/// The command list.
pub fn format_help() -> String {
    HELP.iter()
        .map(|(usage, about)| format!("  {usage:<14} {about}"))
        .collect::<Vec<_>>()
        .join("\n")
}
