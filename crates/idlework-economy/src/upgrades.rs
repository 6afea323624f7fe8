//! The upgrade engine: per-upgrade level and price, purchase validation,
//! effect application, and restoring levels from a save.

use std::collections::{BTreeMap, BTreeSet};

use idlework_actors::ActorFleet;
use idlework_types::{
    ProgressionState, PurchaseOutcome, PurchaseRejection, UpgradeInstance, UpgradeListing,
    UpgradeRecord,
};
use tracing::{debug, info, warn};

use crate::EconomyError;
use crate::catalog::{UpgradeDefinition, standard_catalog};

/// One catalog entry with its mutable level and price.
#[derive(Debug, Clone)]
struct Slot {
    definition: UpgradeDefinition,
    instance: UpgradeInstance,
}

impl Slot {
    fn new(definition: UpgradeDefinition) -> Self {
        let instance = UpgradeInstance {
            id: definition.id.to_owned(),
            current_level: 1,
            current_cost: definition.cost.cost_at(1),
        };
        Self {
            definition,
            instance,
        }
    }

    fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        self.instance.current_level = level;
        self.instance.current_cost = self.definition.cost.cost_at(level);
    }
}

/// Owns every upgrade instance and performs purchases.
///
/// Entries keep catalog order, which is also display order. The default
/// engine has an empty catalog.
#[derive(Debug, Clone, Default)]
pub struct UpgradeEngine {
    slots: Vec<Slot>,
}

impl UpgradeEngine {
    /// Build an engine over a catalog, every upgrade at level 1.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::DuplicateUpgrade`] if two definitions share
    /// an id, or [`EconomyError::InvalidCostCurve`] for a degenerate curve.
    pub fn new(catalog: Vec<UpgradeDefinition>) -> Result<Self, EconomyError> {
        let mut seen = BTreeSet::new();
        for definition in &catalog {
            if !seen.insert(definition.id) {
                return Err(EconomyError::DuplicateUpgrade {
                    id: definition.id.to_owned(),
                });
            }
            definition.cost.validate(definition.id)?;
        }
        Ok(Self {
            slots: catalog.into_iter().map(Slot::new).collect(),
        })
    }

    /// Engine over [`standard_catalog`].
    ///
    /// # Errors
    ///
    /// Propagates catalog validation errors.
    pub fn standard(actor_pool_size: u32) -> Result<Self, EconomyError> {
        Self::new(standard_catalog(actor_pool_size))
    }

    /// Number of upgrades.
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalog is empty.
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current level and price of one upgrade.
    pub fn instance(&self, id: &str) -> Option<&UpgradeInstance> {
        self.slot(id).map(|slot| &slot.instance)
    }

    /// Definition of one upgrade.
    pub fn definition(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.slot(id).map(|slot| &slot.definition)
    }

    /// All instances in catalog order.
    pub fn instances(&self) -> impl Iterator<Item = &UpgradeInstance> {
        self.slots.iter().map(|slot| &slot.instance)
    }

    /// Menu rows for the current progression state.
    pub fn listings(&self, state: &ProgressionState) -> Vec<UpgradeListing> {
        self.slots
            .iter()
            .map(|slot| {
                let maxed = slot.definition.is_maxed(state);
                UpgradeListing {
                    id: slot.instance.id.clone(),
                    title: slot.definition.title.to_owned(),
                    icon: slot.definition.icon.to_owned(),
                    level: slot.instance.current_level,
                    cost: slot.instance.current_cost,
                    maxed,
                    affordable: !maxed && state.funds >= slot.instance.current_cost,
                }
            })
            .collect()
    }

    /// Attempt to buy one level of an upgrade.
    ///
    /// # Checks (in order)
    ///
    /// 1. The id exists.
    /// 2. The capacity cap, if any, is not yet reached.
    /// 3. Funds cover the current price.
    ///
    /// A rejection leaves `state`, the engine, and the fleet untouched. On
    /// success the price is deducted, the effect applied, the hook run, and
    /// the level and price advanced.
    pub fn purchase(
        &mut self,
        id: &str,
        state: &mut ProgressionState,
        fleet: &mut dyn ActorFleet,
    ) -> PurchaseOutcome {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.definition.id == id) else {
            debug!(upgrade = id, "purchase rejected: unknown upgrade");
            return PurchaseOutcome::Rejected {
                reason: PurchaseRejection::UnknownUpgrade,
            };
        };

        if slot.definition.is_maxed(state) {
            debug!(upgrade = id, "purchase rejected: capacity reached");
            return PurchaseOutcome::Rejected {
                reason: PurchaseRejection::CapacityReached,
            };
        }

        let cost = slot.instance.current_cost;
        let Some(remaining) = state.funds.checked_sub(cost) else {
            debug!(
                upgrade = id,
                cost,
                funds = state.funds,
                "purchase rejected: insufficient funds"
            );
            return PurchaseOutcome::Rejected {
                reason: PurchaseRejection::InsufficientFunds {
                    cost,
                    funds: state.funds,
                },
            };
        };

        state.funds = remaining;
        (slot.definition.effect)(state);
        if let Some(hook) = slot.definition.hook {
            hook.run(state, fleet);
        }
        slot.set_level(slot.instance.current_level.saturating_add(1));

        let maxed = slot.definition.is_maxed(state);
        info!(
            upgrade = id,
            cost,
            level = slot.instance.current_level,
            next_cost = slot.instance.current_cost,
            maxed,
            "upgrade purchased"
        );

        PurchaseOutcome::Purchased {
            instance: slot.instance.clone(),
            maxed,
        }
    }

    /// Re-seat levels from persisted records and re-derive prices.
    ///
    /// Effects are not re-applied; the persisted progression scalars already
    /// carry them. Upgrades without a record stay at level 1 and unknown
    /// record ids are ignored. Returns the number of upgrades restored.
    pub fn restore_levels(&mut self, records: &BTreeMap<String, UpgradeRecord>) -> usize {
        let mut restored: usize = 0;
        for slot in &mut self.slots {
            let level = records
                .get(slot.definition.id)
                .map_or(1, |record| record.current_level);
            slot.set_level(level);
            if records.contains_key(slot.definition.id) {
                restored = restored.saturating_add(1);
            }
        }

        for id in records.keys() {
            if self.slot(id).is_none() {
                warn!(upgrade = %id, "ignoring saved level for unknown upgrade");
            }
        }
        restored
    }

    /// Persistable levels and prices keyed by id.
    pub fn records(&self) -> BTreeMap<String, UpgradeRecord> {
        self.slots
            .iter()
            .map(|slot| {
                (
                    slot.instance.id.clone(),
                    UpgradeRecord {
                        current_level: slot.instance.current_level,
                        current_cost: slot.instance.current_cost,
                    },
                )
            })
            .collect()
    }

    /// Put every upgrade back at level 1.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.set_level(1);
        }
    }

    fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.definition.id == id)
    }
}
