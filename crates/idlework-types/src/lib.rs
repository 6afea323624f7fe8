//! Shared type definitions for the idlework progression engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the scheduler, the actor controllers, the economy, and persistence. Types
//! flow downstream to `TypeScript` via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`frame`] -- Frame timing and the [`Updatable`] receiver contract
//! - [`progression`] -- The [`ProgressionState`] economy record
//! - [`actors`] -- Actor controller parameters and poses
//! - [`upgrades`] -- Upgrade instances, listings, and purchase outcomes
//! - [`save`] -- The persisted [`SaveRecord`]

pub mod actors;
pub mod frame;
pub mod progression;
pub mod save;
pub mod upgrades;

// Re-export all public types at crate root for convenience.
pub use actors::{ActorControllerState, ActorPose, RotationSign};
pub use frame::{Frame, TickFlow, Updatable};
pub use progression::ProgressionState;
pub use save::{GameData, SaveRecord, UpgradeRecord};
pub use upgrades::{PurchaseOutcome, PurchaseRejection, UpgradeInstance, UpgradeListing};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for presentation-facing types.

    #[test]
    fn export_bindings() {
        // Files are written to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        let _ = crate::frame::Frame::export_all();
        let _ = crate::frame::TickFlow::export_all();
        let _ = crate::progression::ProgressionState::export_all();
        let _ = crate::actors::RotationSign::export_all();
        let _ = crate::actors::ActorControllerState::export_all();
        let _ = crate::actors::ActorPose::export_all();
        let _ = crate::upgrades::UpgradeInstance::export_all();
        let _ = crate::upgrades::UpgradeListing::export_all();
        let _ = crate::upgrades::PurchaseRejection::export_all();
        let _ = crate::upgrades::PurchaseOutcome::export_all();
        let _ = crate::save::SaveRecord::export_all();
        let _ = crate::save::GameData::export_all();
        let _ = crate::save::UpgradeRecord::export_all();
    }
}
