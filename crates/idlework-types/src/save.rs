//! The persisted save record.
//!
//! The record is versionless JSON:
//!
//! ```text
//! {
//!   "gameData":    { "funds": 60, "score": 6, ... },
//!   "upgradeData": { "scale_infra": { "currentLevel": 2, "currentCost": 32 } },
//!   "savedAt":     "2026-10-19T12:00:00Z"
//! }
//! ```
//!
//! Every `gameData` field is optional on read so that partial or older
//! records still restore whatever they carry. Upgrade costs are written for
//! readers of the file but are never trusted on load.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::progression::ProgressionState;

/// The full persisted record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SaveRecord {
    /// Progression scalars.
    #[serde(default)]
    pub game_data: GameData,
    /// Per-upgrade level records keyed by upgrade id.
    #[serde(default)]
    pub upgrade_data: BTreeMap<String, UpgradeRecord>,
    /// When the record was written.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Persisted progression scalars. The auto-yield accumulator is transient
/// and not stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct GameData {
    /// See [`ProgressionState::funds`].
    pub funds: Option<u64>,
    /// See [`ProgressionState::score`].
    pub score: Option<u64>,
    /// See [`ProgressionState::experience`].
    pub experience: Option<u64>,
    /// See [`ProgressionState::level`].
    pub level: Option<u32>,
    /// See [`ProgressionState::next_experience_threshold`].
    pub next_experience_threshold: Option<u64>,
    /// See [`ProgressionState::experience_level_multiplier`].
    pub experience_level_multiplier: Option<f64>,
    /// See [`ProgressionState::per_action_yield`].
    pub per_action_yield: Option<u64>,
    /// See [`ProgressionState::funds_per_yield_unit`].
    pub funds_per_yield_unit: Option<u64>,
    /// See [`ProgressionState::auto_yield_interval_ms`].
    pub auto_yield_interval_ms: Option<f64>,
    /// See [`ProgressionState::active_actor_count`].
    pub active_actor_count: Option<u32>,
    /// See [`ProgressionState::actor_speed`].
    pub actor_speed: Option<f64>,
}

/// Persisted state of one upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeRecord {
    /// Level reached; missing values restore as 1.
    #[serde(default = "default_level")]
    pub current_level: u32,
    /// Informational only. Re-derived from the cost curve on load.
    #[serde(default)]
    pub current_cost: u64,
}

const fn default_level() -> u32 {
    1
}

impl GameData {
    /// Capture every persisted scalar from the live state.
    pub const fn capture(state: &ProgressionState) -> Self {
        Self {
            funds: Some(state.funds),
            score: Some(state.score),
            experience: Some(state.experience),
            level: Some(state.level),
            next_experience_threshold: Some(state.next_experience_threshold),
            experience_level_multiplier: Some(state.experience_level_multiplier),
            per_action_yield: Some(state.per_action_yield),
            funds_per_yield_unit: Some(state.funds_per_yield_unit),
            auto_yield_interval_ms: Some(state.auto_yield_interval_ms),
            active_actor_count: Some(state.active_actor_count),
            actor_speed: Some(state.actor_speed),
        }
    }

    /// Assign every present and valid field into `state`.
    ///
    /// Fields that are present but violate a [`ProgressionState`] bound
    /// (zero level, non-positive threshold or interval, multiplier not above
    /// one, non-finite floats) are left untouched. Returns the names of the
    /// skipped fields.
    pub fn apply_to(&self, state: &mut ProgressionState) -> Vec<&'static str> {
        let mut skipped = Vec::new();

        if let Some(v) = self.funds {
            state.funds = v;
        }
        if let Some(v) = self.score {
            state.score = v;
        }
        if let Some(v) = self.experience {
            state.experience = v;
        }
        if let Some(v) = self.per_action_yield {
            state.per_action_yield = v;
        }
        if let Some(v) = self.funds_per_yield_unit {
            state.funds_per_yield_unit = v;
        }
        if let Some(v) = self.active_actor_count {
            state.active_actor_count = v;
        }

        match self.level {
            Some(v) if v >= 1 => state.level = v,
            Some(_) => skipped.push("level"),
            None => {}
        }
        match self.next_experience_threshold {
            Some(v) if v > 0 => state.next_experience_threshold = v,
            Some(_) => skipped.push("nextExperienceThreshold"),
            None => {}
        }
        match self.experience_level_multiplier {
            Some(v) if v.is_finite() && v > 1.0 => state.experience_level_multiplier = v,
            Some(_) => skipped.push("experienceLevelMultiplier"),
            None => {}
        }
        match self.auto_yield_interval_ms {
            Some(v) if v.is_finite() && v > 0.0 => state.auto_yield_interval_ms = v,
            Some(_) => skipped.push("autoYieldIntervalMs"),
            None => {}
        }
        match self.actor_speed {
            Some(v) if v.is_finite() && v > 0.0 => state.actor_speed = v,
            Some(_) => skipped.push("actorSpeed"),
            None => {}
        }

        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_apply_reproduces_scalars() {
        let source = ProgressionState {
            funds: 1234,
            score: 99,
            experience: 3,
            level: 4,
            next_experience_threshold: 23,
            per_action_yield: 7,
            active_actor_count: 3,
            actor_speed: 2.5,
            ..ProgressionState::default()
        };

        let mut target = ProgressionState::default();
        let skipped = GameData::capture(&source).apply_to(&mut target);

        assert!(skipped.is_empty());
        assert_eq!(target, source);
    }

    #[test]
    fn invalid_fields_are_skipped() {
        let data = GameData {
            level: Some(0),
            actor_speed: Some(-1.0),
            funds: Some(10),
            ..GameData::default()
        };
        let mut state = ProgressionState::default();
        let skipped = data.apply_to(&mut state);

        assert_eq!(skipped, vec!["level", "actorSpeed"]);
        assert_eq!(state.level, 1);
        assert_eq!(state.funds, 10);
        assert!((state.actor_speed - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_record_parses_with_defaults() {
        let json = r#"{ "gameData": { "funds": 42 }, "upgradeData": { "boost_cpu": {} } }"#;
        let record: SaveRecord = serde_json::from_str(json).unwrap_or_default();

        assert_eq!(record.game_data.funds, Some(42));
        assert_eq!(record.game_data.score, None);
        assert_eq!(
            record.upgrade_data.get("boost_cpu").map(|r| r.current_level),
            Some(1)
        );
        assert!(record.saved_at.is_none());
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let record = SaveRecord {
            game_data: GameData::capture(&ProgressionState::default()),
            ..SaveRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap_or_default();
        let game = json.get("gameData").cloned().unwrap_or_default();

        assert!(game.get("nextExperienceThreshold").is_some());
        assert!(game.get("perActionYield").is_some());
        assert!(json.get("upgradeData").is_some());
    }
}
