//! Per-unit animation parameters and the pose each unit produces.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which side of a symmetric pair a unit sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RotationSign {
    /// Rotates toward positive angles.
    Positive,
    /// Rotates toward negative angles.
    Negative,
}

impl RotationSign {
    /// Alternate sides by creation index: even units are positive.
    pub const fn for_index(index: u32) -> Self {
        if index % 2 == 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// The sign as a multiplier (`+1.0` or `-1.0`).
    pub const fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Parameters of one animated unit.
///
/// Everything except `visible` and `speed_multiplier` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActorControllerState {
    /// Resting position along the swing axis.
    pub base_offset: f64,
    /// Side of the symmetric pair.
    pub rotation_sign: RotationSign,
    /// Per-unit time offset in seconds, used to stagger units.
    pub phase_offset: f64,
    /// Live speed multiplier applied to elapsed time.
    pub speed_multiplier: f64,
    /// Randomized scale for swing distance and angle.
    pub amplitude_factor: f64,
    /// Invisible units are skipped entirely.
    pub visible: bool,
}

/// Output of a unit's most recent evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActorPose {
    /// Position along the swing axis.
    pub position: f64,
    /// Signed rotation in radians.
    pub rotation: f64,
}
