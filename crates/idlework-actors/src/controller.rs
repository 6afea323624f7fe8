//! A single procedurally animated unit.

use idlework_types::{ActorControllerState, ActorPose};

use crate::easing;

/// Shape parameters shared by every controller in a rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingShape {
    /// Cycle length in seconds at speed 1. Positive.
    pub cycle_secs: f64,
    /// Positional travel at full swing.
    pub reach: f64,
    /// Rotation at full swing, in radians.
    pub max_angle: f64,
}

/// Two-phase cyclic state machine for one unit.
///
/// The controller holds no integrated motion state: each evaluation derives
/// the pose from absolute elapsed time and the unit's parameters.
#[derive(Debug, Clone)]
pub struct ActorController {
    state: ActorControllerState,
    shape: SwingShape,
    pose: ActorPose,
    evaluations: u64,
}

impl ActorController {
    /// Create a controller at its resting pose.
    pub const fn new(state: ActorControllerState, shape: SwingShape) -> Self {
        let pose = ActorPose {
            position: state.base_offset,
            rotation: 0.0,
        };
        Self {
            state,
            shape,
            pose,
            evaluations: 0,
        }
    }

    /// Local phase in `[0, 1)` at the given elapsed time.
    pub fn phase_at(&self, elapsed: f64) -> f64 {
        easing::phase(
            elapsed,
            self.state.speed_multiplier,
            self.state.phase_offset,
            self.shape.cycle_secs,
        )
    }

    /// Pose at the given elapsed time, without recording it.
    pub fn pose_at(&self, elapsed: f64) -> ActorPose {
        let swing = easing::swing(self.phase_at(elapsed)) * self.state.amplitude_factor;
        ActorPose {
            position: self.state.base_offset + swing * self.shape.reach,
            rotation: self.state.rotation_sign.factor() * swing * self.shape.max_angle,
        }
    }

    /// Recompute and store the pose for this frame.
    pub fn evaluate(&mut self, elapsed: f64) -> ActorPose {
        self.pose = self.pose_at(elapsed);
        self.evaluations = self.evaluations.saturating_add(1);
        self.pose
    }

    /// The most recently evaluated pose.
    pub const fn pose(&self) -> ActorPose {
        self.pose
    }

    /// The unit's parameters.
    pub const fn state(&self) -> &ActorControllerState {
        &self.state
    }

    /// How many times this controller has been evaluated.
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Whether the unit is currently animating.
    pub const fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub(crate) const fn set_visible(&mut self, visible: bool) {
        self.state.visible = visible;
    }

    pub(crate) const fn set_speed(&mut self, speed: f64) {
        self.state.speed_multiplier = speed;
    }
}

#[cfg(test)]
mod tests {
    use idlework_types::RotationSign;

    use super::*;

    const EPS: f64 = 1e-9;

    fn controller(sign: RotationSign, amplitude: f64) -> ActorController {
        ActorController::new(
            ActorControllerState {
                base_offset: 1.0,
                rotation_sign: sign,
                phase_offset: 0.0,
                speed_multiplier: 1.0,
                amplitude_factor: amplitude,
                visible: true,
            },
            SwingShape {
                cycle_secs: 2.0,
                reach: 0.5,
                max_angle: 0.6,
            },
        )
    }

    #[test]
    fn starts_at_rest() {
        let c = controller(RotationSign::Positive, 1.0);
        assert!((c.pose().position - 1.0).abs() < EPS);
        assert!(c.pose().rotation.abs() < EPS);
        assert_eq!(c.evaluations(), 0);
    }

    #[test]
    fn full_swing_at_half_cycle() {
        let mut c = controller(RotationSign::Positive, 1.0);
        let pose = c.evaluate(1.0);
        assert!((pose.position - 1.5).abs() < EPS);
        assert!((pose.rotation - 0.6).abs() < EPS);
        assert_eq!(c.evaluations(), 1);
    }

    #[test]
    fn mirrored_units_rotate_opposite_ways() {
        let left = controller(RotationSign::Positive, 1.0).pose_at(0.7);
        let right = controller(RotationSign::Negative, 1.0).pose_at(0.7);
        assert!((left.rotation + right.rotation).abs() < EPS);
        assert!((left.position - right.position).abs() < EPS);
    }

    #[test]
    fn amplitude_scales_swing() {
        let base = controller(RotationSign::Positive, 1.0).pose_at(1.0);
        let damped = controller(RotationSign::Positive, 0.5).pose_at(1.0);
        assert!((damped.rotation - base.rotation * 0.5).abs() < EPS);
    }

    #[test]
    fn speed_change_applies_on_next_evaluation() {
        let mut c = controller(RotationSign::Positive, 1.0);
        c.evaluate(0.25);
        c.set_speed(2.0);
        let pose = c.evaluate(0.5);
        // 0.5 s at speed 2 is the half-cycle peak.
        assert!((pose.rotation - 0.6).abs() < EPS);
    }
}
