//! Per-frame timing data and the update-receiver contract.
//!
//! A [`Frame`] is produced once per scheduler pass by the tick source. Every
//! registered [`Updatable`] receives the same frame, in registration order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Timing information for a single scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Frame {
    /// Sequential frame number, starting at 1 for the first processed frame.
    pub index: u64,
    /// Seconds since the previous frame, already clamped by the tick source.
    pub delta: f64,
    /// Running total of clamped deltas, in seconds.
    pub elapsed: f64,
}

impl Frame {
    /// The clamped delta expressed in milliseconds.
    pub const fn delta_ms(self) -> f64 {
        self.delta * 1000.0
    }
}

/// What a receiver wants the scheduler to do with it after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TickFlow {
    /// Keep the receiver registered.
    Continue,
    /// The receiver is done; remove it before the next pass.
    Finished,
}

/// Anything that wants to be driven once per frame.
///
/// Receivers must not block. A receiver may only read its own state and the
/// frame it is given; it must not rely on the execution order of other
/// receivers within the same pass.
pub trait Updatable {
    /// Advance this receiver by one frame.
    fn tick(&mut self, frame: Frame) -> TickFlow;
}
