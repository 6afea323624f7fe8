//! The scheduler: one frame pass over every registered receiver.
//!
//! # Pass semantics
//!
//! 1. The clock produces a frame (nothing happens while stopped).
//! 2. The receiver list is snapshotted. Registrations and removals made
//!    during the pass take effect on the next pass.
//! 3. Each receiver in the snapshot is ticked once, in registration order.
//! 4. Receivers that returned [`TickFlow::Finished`] are removed.
//!
//! All methods take `&self`, so a receiver holding a shared handle to the
//! scheduler can register or unregister from inside its own tick.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use idlework_types::{Frame, TickFlow, Updatable};
use tracing::{debug, info, trace};

use crate::clock::FrameClock;

/// Shared handle to a receiver.
pub type ReceiverHandle = Rc<RefCell<dyn Updatable>>;

/// Identity of a registration, returned by [`Scheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReceiverId(u64);

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiver#{}", self.0)
    }
}

/// Drives registered receivers once per frame.
pub struct Scheduler {
    clock: RefCell<FrameClock>,
    receivers: RefCell<Vec<(ReceiverId, ReceiverHandle)>>,
    next_id: Cell<u64>,
    running: Cell<bool>,
}

impl Scheduler {
    /// A stopped scheduler over `clock`.
    pub const fn new(clock: FrameClock) -> Self {
        Self {
            clock: RefCell::new(clock),
            receivers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            running: Cell::new(false),
        }
    }

    /// Add a receiver at the end of the pass order.
    pub fn register(&self, receiver: ReceiverHandle) -> ReceiverId {
        let id = ReceiverId(self.next_id.get());
        self.next_id.set(self.next_id.get().saturating_add(1));
        self.receivers.borrow_mut().push((id, receiver));
        debug!(receiver = %id, count = self.len(), "receiver registered");
        id
    }

    /// Remove a receiver. Returns `false` if it was not registered.
    pub fn unregister(&self, id: ReceiverId) -> bool {
        let mut receivers = self.receivers.borrow_mut();
        let before = receivers.len();
        receivers.retain(|(rid, _)| *rid != id);
        let removed = receivers.len() != before;
        drop(receivers);
        if removed {
            debug!(receiver = %id, count = self.len(), "receiver unregistered");
        }
        removed
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: ReceiverId) -> bool {
        self.receivers.borrow().iter().any(|(rid, _)| *rid == id)
    }

    /// Number of registered receivers.
    pub fn len(&self) -> usize {
        self.receivers.borrow().len()
    }

    /// Whether no receivers are registered.
    pub fn is_empty(&self) -> bool {
        self.receivers.borrow().is_empty()
    }

    /// Start producing frames, counting from `now`. No-op if running.
    pub fn start(&self, now: Instant) {
        if self.running.get() {
            debug!("scheduler already running");
            return;
        }
        self.clock.borrow_mut().resume(now);
        self.running.set(true);
        info!(receivers = self.len(), "scheduler started");
    }

    /// Stop producing frames. No-op if stopped.
    pub fn stop(&self) {
        if !self.running.get() {
            debug!("scheduler already stopped");
            return;
        }
        self.clock.borrow_mut().pause();
        self.running.set(false);
        info!(
            frames = self.clock.borrow().frame_index(),
            elapsed = self.clock.borrow().elapsed(),
            "scheduler stopped"
        );
    }

    /// Whether frames are being produced.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Sum of clamped deltas so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.clock.borrow().elapsed()
    }

    /// Run one pass for the frame ending at `now`.
    ///
    /// Returns the frame, or `None` while stopped.
    pub fn frame(&self, now: Instant) -> Option<Frame> {
        if !self.running.get() {
            return None;
        }
        let frame = self.clock.borrow_mut().advance(now)?;

        let snapshot: Vec<(ReceiverId, ReceiverHandle)> = self.receivers.borrow().clone();
        let mut finished = Vec::new();
        for (id, receiver) in &snapshot {
            let Ok(mut receiver) = receiver.try_borrow_mut() else {
                debug!(receiver = %id, frame = frame.index, "receiver busy, skipped");
                continue;
            };
            if receiver.tick(frame) == TickFlow::Finished {
                finished.push(*id);
            }
        }

        for id in finished {
            if self.unregister(id) {
                debug!(receiver = %id, frame = frame.index, "receiver finished");
            }
        }

        trace!(frame = frame.index, delta = frame.delta, "frame pass complete");
        Some(frame)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("receivers", &self.len())
            .field("running", &self.running.get())
            .finish_non_exhaustive()
    }
}
