//! Frame receiver that fires automatic actions on a timer.

use idlework_types::{Frame, TickFlow, Updatable};
use tracing::debug;

use crate::session::SharedSession;

/// Feeds each frame's delta to the session's auto-yield timer.
///
/// If the session is already borrowed when a frame arrives, the delta is
/// held and added on the next frame that gets through.
#[derive(Debug)]
pub struct AutoYield {
    session: SharedSession,
    pending_ms: f64,
}

impl AutoYield {
    /// Receiver driving `session`.
    pub const fn new(session: SharedSession) -> Self {
        Self {
            session,
            pending_ms: 0.0,
        }
    }
}

impl Updatable for AutoYield {
    fn tick(&mut self, frame: Frame) -> TickFlow {
        self.pending_ms += frame.delta_ms();
        let Ok(mut session) = self.session.try_borrow_mut() else {
            debug!(pending_ms = self.pending_ms, "session busy, auto-yield deferred");
            return TickFlow::Continue;
        };
        let _ = session.accumulate_auto_yield(self.pending_ms);
        self.pending_ms = 0.0;
        TickFlow::Continue
    }
}

#[cfg(test)]
mod tests {
    use idlework_economy::UpgradeEngine;
    use idlework_types::ProgressionState;

    use super::*;
    use crate::session::Session;

    fn frame(delta: f64) -> Frame {
        Frame {
            index: 1,
            delta,
            elapsed: delta,
        }
    }

    fn shared() -> SharedSession {
        Session::new(ProgressionState::default(), UpgradeEngine::default()).into_shared()
    }

    #[test]
    fn fires_once_per_interval() {
        let session = shared();
        let mut receiver = AutoYield::new(session.clone());

        for _ in 0..25 {
            let _ = receiver.tick(frame(0.1));
        }

        // 2.5 s at a 1000 ms interval.
        assert_eq!(session.borrow().state().score, 2);
    }

    #[test]
    fn busy_session_keeps_time() {
        let session = shared();
        let mut receiver = AutoYield::new(session.clone());

        let guard = session.borrow();
        let _ = receiver.tick(frame(0.6));
        drop(guard);
        let _ = receiver.tick(frame(0.5));

        assert_eq!(session.borrow().state().score, 1);
    }
}
