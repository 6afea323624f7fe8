//! Frame receiver that nudges new players to tap.

use idlework_types::{Frame, TickFlow, Updatable};
use tracing::info;

use crate::config::HintConfig;
use crate::session::SharedSession;

/// Emits a tap hint every `interval_ms` until the score reaches the
/// threshold, then removes itself.
#[derive(Debug)]
pub struct TapHint {
    session: SharedSession,
    interval_ms: f64,
    score_threshold: u64,
    since_last_ms: f64,
}

impl TapHint {
    /// Receiver watching `session`.
    pub const fn new(session: SharedSession, config: &HintConfig) -> Self {
        Self {
            session,
            interval_ms: config.interval_ms,
            score_threshold: config.score_threshold,
            since_last_ms: 0.0,
        }
    }
}

impl Updatable for TapHint {
    fn tick(&mut self, frame: Frame) -> TickFlow {
        self.since_last_ms += frame.delta_ms();
        let Ok(mut session) = self.session.try_borrow_mut() else {
            return TickFlow::Continue;
        };

        let score = session.state().score;
        if score >= self.score_threshold {
            info!(score, "tap hints retired");
            return TickFlow::Finished;
        }

        if self.since_last_ms >= self.interval_ms {
            self.since_last_ms = 0.0;
            session.emit_tap_hint();
        }
        TickFlow::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use idlework_economy::UpgradeEngine;
    use idlework_types::ProgressionState;

    use super::*;
    use crate::observer::{ActionSource, GameObserver};
    use crate::session::Session;

    struct HintCounter(Rc<Cell<u32>>);

    impl GameObserver for HintCounter {
        fn on_tap_hint(&mut self) {
            self.0.set(self.0.get().saturating_add(1));
        }
    }

    fn frame(delta: f64) -> Frame {
        Frame {
            index: 1,
            delta,
            elapsed: delta,
        }
    }

    #[test]
    fn hints_until_threshold_then_finishes() {
        let hints = Rc::new(Cell::new(0));
        let session =
            Session::new(ProgressionState::default(), UpgradeEngine::default()).into_shared();
        session
            .borrow_mut()
            .subscribe(Box::new(HintCounter(Rc::clone(&hints))));
        let config = HintConfig {
            interval_ms: 1000.0,
            score_threshold: 2,
        };
        let mut receiver = TapHint::new(session.clone(), &config);

        for _ in 0..30 {
            assert_eq!(receiver.tick(frame(0.1)), TickFlow::Continue);
        }
        assert_eq!(hints.get(), 3);

        for _ in 0..2 {
            let _ = session.borrow_mut().perform_action(ActionSource::Manual);
        }
        assert_eq!(receiver.tick(frame(0.1)), TickFlow::Finished);
        assert_eq!(hints.get(), 3);
    }
}
