//! Frame clock: the single source of time for every receiver.
//!
//! The clock turns wall-clock instants into [`Frame`]s. Deltas are clamped to
//! a configured maximum so a long stall (a backgrounded window, a debugger
//! pause) arrives as one bounded step instead of a burst of catch-up work.
//!
//! # Design Principles
//!
//! - `elapsed` is the sum of clamped deltas, never wall-clock time since
//!   start. A receiver that derives motion from `elapsed` therefore sees the
//!   same time the accumulators see.
//! - Time spent paused is not counted. Resuming re-anchors the clock at the
//!   resume instant.

use std::time::Instant;

use idlework_types::Frame;

use crate::config::TimeConfig;

/// Errors that can occur when building a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid time configuration (e.g. a non-positive clamp).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Clamp used by [`FrameClock::default`], in seconds.
const DEFAULT_MAX_DELTA: f64 = 0.1;

/// Produces clamped frame timing from wall-clock instants.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest delta handed to receivers, in seconds.
    max_delta: f64,

    /// Instant of the previous frame, or `None` while paused.
    anchor: Option<Instant>,

    /// Sum of clamped deltas, in seconds.
    elapsed: f64,

    /// Number of frames produced so far.
    index: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            max_delta: DEFAULT_MAX_DELTA,
            anchor: None,
            elapsed: 0.0,
            index: 0,
        }
    }
}

impl FrameClock {
    /// Create a paused clock from a time configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_delta_ms` is not a
    /// positive number.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        Self::with_max_delta(config.max_delta_ms / 1000.0)
    }

    /// Create a paused clock with an explicit clamp in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_delta` is not a
    /// positive number.
    pub fn with_max_delta(max_delta: f64) -> Result<Self, ClockError> {
        if !(max_delta.is_finite() && max_delta > 0.0) {
            return Err(ClockError::InvalidConfig {
                reason: format!("max delta must be a positive number of seconds, got {max_delta}"),
            });
        }
        Ok(Self {
            max_delta,
            anchor: None,
            elapsed: 0.0,
            index: 0,
        })
    }

    /// Start counting from `now`. Calling this on a running clock moves the
    /// anchor forward, dropping the time since the last frame.
    pub const fn resume(&mut self, now: Instant) {
        self.anchor = Some(now);
    }

    /// Stop counting. The next [`Self::resume`] picks up from the stored
    /// elapsed time.
    pub const fn pause(&mut self) {
        self.anchor = None;
    }

    /// Whether the clock is counting.
    pub const fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Produce the frame ending at `now`, or `None` while paused.
    ///
    /// An instant earlier than the anchor yields a zero delta.
    pub fn advance(&mut self, now: Instant) -> Option<Frame> {
        let anchor = self.anchor?;
        let raw = now.saturating_duration_since(anchor).as_secs_f64();
        let delta = raw.min(self.max_delta);

        self.anchor = Some(now);
        self.elapsed += delta;
        self.index = self.index.saturating_add(1);

        Some(Frame {
            index: self.index,
            delta,
            elapsed: self.elapsed,
        })
    }

    /// Sum of clamped deltas so far, in seconds.
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames produced so far.
    pub const fn frame_index(&self) -> u64 {
        self.index
    }

    /// The delta clamp, in seconds.
    pub const fn max_delta(&self) -> f64 {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const EPS: f64 = 1e-9;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0.checked_add(Duration::from_millis(ms)).unwrap_or(t0)
    }

    fn clock() -> FrameClock {
        FrameClock::with_max_delta(0.1).unwrap_or_default()
    }

    #[test]
    fn paused_clock_produces_nothing() {
        let mut clock = clock();
        assert!(clock.advance(Instant::now()).is_none());
        assert_eq!(clock.frame_index(), 0);
    }

    #[test]
    fn deltas_accumulate_into_elapsed() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.resume(t0);

        let a = clock.advance(at(t0, 16));
        let b = clock.advance(at(t0, 48));

        assert_eq!(a.map(|f| f.index), Some(1));
        assert!((b.map_or(0.0, |f| f.delta) - 0.032).abs() < EPS);
        assert!((clock.elapsed() - 0.048).abs() < EPS);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.resume(t0);

        let frame = clock.advance(at(t0, 30_000));

        assert!((frame.map_or(0.0, |f| f.delta) - 0.1).abs() < EPS);
        assert!((clock.elapsed() - 0.1).abs() < EPS);
    }

    #[test]
    fn paused_gap_is_not_counted() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.resume(t0);
        let _ = clock.advance(at(t0, 20));
        clock.pause();

        clock.resume(at(t0, 10_000));
        let frame = clock.advance(at(t0, 10_010));

        assert!((frame.map_or(0.0, |f| f.delta) - 0.01).abs() < EPS);
        assert!((clock.elapsed() - 0.03).abs() < EPS);
    }

    #[test]
    fn earlier_instant_gives_zero_delta() {
        let mut clock = clock();
        let t0 = Instant::now();
        clock.resume(at(t0, 50));
        let frame = clock.advance(t0);
        assert!(frame.map_or(1.0, |f| f.delta).abs() < EPS);
    }

    #[test]
    fn rejects_bad_clamp() {
        assert!(FrameClock::with_max_delta(0.0).is_err());
        assert!(FrameClock::with_max_delta(f64::NAN).is_err());
        assert!(FrameClock::with_max_delta(-1.0).is_err());
    }
}
