//! Phase and swing curves shared by every controller.
//!
//! Both functions are pure. Phase is derived from absolute elapsed time, so
//! a controller never integrates velocity and a speed change needs no
//! discontinuity correction.

use core::f64::consts::FRAC_PI_2;

/// Local cycle phase in `[0, 1)`.
///
/// `t = frac((elapsed * speed - offset) / cycle + 1)`. `cycle` must be
/// positive; the caller's configuration guarantees it.
pub fn phase(elapsed: f64, speed: f64, offset: f64, cycle: f64) -> f64 {
    let t = ((elapsed * speed - offset) / cycle + 1.0).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if t >= 1.0 { 0.0 } else { t }
}

/// Two-phase swing curve over a phase in `[0, 1)`.
///
/// Ease-in `(2t)^2` for the first half, then ease-out
/// `sin((1 - (t - 0.5) * 2) * pi/2)` back to rest.
pub fn swing(t: f64) -> f64 {
    if t < 0.5 {
        let x = 2.0 * t;
        x * x
    } else {
        ((1.0 - (t - 0.5) * 2.0) * FRAC_PI_2).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn phase_wraps_into_unit_interval() {
        assert!((phase(0.0, 1.0, 0.0, 2.0)).abs() < EPS);
        assert!((phase(1.0, 1.0, 0.0, 2.0) - 0.5).abs() < EPS);
        assert!((phase(2.5, 1.0, 0.0, 2.0) - 0.25).abs() < EPS);
    }

    #[test]
    fn phase_handles_offset_before_start() {
        // elapsed 0 with a 0.5 s offset on a 2 s cycle sits at 0.75.
        assert!((phase(0.0, 1.0, 0.5, 2.0) - 0.75).abs() < EPS);
        let far_behind = phase(0.0, 1.0, 9.0, 2.0);
        assert!((0.0..1.0).contains(&far_behind));
    }

    #[test]
    fn speed_scales_elapsed_time() {
        assert!((phase(0.5, 2.0, 0.0, 2.0) - phase(1.0, 1.0, 0.0, 2.0)).abs() < EPS);
    }

    #[test]
    fn swing_is_continuous_at_the_midpoint() {
        let before = swing(0.5 - 1e-7);
        let after = swing(0.5);
        assert!((before - after).abs() < 1e-5);
        assert!((after - 1.0).abs() < EPS);
    }

    #[test]
    fn swing_rests_at_cycle_ends() {
        assert!(swing(0.0).abs() < EPS);
        assert!(swing(1.0 - 1e-9) < 1e-6);
        assert!((swing(0.25) - 0.25).abs() < EPS);
    }
}
