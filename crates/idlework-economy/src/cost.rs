//! Upgrade price curves.
//!
//! Both curves charge the base cost at level 1. A validated curve rises by
//! at least one whole fund per level until it saturates at `u64::MAX`.
//! Results are floored to whole funds.

use crate::EconomyError;

/// How an upgrade's price grows with its level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostCurve {
    /// `floor(base + base * growth^(level - 1))` beyond level 1.
    Exponential {
        /// Price at level 1.
        base: u64,
        /// Per-level growth factor.
        growth: f64,
    },
    /// `floor(base * growth^(level - 1))`.
    Geometric {
        /// Price at level 1.
        base: u64,
        /// Per-level growth factor.
        growth: f64,
    },
}

impl CostCurve {
    /// Price at level 1.
    pub const fn base(&self) -> u64 {
        match *self {
            Self::Exponential { base, .. } | Self::Geometric { base, .. } => base,
        }
    }

    /// Per-level growth factor.
    pub const fn growth(&self) -> f64 {
        match *self {
            Self::Exponential { growth, .. } | Self::Geometric { growth, .. } => growth,
        }
    }

    /// Price of the upgrade when it sits at `level`.
    ///
    /// Level 0 is treated as level 1. The result saturates at `u64::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use idlework_economy::CostCurve;
    ///
    /// let curve = CostCurve::Exponential { base: 10, growth: 1.5 };
    /// assert_eq!(curve.cost_at(1), 10);
    /// assert_eq!(curve.cost_at(2), 25);
    /// ```
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn cost_at(&self, level: u32) -> u64 {
        let base = self.base();
        if level <= 1 {
            return base;
        }
        let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let scaled = base as f64 * self.growth().powi(exponent);
        let raw = match self {
            Self::Exponential { .. } => base as f64 + scaled,
            Self::Geometric { .. } => scaled,
        };
        // Float-to-int `as` saturates at the target range.
        raw.floor() as u64
    }

    /// Reject curves whose floored price could stall between levels.
    ///
    /// Consecutive unfloored prices differ by at least `base * (growth - 1)`,
    /// so a step of one whole fund or more keeps every floored price strictly
    /// above the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidCostCurve`] when the base is zero, the
    /// growth factor is not finite or not above 1, or the first step is below
    /// one fund.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self, id: &str) -> Result<(), EconomyError> {
        let growth = self.growth();
        if self.base() == 0 {
            return Err(EconomyError::InvalidCostCurve {
                id: id.to_owned(),
                reason: "base cost must be positive".to_owned(),
            });
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(EconomyError::InvalidCostCurve {
                id: id.to_owned(),
                reason: format!("growth factor must be finite and > 1, got {growth}"),
            });
        }
        let step = self.base() as f64 * (growth - 1.0);
        if step < 1.0 {
            return Err(EconomyError::InvalidCostCurve {
                id: id.to_owned(),
                reason: format!(
                    "base * (growth - 1) must be at least 1, got {step} (price would stall)"
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_charges_base() {
        let exp = CostCurve::Exponential {
            base: 10,
            growth: 2.2,
        };
        let geo = CostCurve::Geometric {
            base: 50,
            growth: 1.5,
        };
        assert_eq!(exp.cost_at(1), 10);
        assert_eq!(exp.cost_at(0), 10);
        assert_eq!(geo.cost_at(1), 50);
    }

    #[test]
    fn known_values() {
        let exp = CostCurve::Exponential {
            base: 10,
            growth: 1.5,
        };
        assert_eq!(exp.cost_at(2), 25);
        assert_eq!(exp.cost_at(3), 32);

        let geo = CostCurve::Geometric {
            base: 10,
            growth: 1.5,
        };
        assert_eq!(geo.cost_at(2), 15);
        assert_eq!(geo.cost_at(3), 22);
    }

    #[test]
    fn costs_rise_with_level() {
        for curve in [
            CostCurve::Exponential {
                base: 10,
                growth: 2.2,
            },
            CostCurve::Geometric {
                base: 10,
                growth: 1.5,
            },
            CostCurve::Exponential {
                base: 100,
                growth: 1.8,
            },
        ] {
            let mut last = curve.cost_at(1);
            for level in 2..40 {
                let next = curve.cost_at(level);
                assert!(next > last, "{curve:?} stalled at level {level}");
                last = next;
            }
        }
    }

    #[test]
    fn huge_levels_saturate() {
        let curve = CostCurve::Geometric {
            base: 10,
            growth: 2.5,
        };
        assert_eq!(curve.cost_at(u32::MAX), u64::MAX);
    }

    #[test]
    fn validate_rejects_degenerate_curves() {
        let zero = CostCurve::Geometric {
            base: 0,
            growth: 1.5,
        };
        let shrinking = CostCurve::Exponential {
            base: 10,
            growth: 0.5,
        };
        let nan = CostCurve::Exponential {
            base: 10,
            growth: f64::NAN,
        };
        assert!(zero.validate("a").is_err());
        assert!(shrinking.validate("b").is_err());
        assert!(nan.validate("c").is_err());
        assert!(
            CostCurve::Geometric {
                base: 10,
                growth: 1.5
            }
            .validate("d")
            .is_ok()
        );
    }

    #[test]
    fn validate_rejects_curves_that_stall_when_floored() {
        let stalls = [
            CostCurve::Geometric {
                base: 1,
                growth: 1.5,
            },
            CostCurve::Exponential {
                base: 1,
                growth: 1.01,
            },
            CostCurve::Geometric {
                base: 9,
                growth: 1.1,
            },
        ];
        for curve in stalls {
            assert!(curve.validate("slow").is_err(), "{curve:?} accepted");
        }
    }

    #[test]
    fn smallest_valid_curves_still_rise_every_level() {
        for curve in [
            CostCurve::Geometric {
                base: 2,
                growth: 1.5,
            },
            CostCurve::Exponential {
                base: 1,
                growth: 2.0,
            },
            CostCurve::Geometric {
                base: 10,
                growth: 1.1,
            },
        ] {
            assert!(curve.validate("min").is_ok(), "{curve:?} rejected");
            let mut last = curve.cost_at(1);
            for level in 2..60 {
                let next = curve.cost_at(level);
                assert!(next > last, "{curve:?} stalled at level {level}");
                last = next;
            }
        }
    }
}
