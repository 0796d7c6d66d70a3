//! # Heading controller
//!
//! This module provides the PI controller which converts a heading error
//! into a rudder demand.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Limit on the magnitude of the rudder demand.
///
/// Units: degrees
pub const RUDDER_LIMIT_DEG: f64 = 180.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PI controller over the heading error.
///
/// The integrator accumulates the raw error once per cycle, so the
/// controller must be stepped at the executive's fixed cycle period for its
/// behaviour to be deterministic.
#[derive(Debug, Default, Clone)]
pub struct HeadingController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Limit on the integrator magnitude
    integrator_max: f64,

    /// The integral accumulation
    integrator: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HeadingController {

    /// Create a new controller from the given parameters.
    pub fn new(params: &super::Params) -> Self {
        Self {
            k_p: params.k_p,
            k_i: params.k_i,
            integrator_max: params.integrator_max,
            integrator: 0f64
        }
    }

    /// Get the rudder demand for the given heading error.
    ///
    /// A positive error means the target lies to starboard of the current
    /// heading, and produces a negative rudder demand. This is the boat's
    /// steering convention and must not be re-derived from geometry.
    ///
    /// The integrator is accumulated and clamped before use, so it can never
    /// wind up beyond `integrator_max` in magnitude. The demand itself is
    /// clamped to [`RUDDER_LIMIT_DEG`].
    pub fn update(&mut self, error_deg: f64) -> f64 {
        self.integrator = clamp(
            &(self.integrator + error_deg),
            &-self.integrator_max,
            &self.integrator_max
        );

        let rudder_dem_deg = -(self.k_p * error_deg + self.k_i * self.integrator);

        clamp(&rudder_dem_deg, &-RUDDER_LIMIT_DEG, &RUDDER_LIMIT_DEG)
    }

    /// Reset the integrator to zero.
    ///
    /// Called whenever a new target is installed, so that windup from the
    /// previous target cannot carry over.
    pub fn reset(&mut self) {
        self.integrator = 0f64;
    }

    /// Get the current value of the integrator.
    pub fn integrator(&self) -> f64 {
        self.integrator
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nav_ctrl::Params;

    fn controller_with_gains(k_p: f64, k_i: f64, integrator_max: f64) -> HeadingController {
        HeadingController::new(&Params {
            k_p,
            k_i,
            integrator_max,
            ..Params::default()
        })
    }

    #[test]
    fn test_sign_convention() {
        let mut ctrl = controller_with_gains(0.6, 0.0, 200.0);

        // Target to starboard demands rudder to port
        assert_eq!(ctrl.update(10.0), -6.0);
        assert_eq!(ctrl.update(-10.0), 6.0);
    }

    #[test]
    fn test_integrator_clamped() {
        let mut ctrl = controller_with_gains(0.0, 1.0, 50.0);

        // Wind the integrator well past the limit in both directions
        for _ in 0..100 {
            ctrl.update(10.0);
            assert!(ctrl.integrator().abs() <= 50.0);
        }
        assert_eq!(ctrl.integrator(), 50.0);

        for _ in 0..200 {
            ctrl.update(-10.0);
            assert!(ctrl.integrator().abs() <= 50.0);
        }
        assert_eq!(ctrl.integrator(), -50.0);
    }

    #[test]
    fn test_rudder_clamped() {
        let mut ctrl = controller_with_gains(1000.0, 0.0, 200.0);

        assert_eq!(ctrl.update(170.0), -RUDDER_LIMIT_DEG);
        assert_eq!(ctrl.update(-170.0), RUDDER_LIMIT_DEG);
    }

    #[test]
    fn test_reset() {
        let mut ctrl = controller_with_gains(0.6, 0.1, 200.0);

        ctrl.update(10.0);
        ctrl.update(10.0);
        assert_eq!(ctrl.integrator(), 20.0);

        ctrl.reset();
        assert_eq!(ctrl.integrator(), 0.0);

        // First update after a reset sees only the new error
        assert_eq!(ctrl.update(5.0), -(0.6 * 5.0 + 0.1 * 5.0));
    }
}
