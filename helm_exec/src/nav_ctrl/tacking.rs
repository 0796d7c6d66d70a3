//! # Tacking state machine
//!
//! A sailing boat cannot hold a heading inside the no-go cone around the
//! wind direction. When the desired heading falls inside the cone this state
//! machine diverts the commanded heading to one edge of the cone, offset
//! from the wind by the tacking angle, and commits to that side so the helm
//! does not flap between tacks on every cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::{ang_delta_180, mirror_180, wrap_360};

use super::Params;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The tacking condition of the helm.
///
/// A single enum rather than a pair of flags, so that being committed to
/// both sides at once is unrepresentable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TackState {
    /// The desired heading is sailable directly, no tack is needed.
    Unconstrained,

    /// Committed to the tack with the wind on the starboard side of the
    /// cone, sailing wind - tacking_angle.
    TackLeft,

    /// Committed to the tack with the wind on the port side of the cone,
    /// sailing wind + tacking_angle.
    TackRight
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The tacking state machine.
#[derive(Debug, Default)]
pub struct TackStateMachine {
    state: TackState
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TackState {
    fn default() -> Self {
        TackState::Unconstrained
    }
}

impl TackStateMachine {

    /// Get the current state of the machine.
    pub fn state(&self) -> TackState {
        self.state
    }

    /// Reset the machine, clearing any committed tack.
    pub fn reset(&mut self) {
        self.state = TackState::Unconstrained;
    }

    /// Update the machine for this cycle and get the effective target
    /// heading.
    ///
    /// If the desired heading lies outside the no-go cone (or tacking is
    /// disabled) it is passed through unchanged and any committed tack is
    /// cleared. Otherwise the returned heading is the committed cone edge,
    /// `wind ± tacking_angle`.
    pub fn update(
        &mut self,
        params: &Params,
        wind_direction_deg: f64,
        desired_heading_deg: f64
    ) -> f64 {
        // The target is constrained when it sits within the cone half-angle
        // of the wind direction
        let constrained = params.enable_tacking
            && ang_delta_180(wind_direction_deg, desired_heading_deg).abs()
                < params.cone_angle_deg;

        if !constrained {
            self.state = TackState::Unconstrained;
            return desired_heading_deg;
        }

        let bearing_to_wind_deg = wrap_360(desired_heading_deg - wind_direction_deg);

        // On first entry commit to the nearer edge of the cone
        if self.state == TackState::Unconstrained {
            self.state = Self::side_for(bearing_to_wind_deg);
        }

        // If the folded bearing-to-wind has left the cone the committed edge
        // is re-evaluated; while it stays inside the cone the committed side
        // is held to avoid oscillating between tacks
        if mirror_180(bearing_to_wind_deg) >= params.cone_angle_deg {
            self.state = Self::side_for(bearing_to_wind_deg);
        }

        match self.state {
            TackState::TackRight => {
                wrap_360(wind_direction_deg + params.tacking_angle_deg)
            }
            TackState::TackLeft => {
                wrap_360(wind_direction_deg - params.tacking_angle_deg)
            }
            // A side is always committed by this point
            TackState::Unconstrained => unreachable!()
        }
    }

    /// Get the tack side for the given bearing-to-wind.
    fn side_for(bearing_to_wind_deg: f64) -> TackState {
        if bearing_to_wind_deg <= 180.0 {
            TackState::TackRight
        }
        else {
            TackState::TackLeft
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_target_in_cone_diverts_to_edge() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        // Wind from north, target 5 degrees: inside the 15 degree cone, so
        // the helm must sail a 45 degree tack, not 5 degrees
        let effective = sm.update(&params, 0.0, 5.0);

        assert_eq!(sm.state(), TackState::TackRight);
        assert_eq!(effective, 45.0);
    }

    #[test]
    fn test_port_side_entry() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        // Target just anticlockwise of the wind commits to the left tack
        let effective = sm.update(&params, 0.0, 355.0);

        assert_eq!(sm.state(), TackState::TackLeft);
        assert_eq!(effective, 315.0);
    }

    #[test]
    fn test_unconstrained_passthrough() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        let effective = sm.update(&params, 0.0, 90.0);

        assert_eq!(sm.state(), TackState::Unconstrained);
        assert_eq!(effective, 90.0);
    }

    #[test]
    fn test_committed_side_held() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        // Commit to the left tack
        sm.update(&params, 0.0, 355.0);
        assert_eq!(sm.state(), TackState::TackLeft);

        // The target drifting over to the other side of the wind while still
        // inside the cone does not flip the committed side
        let effective = sm.update(&params, 0.0, 3.0);
        assert_eq!(sm.state(), TackState::TackLeft);
        assert_eq!(effective, 315.0);
    }

    #[test]
    fn test_exit_clears_commitment() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        sm.update(&params, 0.0, 5.0);
        assert_eq!(sm.state(), TackState::TackRight);

        // Target well clear of the cone: back to unconstrained passthrough
        let effective = sm.update(&params, 0.0, 30.0);
        assert_eq!(sm.state(), TackState::Unconstrained);
        assert_eq!(effective, 30.0);
    }

    #[test]
    fn test_tacking_disabled() {
        let params = Params {
            enable_tacking: false,
            ..Params::default()
        };
        let mut sm = TackStateMachine::default();

        // Even a dead-upwind target passes through with tacking off
        let effective = sm.update(&params, 0.0, 5.0);
        assert_eq!(sm.state(), TackState::Unconstrained);
        assert_eq!(effective, 5.0);
    }

    #[test]
    fn test_wind_wrap_around_north() {
        let params = Params::default();
        let mut sm = TackStateMachine::default();

        // Wind from 350, target 355: inside the cone, clockwise of the wind
        let effective = sm.update(&params, 350.0, 355.0);
        assert_eq!(sm.state(), TackState::TackRight);
        assert_eq!(effective, wrap_360(350.0 + 45.0));
    }
}
