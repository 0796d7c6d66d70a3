//! # Cross-track corrector
//!
//! When sailing a leg between two waypoints the helm should close back onto
//! the track line between them, not just point at the endpoint. This module
//! produces the correction term which is summed into the heading error.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use boat_if::nav::{Pos, Target};

use super::Params;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the cross-track error term for the current cycle.
///
/// Only active when the feature is enabled and both the previous and current
/// targets are waypoints; bearing targets have no track line, and without a
/// previous waypoint there is no leg to hold, so the term is zero.
///
/// Sign convention: the underlying cross-track distance is positive when the
/// boat is to port of the `previous -> current` track. Heading errors are
/// positive when the target is to starboard, so summing the two steers the
/// boat to starboard, back towards the track. The distance is scaled by
/// `cross_track_gain` before use.
pub fn cross_track_error_m(
    params: &Params,
    prev_target: Option<&Target>,
    target: Option<&Target>,
    pos: &Pos
) -> f64 {
    if !params.enable_cross_track_minimization {
        return 0.0;
    }

    match (prev_target, target) {
        (
            Some(Target::Waypoint { pos: leg_start }),
            Some(Target::Waypoint { pos: leg_end })
        ) => {
            pos.cross_track_distance_m(leg_start, leg_end) * params.cross_track_gain
        }
        _ => 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn northbound_leg() -> (Target, Target) {
        (
            Target::Waypoint {
                pos: Pos { lat_deg: 0.0, lon_deg: 0.0 }
            },
            Target::Waypoint {
                pos: Pos { lat_deg: 0.1, lon_deg: 0.0 }
            }
        )
    }

    #[test]
    fn test_boat_port_of_track_steers_starboard() {
        let params = Params::default();
        let (start, end) = northbound_leg();

        // Boat west of a northbound leg, i.e. to port of the track
        let pos = Pos { lat_deg: 0.05, lon_deg: -0.01 };

        let xte = cross_track_error_m(&params, Some(&start), Some(&end), &pos);

        // Positive, like a target-to-starboard heading error
        assert!(xte > 0.0);
    }

    #[test]
    fn test_gain_applied() {
        let params = Params {
            cross_track_gain: 0.5,
            ..Params::default()
        };
        let (start, end) = northbound_leg();
        let pos = Pos { lat_deg: 0.05, lon_deg: -0.01 };

        let full = cross_track_error_m(&Params::default(), Some(&start), Some(&end), &pos);
        let half = cross_track_error_m(&params, Some(&start), Some(&end), &pos);

        assert!((half - full * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_cases() {
        let params = Params::default();
        let (start, end) = northbound_leg();
        let pos = Pos { lat_deg: 0.05, lon_deg: -0.01 };
        let bearing = Target::Bearing { bearing_deg: 0.0 };

        // No previous target
        assert_eq!(cross_track_error_m(&params, None, Some(&end), &pos), 0.0);

        // Either target a bare bearing
        assert_eq!(
            cross_track_error_m(&params, Some(&bearing), Some(&end), &pos),
            0.0
        );
        assert_eq!(
            cross_track_error_m(&params, Some(&start), Some(&bearing), &pos),
            0.0
        );

        // Feature disabled
        let disabled = Params {
            enable_cross_track_minimization: false,
            ..Params::default()
        };
        assert_eq!(
            cross_track_error_m(&disabled, Some(&start), Some(&end), &pos),
            0.0
        );
    }
}
