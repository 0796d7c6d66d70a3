//! # Sail trim table
//!
//! Discrete mapping from the relative wind direction to a sail angle, one
//! per point of sail. The table is symmetric about 180 degrees, port and
//! starboard winds of equal magnitude trim the sail identically.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use util::maths::wrap_360;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Offset between the relative wind direction reported by the boat's wind
/// feed and the bow-relative convention the trim table is built in.
///
/// The feed reports the direction the wind vector points towards, while the
/// table works in degrees off the bow of the direction it comes from, hence
/// the half-circle shift.
///
/// Units: degrees
pub const RELATIVE_WIND_OFFSET_DEG: f64 = 180.0;

/// Sail angle when close hauled.
///
/// Units: degrees
pub const SAIL_ANGLE_CLOSE_HAULED_DEG: f64 = 0.0;

/// Sail angle on a close reach.
///
/// Units: degrees
pub const SAIL_ANGLE_CLOSE_REACH_DEG: f64 = 10.0;

/// Sail angle on a beam reach.
///
/// Units: degrees
pub const SAIL_ANGLE_BEAM_REACH_DEG: f64 = 20.0;

/// Sail angle on a broad reach.
///
/// Units: degrees
pub const SAIL_ANGLE_BROAD_REACH_DEG: f64 = 45.0;

/// Sail angle when running downwind.
///
/// Units: degrees
pub const SAIL_ANGLE_RUNNING_DEG: f64 = 90.0;

/// Upper edge of the close hauled band, degrees off the wind.
const CLOSE_HAULED_BAND_DEG: f64 = 45.0;

/// Upper edge of the close reach band, degrees off the wind.
const CLOSE_REACH_BAND_DEG: f64 = 68.0;

/// Upper edge of the beam reach band, degrees off the wind (inclusive).
const BEAM_REACH_BAND_DEG: f64 = 90.0;

/// Upper edge of the broad reach band, degrees off the wind (inclusive).
const BROAD_REACH_BAND_DEG: f64 = 113.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply the feed convention offset to a raw relative wind direction.
pub fn corrected_relative_wind_deg(raw_relative_wind_deg: f64) -> f64 {
    wrap_360(raw_relative_wind_deg + RELATIVE_WIND_OFFSET_DEG)
}

/// Look up the sail angle for the given (corrected) relative wind direction.
///
/// The direction is folded about 180 degrees so winds on either side of the
/// bow read from the same band table.
pub fn sail_angle_deg(relative_wind_direction_deg: f64) -> f64 {
    let wind = wrap_360(relative_wind_direction_deg);

    // Fold into degrees off the bow, [0, 180]
    let off_bow_deg = if wind <= 180.0 { wind } else { 360.0 - wind };

    if off_bow_deg < CLOSE_HAULED_BAND_DEG {
        SAIL_ANGLE_CLOSE_HAULED_DEG
    }
    else if off_bow_deg < CLOSE_REACH_BAND_DEG {
        SAIL_ANGLE_CLOSE_REACH_DEG
    }
    else if off_bow_deg <= BEAM_REACH_BAND_DEG {
        SAIL_ANGLE_BEAM_REACH_DEG
    }
    else if off_bow_deg <= BROAD_REACH_BAND_DEG {
        SAIL_ANGLE_BROAD_REACH_DEG
    }
    else {
        SAIL_ANGLE_RUNNING_DEG
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_points_of_sail() {
        assert_eq!(sail_angle_deg(0.0), SAIL_ANGLE_CLOSE_HAULED_DEG);
        assert_eq!(sail_angle_deg(50.0), SAIL_ANGLE_CLOSE_REACH_DEG);
        assert_eq!(sail_angle_deg(90.0), SAIL_ANGLE_BEAM_REACH_DEG);
        assert_eq!(sail_angle_deg(100.0), SAIL_ANGLE_BROAD_REACH_DEG);
        assert_eq!(sail_angle_deg(180.0), SAIL_ANGLE_RUNNING_DEG);

        // Mirrored side
        assert_eq!(sail_angle_deg(250.0), SAIL_ANGLE_BROAD_REACH_DEG);
        assert_eq!(sail_angle_deg(270.0), SAIL_ANGLE_BEAM_REACH_DEG);
        assert_eq!(sail_angle_deg(315.0), SAIL_ANGLE_CLOSE_REACH_DEG);
        assert_eq!(sail_angle_deg(350.0), SAIL_ANGLE_CLOSE_HAULED_DEG);
    }

    #[test]
    fn test_symmetric_about_downwind() {
        for i in 0..=180 {
            let w = i as f64;
            assert_eq!(
                sail_angle_deg(w),
                sail_angle_deg(360.0 - w),
                "table asymmetric at {} degrees",
                w
            );
        }
    }

    #[test]
    fn test_feed_offset() {
        // A feed reading of zero is wind coming from dead astern
        assert_eq!(corrected_relative_wind_deg(0.0), 180.0);
        assert_eq!(corrected_relative_wind_deg(180.0), 0.0);
        assert_eq!(corrected_relative_wind_deg(270.0), 90.0);

        assert_eq!(
            sail_angle_deg(corrected_relative_wind_deg(180.0)),
            SAIL_ANGLE_CLOSE_HAULED_DEG
        );
    }
}
