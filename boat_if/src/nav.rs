//! # Navigation primitives
//!
//! Geodetic positions, wind observations, and navigation targets shared
//! between the helm executable, the boat daemon, and the ground station.
//!
//! All angles are degrees on a [0, 360) compass circle, clockwise from north.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Mean earth radius used for all spherical geometry.
///
/// Units: meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A geodetic position on the earth's surface.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    /// Latitude, positive north.
    ///
    /// Units: degrees
    pub lat_deg: f64,

    /// Longitude, positive east.
    ///
    /// Units: degrees
    pub lon_deg: f64
}

/// A wind observation from the boat's wind sensor.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Wind {
    /// Absolute direction the wind is coming from.
    ///
    /// Units: degrees, compass
    pub direction_deg: f64,

    /// Wind direction relative to the boat's bow.
    ///
    /// Units: degrees, as reported by the sensor feed (see
    /// `nav_ctrl::sail_trim` for the convention offset)
    pub relative_direction_deg: f64
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A navigation target for the helm to steer towards.
///
/// Targets are replaced wholesale when a new one is commanded, never mutated
/// in place.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Hold a fixed compass bearing.
    Bearing {
        /// The bearing to hold.
        ///
        /// Units: degrees, compass
        bearing_deg: f64
    },

    /// Steer towards a geographic waypoint.
    Waypoint {
        /// The position of the waypoint.
        pos: Pos
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pos {
    /// Get the initial great-circle bearing from this position to another.
    ///
    /// Units: degrees, compass, in [0, 360)
    pub fn bearing_to_deg(&self, other: &Pos) -> f64 {
        let lat_0 = self.lat_deg.to_radians();
        let lat_1 = other.lat_deg.to_radians();
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let y = dlon.sin() * lat_1.cos();
        let x = lat_0.cos() * lat_1.sin() - lat_0.sin() * lat_1.cos() * dlon.cos();

        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Get the great-circle (haversine) distance to another position.
    ///
    /// Units: meters
    pub fn distance_m(&self, other: &Pos) -> f64 {
        let lat_0 = self.lat_deg.to_radians();
        let lat_1 = other.lat_deg.to_radians();
        let dlat = (other.lat_deg - self.lat_deg).to_radians();
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat_0.cos() * lat_1.cos() * (dlon / 2.0).sin().powi(2);

        2.0 * a.sqrt().atan2((1.0 - a).sqrt()) * EARTH_RADIUS_M
    }

    /// Get the signed perpendicular distance from this position to the track
    /// line running from `from` to `to`.
    ///
    /// The distance is positive when this position lies to the left (port)
    /// of the track direction, and negative to the right (starboard). Returns
    /// zero for a degenerate track (endpoints closer than a few centimetres).
    ///
    /// Units: meters
    pub fn cross_track_distance_m(&self, from: &Pos, to: &Pos) -> f64 {
        // Project the track end and this position into a local
        // east-north plane about the track start. Over the segment lengths
        // sailed between waypoints the equirectangular projection is ample.
        let track = from.local_en_m(to);
        let point = from.local_en_m(self);

        let track_len = track.norm();
        if track_len < 0.01 {
            return 0.0;
        }

        // Which side of the track we are on falls out of the cross product of
        // the track direction and the start->position vector. The z component
        // is positive for a position to the left of the track, and its
        // magnitude over the track length is the perpendicular distance.
        let cross = Vector3::new(track[0], track[1], 0.0)
            .cross(&Vector3::new(point[0], point[1], 0.0));

        cross[2] / track_len
    }

    /// Project another position into an east-north plane centred on self.
    ///
    /// Units: meters, x east, y north
    fn local_en_m(&self, other: &Pos) -> Vector2<f64> {
        Vector2::new(
            (other.lon_deg - self.lon_deg).to_radians()
                * self.lat_deg.to_radians().cos()
                * EARTH_RADIUS_M,
            (other.lat_deg - self.lat_deg).to_radians() * EARTH_RADIUS_M
        )
    }
}

impl Target {
    /// Returns true if this target is a geographic waypoint.
    pub fn is_waypoint(&self) -> bool {
        matches!(self, Target::Waypoint { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bearing_to_cardinals() {
        let origin = Pos { lat_deg: 50.0, lon_deg: -1.0 };
        let north = Pos { lat_deg: 50.1, lon_deg: -1.0 };
        let south = Pos { lat_deg: 49.9, lon_deg: -1.0 };
        let east = Pos { lat_deg: 50.0, lon_deg: -0.9 };
        let west = Pos { lat_deg: 50.0, lon_deg: -1.1 };

        assert!((origin.bearing_to_deg(&north) - 0.0).abs() < 0.1);
        assert!((origin.bearing_to_deg(&south) - 180.0).abs() < 0.1);
        assert!((origin.bearing_to_deg(&east) - 90.0).abs() < 0.5);
        assert!((origin.bearing_to_deg(&west) - 270.0).abs() < 0.5);
    }

    #[test]
    fn test_distance() {
        let a = Pos { lat_deg: 0.0, lon_deg: 0.0 };
        let b = Pos { lat_deg: 1.0, lon_deg: 0.0 };

        // One degree of latitude is about 111.2 km
        let d = a.distance_m(&b);
        assert!((d - 111_195.0).abs() < 100.0);

        assert_eq!(a.distance_m(&a), 0.0);
    }

    #[test]
    fn test_cross_track_sign() {
        // Track running due north along the meridian
        let from = Pos { lat_deg: 0.0, lon_deg: 0.0 };
        let to = Pos { lat_deg: 0.1, lon_deg: 0.0 };

        // On the track line
        let on = Pos { lat_deg: 0.05, lon_deg: 0.0 };
        assert!(on.cross_track_distance_m(&from, &to).abs() < 0.01);

        // West of a northbound track is port, so positive
        let port = Pos { lat_deg: 0.05, lon_deg: -0.01 };
        let xte = port.cross_track_distance_m(&from, &to);
        assert!(xte > 0.0);
        // About 0.01 deg of longitude at the equator
        assert!((xte - 1_112.0).abs() < 5.0);

        // East of a northbound track is starboard, so negative
        let stbd = Pos { lat_deg: 0.05, lon_deg: 0.01 };
        assert!(stbd.cross_track_distance_m(&from, &to) < 0.0);
    }

    #[test]
    fn test_cross_track_degenerate() {
        let p = Pos { lat_deg: 0.05, lon_deg: 0.01 };
        let from = Pos { lat_deg: 0.0, lon_deg: 0.0 };

        assert_eq!(p.cross_track_distance_m(&from, &from), 0.0);
    }
}
