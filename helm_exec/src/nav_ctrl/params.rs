//! Navigation control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for navigation control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    // ---- FEATURES ----

    /// Enables the tacking state machine. With tacking disabled the helm
    /// will command headings inside the no-go cone.
    pub enable_tacking: bool,

    /// Enables the cross-track correction term when sailing between two
    /// waypoints.
    pub enable_cross_track_minimization: bool,

    /// Enables the hardover watchdog and its emergency recovery maneuver.
    pub enable_emergency_maneuver: bool,

    // ---- HEADING CONTROLLER ----

    /// Heading controller proportional gain
    pub k_p: f64,

    /// Heading controller integral gain
    pub k_i: f64,

    /// Limit on the magnitude of the heading error integrator
    pub integrator_max: f64,

    // ---- TACKING ----

    /// Half-angle of the no-go cone around the wind direction.
    ///
    /// Units: degrees
    pub cone_angle_deg: f64,

    /// Offset from the wind direction sailed while tacking.
    ///
    /// Units: degrees
    pub tacking_angle_deg: f64,

    // ---- CROSS TRACK ----

    /// Scale applied to the cross-track distance before it is summed into
    /// the heading error.
    ///
    /// Units: degrees/meter
    pub cross_track_gain: f64,

    // ---- EMERGENCY MANEUVER ----

    /// Rudder demand magnitude at or above which the rudder is considered
    /// hard over.
    ///
    /// Units: degrees
    pub hardover_rudder_threshold_deg: f64,

    /// How long the rudder demand may stay hard over before the recovery
    /// maneuver is triggered.
    ///
    /// Units: seconds
    pub hardover_rudder_timeout_s: f64,

    /// Rudder magnitude commanded during a recovery maneuver.
    ///
    /// Units: degrees
    pub recovery_rudder_deg: f64,

    /// Maximum duration of a recovery maneuver.
    ///
    /// Units: seconds
    pub recovery_timeout_s: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    /// Documented default tuning, matching `params/nav_ctrl.toml`.
    fn default() -> Self {
        Self {
            enable_tacking: true,
            enable_cross_track_minimization: true,
            enable_emergency_maneuver: true,
            k_p: 0.6,
            k_i: 0.0,
            integrator_max: 200.0,
            cone_angle_deg: 15.0,
            tacking_angle_deg: 45.0,
            cross_track_gain: 1.0,
            hardover_rudder_threshold_deg: 40.0,
            hardover_rudder_timeout_s: 20.0,
            recovery_rudder_deg: 45.0,
            recovery_timeout_s: 10.0
        }
    }
}
