//! # Helm Equipment Data

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::nav::{Pos, Wind};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuator demands sent from the helm executable to the boat daemon.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct HelmDems {
    /// The demanded rudder angle, positive to starboard of centreline.
    ///
    /// Units: degrees
    pub rudder_angle_deg: f64,

    /// The demanded sail (sheet) angle from the centreline.
    ///
    /// Units: degrees
    pub sail_angle_deg: f64
}

/// One cycle's sensor snapshot returned by the boat daemon.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct BoatSensData {
    /// Time the snapshot was taken by the daemon.
    pub timestamp: DateTime<Utc>,

    /// The boat's current compass heading.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// The boat's current position.
    pub pos: Pos,

    /// The current wind observation.
    pub wind: Wind,

    /// The actual rudder angle reported by the rudder servo.
    ///
    /// Units: degrees
    pub rudder_angle_deg: f64
}

/// Request for a sensor snapshot, sent by the helm to the boat daemon.
#[derive(Serialize, Deserialize, Debug)]
pub struct SensRequest;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Response from the boat daemon to a set of helm demands.
#[derive(Serialize, Deserialize, Debug)]
pub enum HelmDemsResponse {
    /// Demands were valid and will be executed
    DemsOk,

    /// Demands were invalid and have been rejected
    DemsInvalid,

    /// Equipment is invalid so demands cannot be actuated
    EqptInvalid
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for HelmDems {
    /// The neutral demand: rudder centred, sail fully sheeted in.
    fn default() -> Self {
        Self {
            rudder_angle_deg: 0.0,
            sail_angle_deg: 0.0
        }
    }
}
