//! # Helm Executable Parameters
//!
//! This module provides parameters for the helm executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
pub struct HelmExecParams {
    /// Network endpoint for the boat daemon's actuator demands socket
    pub boat_dems_endpoint: String,

    /// Network endpoint for the boat daemon's sensor data socket
    pub boat_sens_endpoint: String,

    /// Network endpoint for the telecommand client
    pub tc_endpoint: String,

    /// Target period of one cycle of the executive.
    ///
    /// The heading integrator accumulates once per cycle, so this period
    /// directly scales the integral action and must be kept fixed.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Number of consecutive boat transport failures (sensor read or demand
    /// dispatch) tolerated before the executable exits with a fatal fault.
    pub max_consec_transport_errors: u64
}
