//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use boat_if::{
    eqpt::{BoatSensData, HelmDems},
    nav::Target
};
use log::{info, warn};

use crate::nav_ctrl;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the helm has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
    TcClientNotConnected
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time of this cycle
    pub time_s: f64,

    // Safe mode variables
    /// Determines if the helm is in safe mode.
    pub safe: bool,

    /// Gives the reason for the helm being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Sensors
    /// This cycle's sensor snapshot, `None` if the read failed.
    pub boat_sens: Option<BoatSensData>,

    // NavCtrl
    pub nav_ctrl: nav_ctrl::NavCtrl,

    /// A new target commanded this cycle, consumed by NavCtrl processing.
    pub new_target: Option<Target>,

    pub nav_ctrl_output: Option<HelmDems>,
    pub nav_ctrl_status_rpt: nav_ctrl::StatusReport,

    // Shutdown
    /// Set once a Shutdown TC has been recieved; the main loop exits at the
    /// next opportunity.
    pub shutdown_requested: bool,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of consecutive boat transport errors
    pub num_consec_transport_errors: u64
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the helm into safe mode with the given cause.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);

            // Make nav_ctrl safe
            self.nav_ctrl.make_safe();
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) => {
                if cause == root_cause {
                    self.safe = false;
                    self.safe_cause = None;
                    info!("Make unsafe requested, root cause match, safe mode disabled");
                    Ok(())
                } else {
                    Err(())
                }
            }
            None => Ok(())
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.boat_sens = None;
        self.nav_ctrl_output = None;
        self.nav_ctrl_status_rpt = nav_ctrl::StatusReport::default();

        self.time_s = util::session::get_elapsed_seconds();
    }
}
