//! Implementations for the NavCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{
    controller::HeadingController,
    cross_track, recovery::HardoverWatchdog,
    sail_trim,
    tacking::{TackState, TackStateMachine},
    NavCtrlError, Params
};
use boat_if::{
    eqpt::{BoatSensData, HelmDems},
    nav::Target
};
use util::{
    maths::ang_delta_180,
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation control module state
#[derive(Default)]
pub struct NavCtrl {
    pub(crate) params: Params,

    /// The target currently being pursued. `None` until the first target is
    /// commanded, during which time no demands are produced.
    target: Option<Target>,

    /// The previously pursued target, the start of the current leg when both
    /// are waypoints.
    prev_target: Option<Target>,

    controller: HeadingController,
    tacking: TackStateMachine,
    watchdog: HardoverWatchdog,

    report: StatusReport
}

/// Input data to Navigation Control.
pub struct InputData {
    /// A new target to pursue, or `None` if the current target is kept this
    /// cycle.
    pub new_target: Option<Target>,

    /// This cycle's sensor snapshot from the boat.
    pub sens: BoatSensData,

    /// Session-elapsed time of this cycle.
    ///
    /// Units: seconds
    pub time_s: f64
}

/// Status report for NavCtrl processing.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct StatusReport {
    /// The effective target heading commanded this cycle, after any tacking
    /// diversion.
    ///
    /// Units: degrees
    pub target_heading_deg: f64,

    /// The error fed to the heading controller, including the cross-track
    /// term.
    ///
    /// Units: degrees
    pub heading_error_deg: f64,

    /// The scaled cross-track error term.
    pub cross_track_error_m: f64,

    /// Value of the heading error integrator after this cycle.
    pub integrator: f64,

    /// The tacking condition.
    pub tack_state: TackState,

    /// True while the emergency recovery maneuver is in progress.
    pub recovering: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            target_heading_deg: 0.0,
            heading_error_deg: 0.0,
            cross_track_error_m: 0.0,
            integrator: 0.0,
            tack_state: TackState::Unconstrained,
            recovering: false
        }
    }
}

impl State for NavCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = Option<HelmDems>;
    type StatusReport = StatusReport;
    type ProcError = NavCtrlError;

    /// Initialise the NavCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(e)
        };

        // Initialise the controller from the loaded gains
        self.controller = HeadingController::new(&self.params);

        Ok(())
    }

    /// Perform cyclic processing of Navigation Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        // Validate the snapshot before acting on it
        Self::validate_sens(&input_data.sens)?;

        // Install a new target if one was commanded this cycle
        if let Some(target) = input_data.new_target {
            self.set_target(target);
        }

        // With no target yet there is nothing to steer towards, so no
        // demands are produced
        let target = match self.target {
            Some(t) => t,
            None => return Ok((None, self.report))
        };

        let sens = &input_data.sens;

        // ---- DESIRED HEADING ----

        let desired_heading_deg = match target {
            Target::Bearing { bearing_deg } => bearing_deg,
            Target::Waypoint { pos } => sens.pos.bearing_to_deg(&pos)
        };

        // ---- CROSS TRACK CORRECTION ----

        let cross_track_error_m = cross_track::cross_track_error_m(
            &self.params,
            self.prev_target.as_ref(),
            self.target.as_ref(),
            &sens.pos
        );

        // ---- TACKING ----

        let target_heading_deg = self.tacking.update(
            &self.params,
            sens.wind.direction_deg,
            desired_heading_deg
        );

        // ---- HEADING CONTROL ----

        // Both terms are positive when a starboard turn is demanded, so they
        // sum compatibly
        let error_deg =
            ang_delta_180(sens.heading_deg, target_heading_deg) + cross_track_error_m;

        let mut rudder_dem_deg = self.controller.update(error_deg);

        // ---- HARDOVER WATCHDOG ----

        if let Some(recovery_dem_deg) = self.watchdog.step(
            &self.params,
            input_data.time_s,
            sens.heading_deg,
            sens.rudder_angle_deg,
            rudder_dem_deg
        ) {
            rudder_dem_deg = recovery_dem_deg;
        }

        // ---- SAIL TRIM ----

        let sail_angle_deg = sail_trim::sail_angle_deg(
            sail_trim::corrected_relative_wind_deg(sens.wind.relative_direction_deg)
        );

        // ---- OUTPUT ----

        self.report = StatusReport {
            target_heading_deg,
            heading_error_deg: error_deg,
            cross_track_error_m,
            integrator: self.controller.integrator(),
            tack_state: self.tacking.state(),
            recovering: self.watchdog.is_recovering()
        };

        trace!(
            "NavCtrl: heading {:.1}, wanted {:.1}, error {:.1}, integrator {:.1}, \
            rudder {:.1}, sail {:.1}",
            sens.heading_deg,
            target_heading_deg,
            error_deg,
            self.report.integrator,
            rudder_dem_deg,
            sail_angle_deg
        );

        Ok((
            Some(HelmDems {
                rudder_angle_deg: rudder_dem_deg,
                sail_angle_deg
            }),
            self.report
        ))
    }
}

impl NavCtrl {

    /// Create a NavCtrl directly from a parameter set, without a file load.
    ///
    /// Used by the simulation binary and tests; the executable initialises
    /// through `State::init` instead.
    pub fn with_params(params: Params) -> Self {
        let controller = HeadingController::new(&params);

        Self {
            params,
            controller,
            ..Self::default()
        }
    }

    /// Set the target for the boat.
    ///
    /// The current target becomes the previous one and the heading error
    /// integrator is reset, windup never carries over between targets.
    pub fn set_target(&mut self, target: Target) {
        self.prev_target = self.target.replace(target);
        self.controller.reset();
    }

    /// Get the target currently being pursued.
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Abort an in-progress emergency maneuver, used on shutdown requests.
    pub fn abort_recovery(&mut self, time_s: f64) {
        self.watchdog.abort(time_s);
    }

    /// Clear all transient control state.
    ///
    /// Called when the executive enters safe mode, so that stale integrator,
    /// tack, and watchdog state cannot act on resumption.
    pub fn make_safe(&mut self) {
        self.controller.reset();
        self.tacking.reset();
        self.watchdog.reset();
    }

    /// Check a sensor snapshot for non-finite values.
    fn validate_sens(sens: &BoatSensData) -> Result<(), NavCtrlError> {
        if !sens.heading_deg.is_finite() {
            return Err(NavCtrlError::NonFiniteSensData("heading_deg"));
        }
        if !sens.pos.lat_deg.is_finite() || !sens.pos.lon_deg.is_finite() {
            return Err(NavCtrlError::NonFiniteSensData("pos"));
        }
        if !sens.wind.direction_deg.is_finite()
            || !sens.wind.relative_direction_deg.is_finite()
        {
            return Err(NavCtrlError::NonFiniteSensData("wind"));
        }
        if !sens.rudder_angle_deg.is_finite() {
            return Err(NavCtrlError::NonFiniteSensData("rudder_angle_deg"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nav_ctrl::sail_trim::SAIL_ANGLE_BEAM_REACH_DEG;
    use boat_if::nav::{Pos, Wind};

    /// Build a sensor snapshot with the wind well away from the targets used
    /// in these tests.
    fn sens(heading_deg: f64) -> BoatSensData {
        BoatSensData {
            timestamp: chrono::Utc::now(),
            heading_deg,
            pos: Pos { lat_deg: 0.0, lon_deg: 0.0 },
            wind: Wind {
                direction_deg: 180.0,
                // Reads as a beam wind once the feed offset is applied
                relative_direction_deg: 270.0
            },
            rudder_angle_deg: 0.0
        }
    }

    fn input(new_target: Option<Target>, heading_deg: f64, time_s: f64) -> InputData {
        InputData {
            new_target,
            sens: sens(heading_deg),
            time_s
        }
    }

    #[test]
    fn test_no_target_no_demands() {
        let mut nav = NavCtrl::with_params(Params::default());

        let (dems, _) = nav.proc(&input(None, 0.0, 0.0)).unwrap();
        assert!(dems.is_none());
    }

    #[test]
    fn test_bearing_target_steering() {
        let mut nav = NavCtrl::with_params(Params::default());

        let (dems, report) = nav
            .proc(&input(
                Some(Target::Bearing { bearing_deg: 10.0 }),
                0.0,
                0.0
            ))
            .unwrap();

        let dems = dems.unwrap();

        // Target 10 degrees to starboard: error +10, rudder -k_p * 10
        assert_eq!(report.heading_error_deg, 10.0);
        assert_eq!(dems.rudder_angle_deg, -6.0);
        assert_eq!(dems.sail_angle_deg, SAIL_ANGLE_BEAM_REACH_DEG);
        assert_eq!(report.tack_state, TackState::Unconstrained);
    }

    #[test]
    fn test_new_target_resets_integrator() {
        let params = Params {
            k_i: 0.5,
            ..Params::default()
        };
        let mut nav = NavCtrl::with_params(params);

        // Accumulate some integrator on the first target
        nav.proc(&input(Some(Target::Bearing { bearing_deg: 20.0 }), 0.0, 0.0))
            .unwrap();
        let (_, report) = nav.proc(&input(None, 0.0, 0.25)).unwrap();
        assert_eq!(report.integrator, 40.0);

        // A new target starts from zero, the first cycle sees only its own
        // error
        let (_, report) = nav
            .proc(&input(
                Some(Target::Bearing { bearing_deg: 10.0 }),
                0.0,
                0.5
            ))
            .unwrap();
        assert_eq!(report.integrator, 10.0);
    }

    #[test]
    fn test_tacking_diverts_upwind_target() {
        let mut nav = NavCtrl::with_params(Params::default());

        let mut in_data = input(Some(Target::Bearing { bearing_deg: 5.0 }), 0.0, 0.0);
        in_data.sens.wind.direction_deg = 0.0;

        let (_, report) = nav.proc(&in_data).unwrap();

        // The upwind target is diverted to the cone edge, not sailed at
        assert_eq!(report.tack_state, TackState::TackRight);
        assert_eq!(report.target_heading_deg, 45.0);
    }

    #[test]
    fn test_waypoint_leg_cross_track() {
        let mut nav = NavCtrl::with_params(Params::default());

        // Install a northbound leg, then place the boat west (port) of it
        nav.set_target(Target::Waypoint {
            pos: Pos { lat_deg: 0.0, lon_deg: 0.0 }
        });
        nav.set_target(Target::Waypoint {
            pos: Pos { lat_deg: 0.1, lon_deg: 0.0 }
        });

        let mut in_data = input(None, 0.0, 0.0);
        in_data.sens.pos = Pos { lat_deg: 0.05, lon_deg: -0.001 };

        let (_, report) = nav.proc(&in_data).unwrap();

        // Port of the track adds a positive, starboard-steering term
        assert!(report.cross_track_error_m > 0.0);
        assert!(report.heading_error_deg > 0.0);
    }

    #[test]
    fn test_watchdog_override_in_pipeline() {
        // High gain so a modest error saturates the rudder demand
        let params = Params {
            k_p: 100.0,
            ..Params::default()
        };
        let mut nav = NavCtrl::with_params(params);

        // Heading 90, target 180, wind abeam: error +90, demand pinned at
        // -180
        let mut time_s = 0.0;
        let mut in_data = input(
            Some(Target::Bearing { bearing_deg: 180.0 }),
            90.0,
            time_s
        );
        in_data.sens.wind.direction_deg = 0.0;
        nav.proc(&in_data).unwrap();

        // Hold the saturated demand past the hardover timeout
        let mut report = nav.report;
        let mut dems = None;
        while time_s < 21.0 {
            time_s += 0.25;
            let mut in_data = input(None, 90.0, time_s);
            in_data.sens.wind.direction_deg = 0.0;
            in_data.sens.rudder_angle_deg = -40.0;
            let (d, r) = nav.proc(&in_data).unwrap();
            dems = d;
            report = r;
        }

        // The watchdog has taken over, opposing the negative rudder position
        assert!(report.recovering);
        assert_eq!(dems.unwrap().rudder_angle_deg, 45.0);
    }

    #[test]
    fn test_non_finite_sens_rejected() {
        let mut nav = NavCtrl::with_params(Params::default());

        let mut in_data = input(Some(Target::Bearing { bearing_deg: 10.0 }), 0.0, 0.0);
        in_data.sens.heading_deg = f64::NAN;

        assert!(nav.proc(&in_data).is_err());
    }
}
