//! # Hardover watchdog and emergency recovery maneuver
//!
//! If the rudder demand sits at saturation for a long time the boat is stuck
//! trying to make a turn it cannot complete, usually pinned head to wind.
//! The watchdog detects this and runs a recovery maneuver: slam the rudder
//! the opposite way and hold it until the boat has swung most of the way
//! round, or a timeout expires.
//!
//! The maneuver is a sub-state stepped once per cycle, never a blocking
//! wait, so the executive keeps its cycle rate and can abort the maneuver on
//! a shutdown request.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};

// Internal
use util::maths::ang_delta_180;

use super::Params;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Heading rotation from the start of a recovery maneuver which completes it
/// early.
///
/// Units: degrees
pub const RECOVERY_HEADING_DELTA_DEG: f64 = 170.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An in-progress recovery maneuver.
#[derive(Debug, Copy, Clone)]
struct Recovery {
    /// Time the maneuver started.
    ///
    /// Units: seconds, session elapsed
    start_time_s: f64,

    /// Heading when the maneuver started.
    ///
    /// Units: degrees
    start_heading_deg: f64,

    /// The rudder demand held for the duration of the maneuver.
    ///
    /// Units: degrees
    rudder_dem_deg: f64
}

/// Watchdog over rudder demand saturation.
#[derive(Debug, Default)]
pub struct HardoverWatchdog {
    /// Last time the rudder demand was observed below the hardover
    /// threshold. `None` until the first observation, so that a saturation
    /// episode cannot be inferred before one has actually been watched.
    last_unsaturated_time_s: Option<f64>,

    /// The active recovery maneuver, if any.
    recovery: Option<Recovery>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HardoverWatchdog {

    /// Returns true if a recovery maneuver is in progress.
    pub fn is_recovering(&self) -> bool {
        self.recovery.is_some()
    }

    /// Step the watchdog for this cycle.
    ///
    /// `rudder_dem_deg` is the demand just computed by the heading
    /// controller, `rudder_angle_deg` the actual rudder position reported by
    /// the boat. Returns the overriding rudder demand while a recovery
    /// maneuver is in progress, or `None` to let the controller demand
    /// stand.
    pub fn step(
        &mut self,
        params: &Params,
        time_s: f64,
        heading_deg: f64,
        rudder_angle_deg: f64,
        rudder_dem_deg: f64
    ) -> Option<f64> {
        if !params.enable_emergency_maneuver {
            self.reset();
            return None;
        }

        // Progress an active maneuver
        if let Some(recovery) = self.recovery {
            let swung_round = ang_delta_180(recovery.start_heading_deg, heading_deg)
                .abs()
                >= RECOVERY_HEADING_DELTA_DEG;
            let timed_out = time_s - recovery.start_time_s >= params.recovery_timeout_s;

            if swung_round || timed_out {
                info!(
                    "Emergency maneuver complete ({})",
                    if swung_round { "heading swung round" } else { "timed out" }
                );

                // The saturation episode is over, start a fresh watch window
                self.recovery = None;
                self.last_unsaturated_time_s = Some(time_s);

                return None;
            }

            return Some(recovery.rudder_dem_deg);
        }

        // Normal monitoring
        if rudder_dem_deg.abs() < params.hardover_rudder_threshold_deg {
            self.last_unsaturated_time_s = Some(time_s);
            return None;
        }

        let last_unsaturated_s = match self.last_unsaturated_time_s {
            Some(t) => t,
            // First observation of this execution, start the window here
            None => {
                self.last_unsaturated_time_s = Some(time_s);
                return None;
            }
        };

        if time_s - last_unsaturated_s > params.hardover_rudder_timeout_s {
            // The rudder has been hard over for too long, snap the boat out
            // of it by slamming the rudder the opposite way to its current
            // position
            let rudder_dem_deg = if rudder_angle_deg > 0.0 {
                -params.recovery_rudder_deg
            }
            else {
                params.recovery_rudder_deg
            };

            warn!(
                "Rudder hard over for more than {} s, starting emergency \
                maneuver with rudder demand {} deg",
                params.hardover_rudder_timeout_s, rudder_dem_deg
            );

            self.recovery = Some(Recovery {
                start_time_s: time_s,
                start_heading_deg: heading_deg,
                rudder_dem_deg
            });

            return Some(rudder_dem_deg);
        }

        None
    }

    /// Abort any active recovery maneuver, returning control to the heading
    /// controller on the next cycle.
    pub fn abort(&mut self, time_s: f64) {
        if self.recovery.take().is_some() {
            info!("Emergency maneuver aborted");
            self.last_unsaturated_time_s = Some(time_s);
        }
    }

    /// Reset the watchdog completely, clearing the watch window.
    pub fn reset(&mut self) {
        self.recovery = None;
        self.last_unsaturated_time_s = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Step the watchdog with a saturated demand at one second intervals
    /// until `end_s`, asserting no recovery is triggered on the way.
    fn run_saturated(
        wd: &mut HardoverWatchdog,
        params: &Params,
        start_s: u64,
        end_s: u64
    ) {
        for t in start_s..=end_s {
            let out = wd.step(params, t as f64, 100.0, 150.0, 180.0);
            assert!(out.is_none(), "unexpected recovery at t = {}", t);
        }
    }

    #[test]
    fn test_triggers_after_timeout() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        // Window opens at the first observation, then 20 s of saturation
        // pass without a trigger
        run_saturated(&mut wd, &params, 0, 20);

        // Just past the timeout the maneuver starts, opposing the positive
        // rudder position
        let out = wd.step(&params, 21.0, 100.0, 150.0, 180.0);
        assert_eq!(out, Some(-45.0));
        assert!(wd.is_recovering());
    }

    #[test]
    fn test_unsaturated_demand_refreshes_window() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        run_saturated(&mut wd, &params, 0, 15);

        // A single unsaturated demand resets the window
        assert!(wd.step(&params, 16.0, 100.0, 10.0, 20.0).is_none());

        // Another 20 s of saturation are needed before a trigger
        run_saturated(&mut wd, &params, 17, 36);
        assert!(wd.step(&params, 37.0, 100.0, 150.0, 180.0).is_some());
    }

    #[test]
    fn test_not_retriggered_during_recovery() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        run_saturated(&mut wd, &params, 0, 20);
        let dem = wd.step(&params, 21.0, 100.0, 150.0, 180.0);
        assert!(dem.is_some());

        // While the maneuver runs the same demand is held, no new maneuver
        // is started
        for t in 22..30 {
            assert_eq!(
                wd.step(&params, t as f64, 100.0, 150.0, 180.0),
                dem
            );
        }
    }

    #[test]
    fn test_completes_on_heading_swing() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        run_saturated(&mut wd, &params, 0, 20);
        assert!(wd.step(&params, 21.0, 100.0, 150.0, 180.0).is_some());

        // The boat comes round 170 degrees: maneuver complete, window
        // refreshed, control handed back
        assert!(wd.step(&params, 22.0, 270.0, 150.0, 180.0).is_none());
        assert!(!wd.is_recovering());

        // And a saturated demand straight after does not retrigger at once
        assert!(wd.step(&params, 23.0, 270.0, 150.0, 180.0).is_none());
    }

    #[test]
    fn test_completes_on_timeout() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        run_saturated(&mut wd, &params, 0, 20);
        assert!(wd.step(&params, 21.0, 100.0, 150.0, 180.0).is_some());

        // Heading barely moves, but the 10 s maneuver timeout expires
        assert!(wd.step(&params, 25.0, 105.0, 150.0, 180.0).is_some());
        assert!(wd.step(&params, 31.5, 110.0, 150.0, 180.0).is_none());
        assert!(!wd.is_recovering());
    }

    #[test]
    fn test_opposes_negative_rudder() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        for t in 0..=20 {
            wd.step(&params, t as f64, 100.0, -150.0, -180.0);
        }

        assert_eq!(
            wd.step(&params, 21.0, 100.0, -150.0, -180.0),
            Some(45.0)
        );
    }

    #[test]
    fn test_abort_cancels_maneuver() {
        let params = Params::default();
        let mut wd = HardoverWatchdog::default();

        run_saturated(&mut wd, &params, 0, 20);
        assert!(wd.step(&params, 21.0, 100.0, 150.0, 180.0).is_some());

        wd.abort(22.0);
        assert!(!wd.is_recovering());
        assert!(wd.step(&params, 23.0, 100.0, 10.0, 20.0).is_none());
    }

    #[test]
    fn test_disabled() {
        let params = Params {
            enable_emergency_maneuver: false,
            ..Params::default()
        };
        let mut wd = HardoverWatchdog::default();

        for t in 0..60 {
            assert!(wd.step(&params, t as f64, 100.0, 150.0, 180.0).is_none());
        }
    }
}
