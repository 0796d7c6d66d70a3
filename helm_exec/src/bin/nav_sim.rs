//! # Navigation Simulation
//!
//! This binary allows the navigation controller to be run without the boat
//! daemon or a physical vessel. A trivial kinematic boat model closes the
//! loop, and a timed target queue stands in for the mission system. It is
//! designed to allow quick and easy development of the controller itself.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    thread,
    time::{Duration, Instant}
};

use chrono::Utc;
use color_eyre::{eyre::WrapErr, Result};
use log::{info, warn};
use structopt::StructOpt;

use boat_if::{
    eqpt::{BoatSensData, HelmDems},
    nav::{Pos, Target, Wind, EARTH_RADIUS_M}
};
use helm_lib::{
    guidance::{TargetSelector, TimedTarget, TimedTargets},
    nav_ctrl::{InputData, NavCtrl, Params}
};
use util::{
    logger::{logger_init, LevelFilter},
    maths::wrap_360,
    module::State as _,
    session::{self, Session}
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.25;

/// Boat speed through the water in the kinematic model.
///
/// Units: meters/second
const SIM_BOAT_SPEED_MS: f64 = 2.0;

/// Heading rate produced per degree of rudder deflection.
///
/// Units: (degrees/second)/degree
const SIM_TURN_RATE_PER_RUDDER_DEG: f64 = 0.1;

/// Wind direction in the simulated world.
///
/// Units: degrees, compass
const SIM_WIND_DIRECTION_DEG: f64 = 270.0;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Navigation simulation - run the navigation controller against a kinematic
/// boat model.
#[derive(StructOpt)]
#[structopt(name = "nav_sim")]
struct CliArgs {
    /// Duration to run the simulation for, in seconds.
    #[structopt(long, default_value = "120")]
    duration_s: f64
}

/// The simulated boat.
struct SimBoat {
    pos: Pos,
    heading_deg: f64,
    rudder_angle_deg: f64
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    let args = CliArgs::from_args();

    // Initialise session
    let session = Session::new("nav_sim", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Navigation Simulation\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- MODULE INIT ----

    let mut nav_ctrl = NavCtrl::with_params(Params::default());

    // Mission: hold a bearing first, then sail a two-waypoint leg which
    // finishes upwind so the tacking machine gets exercised
    let mut guidance = TimedTargets::new(vec![
        TimedTarget {
            release_time_s: 0.0,
            target: Target::Bearing { bearing_deg: 45.0 }
        },
        TimedTarget {
            release_time_s: 30.0,
            target: Target::Waypoint {
                pos: Pos { lat_deg: 50.826, lon_deg: -1.306 }
            }
        },
        TimedTarget {
            release_time_s: 75.0,
            target: Target::Waypoint {
                pos: Pos { lat_deg: 50.826, lon_deg: -1.312 }
            }
        }
    ]);

    let mut boat = SimBoat {
        pos: Pos { lat_deg: 50.820, lon_deg: -1.310 },
        heading_deg: 0.0,
        rudder_angle_deg: 0.0
    };

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut num_cycles: u64 = 0;

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        let time_s = session::get_elapsed_seconds();

        if time_s >= args.duration_s {
            info!("Simulation duration reached, stopping");
            break;
        }

        // ---- GUIDANCE ----

        let new_target = guidance.check_new_target();

        // ---- NAVIGATION PROCESSING ----

        let input = InputData {
            new_target,
            sens: boat.sens(),
            time_s
        };

        match nav_ctrl.proc(&input) {
            Ok((Some(dems), report)) => {
                boat.step(&dems, CYCLE_PERIOD_S);

                // Log on the 1Hz
                if num_cycles % 4 == 0 {
                    info!(
                        "heading {:6.1} deg, wanted {:6.1} deg, rudder {:6.1} deg, \
                        sail {:4.1} deg{}",
                        boat.heading_deg,
                        report.target_heading_deg,
                        dems.rudder_angle_deg,
                        dems.sail_angle_deg,
                        if report.recovering { " [RECOVERING]" } else { "" }
                    );
                }
            }
            // No target installed yet
            Ok((None, _)) => (),
            Err(e) => warn!("Error during NavCtrl processing: {}", e)
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        if let Some(d) = Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            thread::sleep(d);
        }

        num_cycles += 1;
    }

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimBoat {
    /// Build the sensor snapshot the boat daemon would report.
    fn sens(&self) -> BoatSensData {
        BoatSensData {
            timestamp: Utc::now(),
            heading_deg: self.heading_deg,
            pos: self.pos,
            wind: Wind {
                direction_deg: SIM_WIND_DIRECTION_DEG,
                // The feed convention is shifted half a circle from
                // bow-relative, the sail trim lookup undoes it again
                relative_direction_deg: wrap_360(
                    SIM_WIND_DIRECTION_DEG - self.heading_deg + 180.0
                )
            },
            rudder_angle_deg: self.rudder_angle_deg
        }
    }

    /// Step the kinematics by one cycle with the given demands applied.
    fn step(&mut self, dems: &HelmDems, dt_s: f64) {
        self.rudder_angle_deg = dems.rudder_angle_deg;

        // Negative rudder turns the boat to starboard, heading increasing
        self.heading_deg = wrap_360(
            self.heading_deg
                - SIM_TURN_RATE_PER_RUDDER_DEG * self.rudder_angle_deg * dt_s
        );

        // Advance along the heading
        let dist_m = SIM_BOAT_SPEED_MS * dt_s;
        let heading_rad = self.heading_deg.to_radians();

        self.pos.lat_deg += (dist_m * heading_rad.cos() / EARTH_RADIUS_M).to_degrees();
        self.pos.lon_deg += (dist_m * heading_rad.sin()
            / (EARTH_RADIUS_M * self.pos.lat_deg.to_radians().cos()))
        .to_degrees();
    }
}
