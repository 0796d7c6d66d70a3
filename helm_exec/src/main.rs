//! Main helm-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Sensor acquisition from the boat daemon
//!         - Telecommand processing and handling
//!         - Navigation control processing:
//!             - Target heading resolution and tacking
//!             - Heading PI control and hardover watchdog
//!             - Sail trim
//!         - Actuator demand dispatch
//!
//! The loop runs at a fixed, configurable cycle period. Boat transport
//! failures (sensor reads or demand dispatches) skip the affected part of
//! the cycle and are retried next cycle; after a configured number of
//! consecutive failures the executable exits with a fatal fault.
//!
//! # Modules
//!
//! All modules (e.g. `nav_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use boat_if::{
    eqpt::{HelmDems, HelmDemsResponse},
    tc::{Tc, TcResponse}
};
use helm_lib::{
    boat_client::BoatClient,
    data_store::{DataStore, SafeModeCause},
    nav_ctrl::InputData,
    params::HelmExecParams,
    tc_client::{TcClient, TcClientError},
    tc_processor
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report
};
use log::{error, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Helm executable - closed loop navigation control for the boat.
#[derive(StructOpt)]
#[structopt(name = "helm_exec")]
struct CliArgs {
    /// Path to a helm script to execute instead of remote control.
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    None,
    Remote(TcClient),
    Script(ScriptInterpreter)
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    let args = CliArgs::from_args();

    // Initialise session
    let session = Session::new(
        "helm_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Helm Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: HelmExecParams = util::params::load(
        "helm_exec.toml"
    ).wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    let cycle_frequency_hz = 1.0 / exec_params.cycle_period_s;

    // ---- INITIALISE TC SOURCE ----

    // TC source is used to determine whether we're getting TCs from a script
    // or from the ground.
    let mut tc_source = match args.script {
        Some(ref script_path) => {

            info!("Loading script from {:?}", script_path);

            // Load the script interpreter
            let si = ScriptInterpreter::new(script_path)
                .wrap_err("Failed to load script")?;

            // Display some info
            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            TcSource::Script(si)
        }
        None => {
            info!("No script provided, remote control via the TcClient will be used\n");
            TcSource::None
        }
    };

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.nav_ctrl.init("nav_ctrl.toml", &session)
        .wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = boat_if::net::zmq::Context::new();

    if matches!(tc_source, TcSource::None) {
        tc_source = TcSource::Remote(
            TcClient::new(&zmq_ctx, &exec_params)
                .wrap_err("Failed to initialise the TcClient")?
        );
        info!("TcClient initialised");
    }

    let mut boat_client = BoatClient::new(&zmq_ctx, &exec_params)
        .wrap_err("Failed to initialise the BoatClient")?;
    info!("BoatClient initialised");

    info!("Network initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz);

        // Tracks whether any boat transport exchange failed this cycle
        let mut transport_failed = false;

        // ---- SENSOR ACQUISITION ----

        match boat_client.read_sensors() {
            Ok(sens) => ds.boat_sens = Some(sens),
            Err(e) => {
                warn!("Could not read sensors from the boat: {}", e);
                transport_failed = true;
            }
        }

        // ---- TELECOMMAND PROCESSING ----

        // Branch depending on the source
        match tc_source {
            // If no source no point in continuing so break
            TcSource::None => raise_error!("No TC source present"),

            TcSource::Remote(ref client) => {
                // If the client is connected remove any safe mode, otherwise make safe
                if client.is_connected() {
                    ds.make_unsafe(SafeModeCause::TcClientNotConnected).ok();
                }
                else {
                    ds.make_safe(SafeModeCause::TcClientNotConnected);
                }

                // Get commands until none remain
                loop {
                    match client.recieve_tc() {
                        Ok(Some(tc)) => {
                            // Branch based on safe mode. If we are in safe mode we need to send the
                            // cannot execute response and should not process the TC, unless it is
                            // the make unsafe or shutdown TC
                            let response_result = match ds.safe {
                                true => {
                                    match tc {
                                        Tc::MakeUnsafe | Tc::Shutdown => {
                                            tc_processor::exec(&mut ds, &tc);
                                            client.send_response(TcResponse::Ok)
                                        }
                                        _ =>
                                            client.send_response(TcResponse::CannotExecute)
                                    }
                                }
                                false => {
                                    // Process the TC
                                    tc_processor::exec(&mut ds, &tc);

                                    // Send response
                                    client.send_response(TcResponse::Ok)
                                }
                            };

                            // Print warning if couldn't send the response
                            match response_result {
                                Ok(_) => (),
                                Err(e) => warn!("Could not respond to TC: {}", e)
                            }
                        }
                        Ok(None) => {
                            break
                        }
                        // If not connected go into safe mode
                        Err(TcClientError::NotConnected) => {
                            if !ds.safe {
                                error!("Connection to the ground station lost");
                            }

                            ds.make_safe(SafeModeCause::TcClientNotConnected);
                            break;
                        }
                        Err(TcClientError::TcParseError(e)) => {
                            warn!("Could not parse recieved TC: {}", e);
                            break;
                        }
                        Err(e) => return Err(e)
                            .wrap_err("An error occured while receiving TCs from the ground station")
                    }
                }
            }

            TcSource::Script(ref mut si) =>
                match si.get_pending_tcs() {
                    PendingTcs::None => (),
                    PendingTcs::Some(tc_vec) => {
                        for tc in tc_vec.iter() {
                            tc_processor::exec(&mut ds, tc);
                        }
                    }
                    // Request shutdown if end of script reached
                    PendingTcs::EndOfScript => {
                        info!("End of TC script reached, stopping");
                        ds.shutdown_requested = true;
                    }
                }
        };

        // ---- SHUTDOWN HANDLING ----

        if ds.shutdown_requested {
            info!("Shutdown requested");

            // Abort any in-progress emergency maneuver and put the helm over
            // to neutral, best effort
            ds.nav_ctrl.abort_recovery(ds.time_s);
            if let Err(e) = boat_client.send_demands(&HelmDems::default()) {
                warn!("Could not send neutral demands during shutdown: {}", e);
            }

            break;
        }

        // ---- NAVIGATION PROCESSING ----

        if !ds.safe {
            if let Some(sens) = ds.boat_sens {
                let input = InputData {
                    new_target: ds.new_target.take(),
                    sens,
                    time_s: ds.time_s
                };

                match ds.nav_ctrl.proc(&input) {
                    Ok((output, report)) => {
                        ds.nav_ctrl_output = output;
                        ds.nav_ctrl_status_rpt = report;
                    }
                    Err(e) => {
                        // Bad sensor data is handled like any other transport
                        // fault: skip the cycle and retry
                        warn!("Error during NavCtrl processing: {}", e);
                        transport_failed = true;
                    }
                }
            }
        }

        // ---- DEMAND DISPATCH ----

        // While safe the helm is held at neutral; with no target yet there
        // are no demands at all
        let dems = match ds.safe {
            true => Some(HelmDems::default()),
            false => ds.nav_ctrl_output
        };

        if let Some(ref dems) = dems {
            match boat_client.send_demands(dems) {
                Ok(HelmDemsResponse::DemsOk) => (),
                Ok(r) => warn!(
                    "Recieved non-nominal response from the boat daemon: {:?}",
                    r
                ),
                Err(e) => {
                    warn!("Could not send demands to the boat: {}", e);
                    transport_failed = true;
                }
            }
        }

        // ---- FAULT ESCALATION ----

        if transport_failed {
            ds.num_consec_transport_errors += 1;

            if ds.num_consec_transport_errors >= exec_params.max_consec_transport_errors {
                return Err(eyre!(
                    "{} consecutive boat transport failures, giving up",
                    ds.num_consec_transport_errors
                ));
            }
        }
        else {
            ds.num_consec_transport_errors = 0;
        }

        // ---- TELEMETRY ----

        if ds.is_1_hz_cycle {
            session.save("nav_ctrl/status_report.json", ds.nav_ctrl_status_rpt);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(exec_params.cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - exec_params.cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    session.exit();

    Ok(())
}
