//! # Navigation control module
//!
//! Navigation control is responsible for steering the boat towards the
//! current target, which is either a fixed compass bearing or a geographic
//! waypoint. It does this with a PI controller operating on the heading
//! error, supported by three pieces of sailing-specific logic:
//!
//! - A tacking state machine which diverts the commanded heading out of the
//!   no-go cone around the wind direction, since a boat cannot sail directly
//!   upwind. The machine commits to one side of the cone and holds it to
//!   avoid oscillating between tacks.
//! - A cross-track corrector which, when sailing between two waypoints, adds
//!   the lateral deviation from the track line into the heading error so the
//!   boat closes back onto the planned leg rather than just the endpoint.
//! - A hardover watchdog which detects a rudder demand pinned at saturation
//!   for too long (the boat is stuck unable to make the turn) and runs a
//!   cross-cycle recovery maneuver to snap the boat round the other way.
//!
//! Sail trim is a separate discrete lookup from the relative wind direction
//! to one of the five points of sail.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod controller;
pub mod cross_track;
pub mod params;
pub mod recovery;
pub mod sail_trim;
pub mod state;
pub mod tacking;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use controller::*;
pub use params::Params;
pub use state::*;
pub use tacking::TackState;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during NavCtrl processing.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    /// The sensor snapshot contained a non-finite value. The caller should
    /// treat this like any other transport fault: skip the cycle and retry.
    #[error("Recieved non-finite sensor data in field {0}")]
    NonFiniteSensData(&'static str),
}
