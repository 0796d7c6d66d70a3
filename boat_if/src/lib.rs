//! # Boat Interface
//!
//! This library defines the interface between the helm executable and the
//! boat daemon which owns the vessel's sensors and actuators, along with the
//! telecommand definitions shared with the ground station.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Equipment data - sensor snapshots and actuator demands
pub mod eqpt;

/// Navigation primitives - positions, wind, and targets
pub mod nav;

/// Networking abstractions over ZMQ
pub mod net;

/// Telecommand definitions and parsing
pub mod tc;
