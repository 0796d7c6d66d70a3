//! # Equipment module
//!
//! This module defines the data exchanged with the boat daemon: sensor
//! snapshots flowing in, and helm actuator demands flowing out.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod helm;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use helm::*;
