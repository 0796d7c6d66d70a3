//! # Telecommand module
//!
//! This module defines the telecommands the helm accepts, either from the
//! ground station over the network or from a timed script. On the wire a TC
//! is a JSON object of the form `{"type": "...", "payload": {...}}`, with
//! the payload omitted for types which carry none.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Internal
use crate::nav::Target;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the helm by the ground station
/// or a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Install a new navigation target. The helm saves the current target as
    /// the previous one and resets the heading integrator.
    SetTarget(Target),

    /// Put the helm into safe mode, suppressing actuator demands.
    MakeSafe,

    /// Attempt to leave safe mode.
    MakeUnsafe,

    /// Shut the helm executable down cleanly.
    Shutdown
}

/// Response to a telecommand.
#[derive(Debug, Serialize, Deserialize)]
pub enum TcResponse {
    /// The TC was accepted and executed.
    Ok,

    /// The TC was recognised but cannot be executed in the current mode.
    CannotExecute,

    /// The TC could not be parsed.
    Invalid
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC is not valid JSON or has an unrecognised shape: {0}")]
    InvalidJson(serde_json::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Serialise this TC into a JSON packet
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nav::Pos;

    #[test]
    fn test_parse_set_target() {
        let tc = Tc::from_json(
            "{\"type\": \"SET_TARGET\", \
              \"payload\": {\"Bearing\": {\"bearing_deg\": 135.0}}}"
        ).unwrap();

        assert_eq!(
            tc,
            Tc::SetTarget(Target::Bearing { bearing_deg: 135.0 })
        );
    }

    #[test]
    fn test_parse_no_payload() {
        assert_eq!(
            Tc::from_json("{\"type\": \"SHUTDOWN\"}").unwrap(),
            Tc::Shutdown
        );
        assert_eq!(
            Tc::from_json("{\"type\": \"SAFE\"}").is_err(),
            true
        );
        assert_eq!(
            Tc::from_json("{\"type\": \"MAKE_SAFE\"}").unwrap(),
            Tc::MakeSafe
        );
    }

    #[test]
    fn test_round_trip() {
        let tc = Tc::SetTarget(Target::Waypoint {
            pos: Pos { lat_deg: 50.82, lon_deg: -1.31 }
        });

        let json = tc.to_json().unwrap();
        assert_eq!(Tc::from_json(&json).unwrap(), tc);
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(Tc::from_json("not json at all").is_err());
        assert!(Tc::from_json("{\"type\": \"FLY_TO_THE_MOON\"}").is_err());
        // SetTarget requires a payload
        assert!(Tc::from_json("{\"type\": \"SET_TARGET\"}").is_err());
    }
}
