//! # Boat Client
//!
//! This module provides networking abstractions to connect to the boat
//! daemon, which owns the vessel's sensors and actuators. Sensor reads and
//! demand dispatches are synchronous request/reply exchanges with bounded
//! timeouts, a failed exchange surfaces as an error for the executive to
//! handle rather than blocking the cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use boat_if::{
    eqpt::{BoatSensData, HelmDems, HelmDemsResponse, SensRequest},
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions}
};

use crate::params::HelmExecParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct BoatClient {
    dems_socket: MonitoredSocket,

    sens_socket: MonitoredSocket
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum BoatClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("The client is not connected to the boat daemon")]
    NotConnected,

    #[error("Could not send to the boat daemon: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a message from the boat daemon: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the data: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not deserialize the response from the boat daemon: {0}")]
    DeserializeError(serde_json::Error)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl BoatClient {
    /// Create a new instance of the boat client.
    pub fn new(
        ctx: &zmq::Context,
        params: &HelmExecParams
    ) -> Result<Self, BoatClientError> {
        // Create the socket options. Both sockets are request/reply with
        // short timeouts so a dead daemon costs at most a few tens of
        // milliseconds per cycle.
        let socket_options = SocketOptions {
            connect_timeout: 1000,
            heartbeat_ivl: 500,
            heartbeat_ttl: 1000,
            heartbeat_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            req_correlate: true,
            req_relaxed: true,
            ..Default::default()
        };
        let sens_socket_options = SocketOptions {
            connect_timeout: 1000,
            heartbeat_ivl: 500,
            heartbeat_ttl: 1000,
            heartbeat_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            req_correlate: true,
            req_relaxed: true,
            ..Default::default()
        };

        // Create the sockets
        let dems_socket = MonitoredSocket::new(
            ctx,
            zmq::REQ,
            socket_options,
            &params.boat_dems_endpoint
        )
        .map_err(BoatClientError::SocketError)?;
        let sens_socket = MonitoredSocket::new(
            ctx,
            zmq::REQ,
            sens_socket_options,
            &params.boat_sens_endpoint
        )
        .map_err(BoatClientError::SocketError)?;

        // Create self
        Ok(Self {
            dems_socket,
            sens_socket
        })
    }

    /// Read a sensor snapshot from the boat daemon.
    ///
    /// A full request/reply exchange is performed; if the daemon does not
    /// answer within the configured timeout an error is returned and the
    /// executive skips this cycle's control update.
    pub fn read_sensors(&mut self) -> Result<BoatSensData, BoatClientError> {
        // If not connected return now
        if !self.sens_socket.connected() {
            return Err(BoatClientError::NotConnected);
        }

        // Serialize and send the request
        let req_str = serde_json::to_string(&SensRequest)
            .map_err(BoatClientError::SerializationError)?;

        self.sens_socket
            .send(&req_str, 0)
            .map_err(BoatClientError::SendError)?;

        // Recieve the snapshot back from the daemon
        let msg = self
            .sens_socket
            .recv_msg(0)
            .map_err(BoatClientError::RecvError)?;

        serde_json::from_str(msg.as_str().unwrap_or(""))
            .map_err(BoatClientError::DeserializeError)
    }

    /// Send actuator demands to the boat daemon.
    ///
    /// If the daemon acknowledges the demands within the configured timeout
    /// the response is returned, otherwise an error.
    pub fn send_demands(
        &mut self,
        demands: &HelmDems
    ) -> Result<HelmDemsResponse, BoatClientError> {
        // If not connected return now
        if !self.dems_socket.connected() {
            return Err(BoatClientError::NotConnected);
        }

        // Serialize the demands
        let dems_str = serde_json::to_string(demands)
            .map_err(BoatClientError::SerializationError)?;

        // Send the demands to the daemon
        self.dems_socket
            .send(&dems_str, 0)
            .map_err(BoatClientError::SendError)?;

        // Recieve response back from the daemon
        let msg = self
            .dems_socket
            .recv_msg(0)
            .map_err(BoatClientError::RecvError)?;

        serde_json::from_str(msg.as_str().unwrap_or(""))
            .map_err(BoatClientError::DeserializeError)
    }
}
