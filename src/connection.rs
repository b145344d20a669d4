//! The session to the message bus.

use std::time::Duration;

use tracing::{debug, info};
use zbus::blocking::{connection, Connection};

use crate::config::{BusKind, ClientConfig};
use crate::error::ConnectError;

/// A live, exclusively owned session to the message bus.
///
/// The session is closed when this value is dropped. Every method call made
/// over it times out after [`BusConnection::call_timeout`].
#[derive(Debug)]
pub struct BusConnection {
    connection: Connection,
    bus: BusKind,
    call_timeout: Duration,
}

impl BusConnection {
    /// Open a session to the bus named in `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, ConnectError> {
        let bus = config.bus.clone();
        let connection = Self::builder(&bus)
            .map(|builder| builder.method_timeout(config.call_timeout))
            .and_then(|builder| builder.build())
            .map_err(|source| ConnectError {
                bus: bus.clone(),
                source,
            })?;

        info!(
            bus = %bus,
            unique_name = ?connection.unique_name().map(|name| name.as_str()),
            "Connected to message bus"
        );

        Ok(Self {
            connection,
            bus,
            call_timeout: config.call_timeout,
        })
    }

    fn builder(bus: &BusKind) -> zbus::Result<connection::Builder<'static>> {
        match bus {
            BusKind::System => connection::Builder::system(),
            BusKind::Session => connection::Builder::session(),
            BusKind::Address(address) => connection::Builder::address(address.as_str()),
        }
    }

    pub fn bus(&self) -> &BusKind {
        &self.bus
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub(crate) fn inner(&self) -> &Connection {
        &self.connection
    }
}

impl Drop for BusConnection {
    fn drop(&mut self) {
        debug!(bus = %self.bus, "Releasing bus connection");
    }
}
