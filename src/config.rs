//! Client configuration.
//!
//! The daemon is always reached at the same well-known name, object path and
//! interface. Only the bus it lives on can vary: the daemon ships in a system
//! flavour and a per-user session flavour.

use std::fmt;
use std::time::Duration;

/// Well-known bus name of the yum daemon.
pub const SERVICE_NAME: &str = "org.baseurl.Yum";

/// Object path the daemon exports its interface at.
pub const OBJECT_PATH: &str = "/";

/// Interface carrying the daemon's methods.
pub const INTERFACE_NAME: &str = "org.baseurl.Yum.Interface";

/// Timeout applied to every method call on the daemon.
pub const CALL_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Which message bus to connect to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BusKind {
    #[default]
    System,
    Session,
    /// An explicit D-Bus address, e.g. `unix:path=/run/dbus/system_bus_socket`.
    Address(String),
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusKind::System => f.write_str("system bus"),
            BusKind::Session => f.write_str("session bus"),
            BusKind::Address(address) => write!(f, "bus at {address}"),
        }
    }
}

/// The (service, object path, interface) triple a proxy binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub service: String,
    pub path: String,
    pub interface: String,
}

impl Default for ServiceTarget {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            path: OBJECT_PATH.to_string(),
            interface: INTERFACE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub bus: BusKind,
    pub target: ServiceTarget,
    pub call_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bus: BusKind::default(),
            target: ServiceTarget::default(),
            call_timeout: CALL_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_bus(bus: BusKind) -> Self {
        Self {
            bus,
            ..Self::default()
        }
    }
}
