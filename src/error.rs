//! Error types for the yum daemon client.

use std::io;

use thiserror::Error;
use zbus::DBusError;

use crate::config::BusKind;
use crate::lock::Release;

const TIMEOUT_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.NoReply",
    "org.freedesktop.DBus.Error.Timeout",
    "org.freedesktop.DBus.Error.TimedOut",
];

const DISCONNECT_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.Disconnected",
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
];

pub(crate) const FAILED: &str = "org.freedesktop.DBus.Error.Failed";
pub(crate) const INVALID_SIGNATURE: &str = "org.freedesktop.DBus.Error.InvalidSignature";

/// The bus could not be reached, or session negotiation failed.
#[derive(Error, Debug)]
#[error("failed to connect to the {bus}")]
pub struct ConnectError {
    pub bus: BusKind,
    #[source]
    pub source: zbus::Error,
}

/// The proxy could not be bound to the daemon.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("no process owns '{service}' on the bus; is the yum daemon running?")]
    NoOwner { service: String },

    #[error("failed to resolve the owner of '{service}'")]
    Resolve {
        service: String,
        #[source]
        source: zbus::fdo::Error,
    },

    #[error("binding to '{service}' at {path} ({interface}) was rejected")]
    Rejected {
        service: String,
        path: String,
        interface: String,
        #[source]
        source: zbus::Error,
    },
}

/// Daemon-specific error families, keyed by the D-Bus error name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The caller was refused by polkit.
    AccessDenied,
    /// The yum lock is held elsewhere.
    Locked,
    TransactionFailed,
    NotImplemented,
    Other,
}

/// An error reply from the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub name: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RemoteErrorKind {
        let suffix = self.name.rsplit('.').next().unwrap_or_default();
        match suffix {
            "AccessDeniedError" => RemoteErrorKind::AccessDenied,
            "YumLockedError" => RemoteErrorKind::Locked,
            "YumTransactionError" => RemoteErrorKind::TransactionFailed,
            "YumNotImplementedError" => RemoteErrorKind::NotImplemented,
            _ => RemoteErrorKind::Other,
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

/// Failure of a single method call on the daemon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("no reply from the daemon before the call timed out")]
    Timeout,

    #[error("daemon returned an error: {0}")]
    Remote(RemoteError),

    #[error("lost the bus connection to the daemon")]
    Disconnected,
}

impl RpcError {
    pub fn remote(name: impl Into<String>, message: impl Into<String>) -> Self {
        RpcError::Remote(RemoteError::new(name, message))
    }

    fn from_error_name(name: &str, message: String) -> Self {
        if TIMEOUT_ERRORS.contains(&name) {
            RpcError::Timeout
        } else if DISCONNECT_ERRORS.contains(&name) {
            RpcError::Disconnected
        } else {
            RpcError::remote(name, message)
        }
    }
}

impl From<zbus::Error> for RpcError {
    fn from(err: zbus::Error) -> Self {
        match err {
            zbus::Error::InputOutput(e) if e.kind() == io::ErrorKind::TimedOut => RpcError::Timeout,
            zbus::Error::InputOutput(_) => RpcError::Disconnected,
            zbus::Error::MethodError(name, detail, _) => {
                RpcError::from_error_name(name.as_str(), detail.unwrap_or_default())
            }
            zbus::Error::FDO(e) => {
                let message = e.description().unwrap_or_default().to_string();
                RpcError::from_error_name(&e.name().to_string(), message)
            }
            other => RpcError::remote(FAILED, other.to_string()),
        }
    }
}

/// Failure of the package query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("the yum lock is not held by this client")]
    LockNotHeld,

    /// The query call failed. `release` is the daemon's answer to the unlock
    /// issued after the failure.
    #[error("{error}")]
    Rpc {
        #[source]
        error: RpcError,
        release: Result<Release, RpcError>,
    },
}

/// Fatal errors that abort a run before any package output.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Bind(#[from] BindError),
}
