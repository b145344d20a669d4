//! Client for the yum package daemon.
//!
//! Talks to `org.baseurl.Yum` over D-Bus: reads the daemon version, takes the
//! daemon's exclusive lock, looks packages up by name and releases the lock
//! again.
//!
//! ```no_run
//! use yumdbus::{run, ClientConfig};
//!
//! let report = run(&ClientConfig::default())?;
//! for package in report.packages.unwrap_or_default() {
//!     println!("{package}");
//! }
//! # Ok::<(), yumdbus::ClientError>(())
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod lock;
pub mod orchestrator;
pub mod package;
pub mod proxy;
mod zbus;

#[cfg(test)]
mod testing;

pub use config::{BusKind, ClientConfig, ServiceTarget};
pub use connection::BusConnection;
pub use error::{BindError, ClientError, ConnectError, QueryError, RemoteError, RemoteErrorKind, RpcError};
pub use lock::{LockOutcome, LockState, Release, YumLock};
pub use orchestrator::{run, RunReport, Workflow};
pub use package::{get_packages_by_name, get_version};
pub use proxy::{RpcCall, RpcChannel, ServiceProxy, Value, ValueType};
