//! Typed calls against the daemon's interface.
//!
//! [`ServiceProxy`] is the bus-backed implementation of [`RpcChannel`]; the
//! lock protocol and the queries only ever see the trait, so they work the
//! same against a scripted daemon in tests.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};
use zbus::blocking::fdo::DBusProxy;
use zbus::names::BusName;
use zbus::proxy::CacheProperties;

use crate::config::ServiceTarget;
use crate::connection::BusConnection;
use crate::error::{BindError, RpcError, INVALID_SIGNATURE};
use crate::zbus::YumDaemonProxyBlocking;

/// Shape of a value crossing the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int32,
    Bool,
    Str,
    StrList,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature = match self {
            ValueType::Int32 => "i",
            ValueType::Bool => "b",
            ValueType::Str => "s",
            ValueType::StrList => "as",
        };
        f.write_str(signature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int32(i32),
    Bool(bool),
    Str(String),
    StrList(Vec<String>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int32(_) => ValueType::Int32,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::Str,
            Value::StrList(_) => ValueType::StrList,
        }
    }

    pub fn into_i32(self) -> Result<i32, RpcError> {
        match self {
            Value::Int32(v) => Ok(v),
            other => Err(mismatch(ValueType::Int32, &other)),
        }
    }

    pub fn into_bool(self) -> Result<bool, RpcError> {
        match self {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch(ValueType::Bool, &other)),
        }
    }

    pub fn into_str_list(self) -> Result<Vec<String>, RpcError> {
        match self {
            Value::StrList(v) => Ok(v),
            other => Err(mismatch(ValueType::StrList, &other)),
        }
    }
}

fn mismatch(expected: ValueType, got: &Value) -> RpcError {
    RpcError::remote(
        INVALID_SIGNATURE,
        format!(
            "expected a reply of type '{expected}', got '{}'",
            got.value_type()
        ),
    )
}

/// One method call on the daemon: the method, its inputs in order, and the
/// type of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcCall<'a> {
    GetVersion,
    Lock,
    Unlock,
    GetPackagesByName { pattern: &'a str, use_newest: bool },
}

impl RpcCall<'_> {
    pub fn method(&self) -> &'static str {
        match self {
            RpcCall::GetVersion => "GetVersion",
            RpcCall::Lock => "Lock",
            RpcCall::Unlock => "Unlock",
            RpcCall::GetPackagesByName { .. } => "GetPackagesByName",
        }
    }

    pub fn inputs(&self) -> Vec<Value> {
        match *self {
            RpcCall::GetVersion | RpcCall::Lock | RpcCall::Unlock => Vec::new(),
            RpcCall::GetPackagesByName {
                pattern,
                use_newest,
            } => vec![Value::Str(pattern.to_string()), Value::Bool(use_newest)],
        }
    }

    pub fn output(&self) -> ValueType {
        match self {
            RpcCall::GetVersion => ValueType::Int32,
            RpcCall::Lock | RpcCall::Unlock => ValueType::Bool,
            RpcCall::GetPackagesByName { .. } => ValueType::StrList,
        }
    }
}

/// Something that can carry calls to the daemon.
///
/// Calls are synchronous: each blocks until the reply arrives or the call
/// fails.
pub trait RpcChannel {
    fn call(&self, call: &RpcCall<'_>) -> Result<Value, RpcError>;
}

impl<T: RpcChannel + ?Sized> RpcChannel for &T {
    fn call(&self, call: &RpcCall<'_>) -> Result<Value, RpcError> {
        (**self).call(call)
    }
}

/// A proxy bound to the daemon object on a live [`BusConnection`].
///
/// Borrows the connection, so it is always released before it.
pub struct ServiceProxy<'c> {
    connection: &'c BusConnection,
    target: ServiceTarget,
    owner: String,
    proxy: YumDaemonProxyBlocking<'static>,
}

impl<'c> ServiceProxy<'c> {
    /// Resolve the current owner of the daemon's well-known name and bind to
    /// its object.
    pub fn bind(connection: &'c BusConnection, target: &ServiceTarget) -> Result<Self, BindError> {
        let owner = Self::resolve_owner(connection, &target.service)?;

        let rejected = |source: zbus::Error| BindError::Rejected {
            service: target.service.clone(),
            path: target.path.clone(),
            interface: target.interface.clone(),
            source,
        };

        let proxy = YumDaemonProxyBlocking::builder(connection.inner())
            .destination(owner.clone())
            .map_err(rejected)?
            .path(target.path.clone())
            .map_err(rejected)?
            .interface(target.interface.clone())
            .map_err(rejected)?
            .cache_properties(CacheProperties::No)
            .build()
            .map_err(rejected)?;

        info!(
            service = %target.service,
            owner = %owner,
            path = %target.path,
            interface = %target.interface,
            timeout_ms = connection.call_timeout().as_millis() as u64,
            "Bound to yum daemon"
        );

        Ok(Self {
            connection,
            target: target.clone(),
            owner,
            proxy,
        })
    }

    fn resolve_owner(connection: &BusConnection, service: &str) -> Result<String, BindError> {
        let resolve = |source: zbus::fdo::Error| BindError::Resolve {
            service: service.to_string(),
            source,
        };

        let name = BusName::try_from(service)
            .map_err(|e| resolve(zbus::fdo::Error::InvalidArgs(e.to_string())))?;
        let dbus = DBusProxy::new(connection.inner()).map_err(|e| resolve(e.into()))?;

        match dbus.get_name_owner(name) {
            Ok(owner) => Ok(owner.to_string()),
            Err(zbus::fdo::Error::NameHasNoOwner(_)) => Err(BindError::NoOwner {
                service: service.to_string(),
            }),
            Err(e) => Err(resolve(e)),
        }
    }

    pub fn connection(&self) -> &BusConnection {
        self.connection
    }

    pub fn target(&self) -> &ServiceTarget {
        &self.target
    }

    /// Unique bus name of the daemon process this proxy talks to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn timeout(&self) -> Duration {
        self.connection.call_timeout()
    }
}

impl RpcChannel for ServiceProxy<'_> {
    fn call(&self, call: &RpcCall<'_>) -> Result<Value, RpcError> {
        debug!(method = call.method(), inputs = ?call.inputs(), "Calling yum daemon");

        let reply = match *call {
            RpcCall::GetVersion => self.proxy.get_version().map(Value::Int32),
            RpcCall::Lock => self.proxy.lock().map(Value::Bool),
            RpcCall::Unlock => self.proxy.unlock().map(Value::Bool),
            RpcCall::GetPackagesByName {
                pattern,
                use_newest,
            } => self
                .proxy
                .get_packages_by_name(pattern, use_newest)
                .map(Value::StrList),
        };

        reply.map_err(|e| {
            debug!(method = call.method(), error = %e, "Call to yum daemon failed");
            RpcError::from(e)
        })
    }
}

impl Drop for ServiceProxy<'_> {
    fn drop(&mut self) {
        debug!(service = %self.target.service, owner = %self.owner, "Releasing daemon proxy");
    }
}
