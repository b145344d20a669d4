//! An in-process stand-in for the yum daemon.

#![allow(dead_code)]

use std::cell::RefCell;

use yumdbus::{RpcCall, RpcChannel, RpcError, Value};

/// Answers every call to a method with the same configured reply and records
/// the calls it receives.
pub struct FakeDaemon {
    pub version: Result<i32, RpcError>,
    pub lock: Result<bool, RpcError>,
    pub unlock: Result<bool, RpcError>,
    pub packages: Result<Vec<String>, RpcError>,
    pub calls: RefCell<Vec<(String, Vec<Value>)>>,
}

impl Default for FakeDaemon {
    fn default() -> Self {
        Self {
            version: Ok(2),
            lock: Ok(true),
            unlock: Ok(true),
            packages: Ok(yum_packages()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeDaemon {
    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn inputs_of(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, inputs)| inputs.clone())
            .collect()
    }
}

impl RpcChannel for FakeDaemon {
    fn call(&self, call: &RpcCall<'_>) -> Result<Value, RpcError> {
        self.calls
            .borrow_mut()
            .push((call.method().to_string(), call.inputs()));

        match call {
            RpcCall::GetVersion => self.version.clone().map(Value::Int32),
            RpcCall::Lock => self.lock.clone().map(Value::Bool),
            RpcCall::Unlock => self.unlock.clone().map(Value::Bool),
            RpcCall::GetPackagesByName { .. } => self.packages.clone().map(Value::StrList),
        }
    }
}

pub fn yum_packages() -> Vec<String> {
    vec![
        "yum-3.4.3".to_string(),
        "yum-metadata-parser-1.1.4".to_string(),
    ]
}
