//! A scripted stand-in for the daemon, used by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::error::{RpcError, FAILED};
use crate::proxy::{RpcCall, RpcChannel, Value};

#[derive(Default)]
pub(crate) struct ScriptedDaemon {
    replies: RefCell<HashMap<&'static str, VecDeque<Result<Value, RpcError>>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedDaemon {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next call to `method`.
    pub(crate) fn reply(self, method: &'static str, reply: Result<Value, RpcError>) -> Self {
        self.replies
            .borrow_mut()
            .entry(method)
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|m| *m == method).count()
    }
}

impl RpcChannel for ScriptedDaemon {
    fn call(&self, call: &RpcCall<'_>) -> Result<Value, RpcError> {
        let method = call.method();
        self.calls.borrow_mut().push(method.to_string());
        self.replies
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(RpcError::remote(FAILED, format!("no reply scripted for {method}"))))
    }
}
