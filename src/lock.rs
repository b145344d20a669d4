//! The daemon's exclusive lock, seen from this client.
//!
//! The daemon answers a lock request immediately: either this client now
//! holds the lock or somebody else does. There is no waiting for a denied
//! lock; a denial is final for the run.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::RpcError;
use crate::proxy::{RpcCall, RpcChannel, Value};

/// What this client believes about the daemon lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

/// The daemon's answer to a lock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockOutcome {
    Acquired,
    HeldElsewhere,
}

/// The daemon's answer to an unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Release {
    Released,
    /// The daemon reported that it did not release the lock.
    Refused,
}

/// Client-side bookkeeping for the daemon lock.
///
/// The state only changes through [`YumLock::lock`] and [`YumLock::unlock`].
#[derive(Debug, Default)]
pub struct YumLock {
    state: LockState,
}

impl YumLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_held(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Ask the daemon for the lock.
    ///
    /// On [`LockOutcome::HeldElsewhere`] or an error the local state is left
    /// as it was.
    pub fn lock<C: RpcChannel + ?Sized>(&mut self, channel: &C) -> Result<LockOutcome, RpcError> {
        let acquired = channel.call(&RpcCall::Lock)?.into_bool()?;

        if acquired {
            self.state = LockState::Locked;
            info!("Yum is now locked");
            Ok(LockOutcome::Acquired)
        } else {
            info!("Yum is locked by another application");
            Ok(LockOutcome::HeldElsewhere)
        }
    }

    /// Ask the daemon to release the lock.
    ///
    /// Safe to call in any state. Afterwards the client never believes it
    /// holds the lock, whatever the daemon answered.
    pub fn unlock<C: RpcChannel + ?Sized>(&mut self, channel: &C) -> Result<Release, RpcError> {
        let reply = channel.call(&RpcCall::Unlock).and_then(Value::into_bool);
        self.state = LockState::Unlocked;

        match reply {
            Ok(true) => {
                info!("Yum is unlocked");
                Ok(Release::Released)
            }
            Ok(false) => {
                warn!("Yum daemon reported that it did not release the lock");
                Ok(Release::Refused)
            }
            Err(e) => {
                warn!(error = %e, "Unlock failed; no longer treating the lock as held");
                Err(e)
            }
        }
    }
}
