use tracing::{debug, info, warn};

use crate::error::{QueryError, RpcError};
use crate::lock::YumLock;
use crate::proxy::{RpcCall, RpcChannel, Value};

/// Get the daemon's API version.
pub fn get_version<C: RpcChannel + ?Sized>(channel: &C) -> Result<i32, RpcError> {
    let version = channel.call(&RpcCall::GetVersion)?.into_i32()?;
    debug!(version, "Yum daemon version");
    Ok(version)
}

/// Get the names of the packages matching `pattern`, in the order the daemon
/// sends them.
///
/// The lock must be held. If the call fails the lock is released before the
/// error is returned, so a failed query never leaves the daemon locked; the
/// daemon's answer to that unlock travels in [`QueryError::Rpc`].
pub fn get_packages_by_name<C: RpcChannel + ?Sized>(
    channel: &C,
    lock: &mut YumLock,
    pattern: &str,
    use_newest: bool,
) -> Result<Vec<String>, QueryError> {
    if !lock.is_held() {
        return Err(QueryError::LockNotHeld);
    }

    info!(pattern, use_newest, "Getting packages matching pattern");
    let call = RpcCall::GetPackagesByName {
        pattern,
        use_newest,
    };

    match channel.call(&call).and_then(Value::into_str_list) {
        Ok(packages) => {
            debug!(count = packages.len(), "Got packages");
            Ok(packages)
        }
        Err(e) => {
            warn!(error = %e, "Package query failed, releasing the yum lock");
            let release = lock.unlock(channel);
            Err(QueryError::Rpc { error: e, release })
        }
    }
}
