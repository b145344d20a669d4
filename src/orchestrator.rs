//! The end-to-end client run: connect, bind, query, release.

use std::io::{self, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::connection::BusConnection;
use crate::error::{ClientError, QueryError};
use crate::lock::{LockOutcome, Release, YumLock};
use crate::package::{get_packages_by_name, get_version};
use crate::proxy::{RpcChannel, ServiceProxy};

/// Pattern the packages are looked up by.
pub const QUERY_PATTERN: &str = "yum*";

/// Only report the newest version of each matching package.
pub const QUERY_USE_NEWEST: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Version,
    Lock,
    Query,
    Unlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIssue {
    pub step: Step,
    pub message: String,
}

/// What happened during a run.
///
/// `failures` hold steps that did not do their job (lock, query); `warnings`
/// hold recovered problems (version, unlock).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub version: Option<i32>,
    pub lock: Option<LockOutcome>,
    pub packages: Option<Vec<String>>,
    pub failures: Vec<StepIssue>,
    pub warnings: Vec<StepIssue>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, step: Step, message: impl ToString) {
        self.failures.push(StepIssue {
            step,
            message: message.to_string(),
        });
    }

    fn warn(&mut self, step: Step, message: impl ToString) {
        self.warnings.push(StepIssue {
            step,
            message: message.to_string(),
        });
    }

    /// Write the human-readable run output.
    pub fn write_text<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if let Some(version) = self.version {
            writeln!(out, "version is : {version}")?;
        }
        if self.lock == Some(LockOutcome::HeldElsewhere) {
            writeln!(out, "Yum is locked by another application")?;
        }
        if let Some(packages) = &self.packages {
            writeln!(out, "Packages:")?;
            writeln!(out, "==========================")?;
            for package in packages {
                writeln!(out, "  {package}")?;
            }
        }
        Ok(())
    }
}

/// The fixed sequence of daemon calls made once a proxy is bound.
#[derive(Debug, Clone)]
pub struct Workflow {
    pattern: String,
    use_newest: bool,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(QUERY_PATTERN, QUERY_USE_NEWEST)
    }
}

impl Workflow {
    pub fn new(pattern: impl Into<String>, use_newest: bool) -> Self {
        Self {
            pattern: pattern.into(),
            use_newest,
        }
    }

    pub fn run<C: RpcChannel + ?Sized>(&self, channel: &C) -> RunReport {
        let mut report = RunReport::default();

        match get_version(channel) {
            Ok(version) => report.version = Some(version),
            Err(e) => {
                warn!(error = %e, "Could not get the yum daemon version");
                report.warn(Step::Version, e);
            }
        }

        let mut lock = YumLock::new();
        match lock.lock(channel) {
            Ok(LockOutcome::Acquired) => {
                report.lock = Some(LockOutcome::Acquired);
                info!("Ready for some action");
                self.query(channel, &mut lock, &mut report);
            }
            Ok(LockOutcome::HeldElsewhere) => {
                report.lock = Some(LockOutcome::HeldElsewhere);
            }
            Err(e) => {
                warn!(error = %e, "Could not lock the yum daemon");
                report.fail(Step::Lock, e);
            }
        }

        report
    }

    fn query<C: RpcChannel + ?Sized>(&self, channel: &C, lock: &mut YumLock, report: &mut RunReport) {
        let release = match get_packages_by_name(channel, lock, &self.pattern, self.use_newest) {
            Ok(packages) => {
                report.packages = Some(packages);
                lock.unlock(channel)
            }
            Err(QueryError::Rpc { error, release }) => {
                report.fail(Step::Query, error);
                release
            }
            Err(e @ QueryError::LockNotHeld) => {
                report.fail(Step::Query, e);
                return;
            }
        };

        match release {
            Ok(Release::Released) => {}
            Ok(Release::Refused) => report.warn(Step::Unlock, "daemon did not release the lock"),
            Err(e) => report.warn(Step::Unlock, e),
        }
    }
}

/// Connect to the bus, bind to the daemon and run the default [`Workflow`].
///
/// Connection and bind failures abort the run. The proxy and the connection
/// are released on every path once the workflow is done.
pub fn run(config: &ClientConfig) -> Result<RunReport, ClientError> {
    let connection = BusConnection::connect(config)?;
    let proxy = ServiceProxy::bind(&connection, &config.target)?;

    Ok(Workflow::default().run(&proxy))
}
