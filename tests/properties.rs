//! Property-based tests for the lock protocol and the workflow.
//!
//! These tests use proptest to drive the client with arbitrary daemon
//! answers and verify that the lock bookkeeping invariants hold.

mod common;

use common::FakeDaemon;
use proptest::prelude::*;
use yumdbus::{LockOutcome, LockState, RpcError, Workflow, YumLock};

#[derive(Debug, Clone, Copy)]
enum Op {
    Lock,
    Unlock,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Lock), Just(Op::Unlock)]
}

fn error_strategy() -> impl Strategy<Value = RpcError> {
    prop_oneof![
        Just(RpcError::Timeout),
        Just(RpcError::Disconnected),
        "[A-Za-z]{1,12}".prop_map(|message| RpcError::remote("org.baseurl.Yum.YumLockedError", message)),
    ]
}

fn reply_strategy() -> impl Strategy<Value = Result<bool, RpcError>> {
    prop_oneof![
        3 => any::<bool>().prop_map(Ok),
        1 => error_strategy().prop_map(Err),
    ]
}

fn package_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9-]{0,15}-[0-9]\\.[0-9]\\.[0-9]", 0..20)
}

proptest! {
    #[test]
    fn unlock_always_leaves_unlocked(
        steps in prop::collection::vec((op_strategy(), reply_strategy()), 1..32)
    ) {
        let mut lock = YumLock::new();

        for (op, reply) in steps {
            let before = lock.state();
            match op {
                Op::Lock => {
                    let daemon = FakeDaemon { lock: reply.clone(), ..FakeDaemon::default() };
                    let result = lock.lock(&daemon);
                    let expected = if reply == Ok(true) { LockState::Locked } else { before };
                    prop_assert_eq!(lock.state(), expected);
                    prop_assert_eq!(result.is_err(), reply.is_err());
                }
                Op::Unlock => {
                    let daemon = FakeDaemon { unlock: reply.clone(), ..FakeDaemon::default() };
                    let result = lock.unlock(&daemon);
                    prop_assert_eq!(lock.state(), LockState::Unlocked);
                    prop_assert_eq!(result.is_err(), reply.is_err());
                }
            }
        }
    }

    #[test]
    fn denied_lock_never_queries(version in any::<i32>()) {
        let daemon = FakeDaemon { version: Ok(version), lock: Ok(false), ..FakeDaemon::default() };

        let report = Workflow::default().run(&daemon);

        prop_assert_eq!(report.lock, Some(LockOutcome::HeldElsewhere));
        prop_assert_eq!(daemon.count("GetPackagesByName"), 0);
        prop_assert_eq!(daemon.count("Unlock"), 0);
    }

    #[test]
    fn packages_come_back_exactly_as_sent(packages in package_strategy()) {
        let daemon = FakeDaemon { packages: Ok(packages.clone()), ..FakeDaemon::default() };

        let report = Workflow::default().run(&daemon);

        prop_assert_eq!(report.packages, Some(packages));
        prop_assert_eq!(daemon.count("Unlock"), 1);
    }

    #[test]
    fn failed_query_unlocks_exactly_once(
        error in error_strategy(),
        unlock in reply_strategy(),
    ) {
        let expected_warnings = usize::from(unlock != Ok(true));
        let daemon = FakeDaemon { packages: Err(error.clone()), unlock, ..FakeDaemon::default() };

        let report = Workflow::default().run(&daemon);

        prop_assert!(!report.is_success());
        prop_assert_eq!(report.packages, None);
        prop_assert_eq!(report.failures.len(), 1);
        prop_assert_eq!(&report.failures[0].message, &error.to_string());
        prop_assert_eq!(report.warnings.len(), expected_warnings);
        prop_assert_eq!(daemon.count("Unlock"), 1);
    }
}
