//! Check runner implementation
//!
//! Runs checks in order and stops at the first failure.

use crate::common::{Error, Result};

use super::checks::{self, CheckContext};
use super::Check;

/// The check that stopped a run, and why
#[derive(Debug)]
pub struct CheckFailure {
    pub check: Check,
    pub error: Error,
}

/// Result of a run
#[derive(Debug)]
pub struct RunReport {
    pub checks_total: usize,
    pub checks_passed: usize,
    pub failure: Option<CheckFailure>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run a single check, reporting start and outcome
pub async fn run_check(check: Check, ctx: &CheckContext<'_>) -> Result<()> {
    ctx.reporter.check_started(check, &checks::title(check, ctx.fixtures));

    match checks::execute(check, ctx).await {
        Ok(()) => {
            ctx.reporter.check_passed(check);
            Ok(())
        }
        Err(e) => {
            ctx.reporter.check_failed(check, &e);
            Err(e)
        }
    }
}

/// Run `to_run` in the given order; later checks are skipped after a failure
pub async fn run_checks(to_run: &[Check], ctx: &CheckContext<'_>) -> RunReport {
    let mut report = RunReport {
        checks_total: to_run.len(),
        checks_passed: 0,
        failure: None,
    };

    for &check in to_run {
        tracing::debug!(check = check.name(), "starting check");

        if let Err(error) = run_check(check, ctx).await {
            tracing::debug!(check = check.name(), kind = %error.kind(), "check failed");
            report.failure = Some(CheckFailure { check, error });
            break;
        }
        report.checks_passed += 1;
    }

    ctx.reporter.finished(&report);
    report
}
