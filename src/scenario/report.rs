//! Progress reporting
//!
//! Checks never print directly; they are handed a [`Reporter`] and push
//! their progress lines through it.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use colored::{ColoredString, Colorize};

use crate::common::Error;

use super::runner::RunReport;
use super::Check;

/// Output channel for check progress
pub trait Reporter: Send + Sync {
    /// A check is about to send its first request
    fn check_started(&self, check: Check, title: &str);

    /// One assertion passed
    fn step(&self, check: Check, message: &str);

    /// Every assertion in the check passed
    fn check_passed(&self, check: Check);

    /// The check stopped on `error`
    fn check_failed(&self, check: Check, error: &Error);

    /// The run is over
    fn finished(&self, report: &RunReport);
}

/// Human-readable lines, on stdout unless another writer is given
pub struct ConsoleReporter {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

type Style = fn(&str) -> ColoredString;

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), color)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&self, line: fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed stdout is not worth failing a check over
        let _ = writeln!(out, "{}", line);
    }
}

impl Reporter for ConsoleReporter {
    fn check_started(&self, _check: Check, title: &str) {
        self.line(format_args!(
            "\n{} {}",
            self.paint("running test:", |s| s.blue().bold()),
            self.paint(title, |s| s.white().bold())
        ));
    }

    fn step(&self, _check: Check, message: &str) {
        self.line(format_args!("  {} {}", self.paint("✓", |s| s.green()), message));
    }

    fn check_passed(&self, check: Check) {
        let text = format!("test {} passed!", check.number());
        self.line(format_args!("{}", self.paint(&text, |s| s.green().bold())));
    }

    fn check_failed(&self, check: Check, error: &Error) {
        self.line(format_args!(
            "  {} {}: {}",
            self.paint("✗", |s| s.red()),
            self.paint(check.name(), |s| s.red()),
            error
        ));
    }

    fn finished(&self, report: &RunReport) {
        match &report.failure {
            None => self.line(format_args!(
                "\n{}",
                self.paint("all api tests passed successfully!", |s| s.green().bold())
            )),
            Some(failure) => self.line(format_args!(
                "\n{}: {}",
                self.paint(failure.error.kind().label(), |s| s.red().bold()),
                failure.error
            )),
        }
    }
}

/// Structured tracing events instead of console lines
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn check_started(&self, check: Check, title: &str) {
        tracing::info!(check = check.name(), "running test: {}", title);
    }

    fn step(&self, check: Check, message: &str) {
        tracing::info!(check = check.name(), "{}", message);
    }

    fn check_passed(&self, check: Check) {
        tracing::info!(check = check.name(), number = check.number(), "test passed");
    }

    fn check_failed(&self, check: Check, error: &Error) {
        tracing::error!(check = check.name(), kind = error.kind().label(), "{}", error);
    }

    fn finished(&self, report: &RunReport) {
        match &report.failure {
            None => tracing::info!(
                checks = report.checks_passed,
                "all api tests passed successfully!"
            ),
            Some(failure) => tracing::error!(
                check = failure.check.name(),
                passed = report.checks_passed,
                total = report.checks_total,
                "{}: {}",
                failure.error.kind().label(),
                failure.error
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::CheckFailure;
    use std::sync::Arc;

    /// Writer whose contents stay readable after the reporter takes it
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    fn reporter() -> (ConsoleReporter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (ConsoleReporter::with_writer(Box::new(buffer.clone()), false), buffer)
    }

    fn failed_run(check: Check, error: Error) -> RunReport {
        RunReport {
            checks_total: 6,
            checks_passed: check.number() - 1,
            failure: Some(CheckFailure { check, error }),
        }
    }

    #[test]
    fn test_success_line() {
        let (reporter, buffer) = reporter();
        reporter.finished(&RunReport {
            checks_total: 6,
            checks_passed: 6,
            failure: None,
        });
        assert_eq!(buffer.lines(), vec!["all api tests passed successfully!"]);
    }

    #[test]
    fn test_failure_line_per_kind() {
        let cases = [
            (
                failed_run(Check::List, Error::assertion("expected status code 200, got 503")),
                "api test failed: expected status code 200, got 503",
            ),
            (
                failed_run(Check::GetOne, Error::Transport("connection refused".into())),
                "network/request error: connection refused",
            ),
            (
                failed_run(Check::Create, Error::Config("bad base url".into())),
                "unexpected error: Configuration error: bad base url",
            ),
        ];

        for (report, expected) in cases {
            let (reporter, buffer) = reporter();
            reporter.finished(&report);
            assert_eq!(buffer.lines(), vec![expected]);
        }
    }

    #[test]
    fn test_progress_lines_without_color() {
        let (reporter, buffer) = reporter();
        reporter.check_started(Check::GetOne, "GET one post (ID 1)");
        reporter.step(Check::GetOne, "status code 200 OK");
        reporter.check_passed(Check::GetOne);

        assert_eq!(
            buffer.lines(),
            vec![
                "running test: GET one post (ID 1)",
                "  ✓ status code 200 OK",
                "test 2 passed!",
            ]
        );
    }

    #[test]
    fn test_failed_check_line_has_no_escape_codes() {
        let (reporter, buffer) = reporter();
        let error = Error::assertion("expected status code 404, got 200");
        reporter.check_failed(Check::Delete, &error);

        let lines = buffer.lines();
        assert_eq!(lines, vec!["  ✗ delete: expected status code 404, got 200"]);
        assert!(!lines[0].contains('\u{1b}'));
    }

    #[test]
    fn test_paint_only_styles_when_enabled() {
        let plain = ConsoleReporter::with_writer(Box::new(io::sink()), false);
        assert_eq!(plain.paint("passed", |s| s.green().bold()), "passed");

        colored::control::set_override(true);
        let styled = ConsoleReporter::with_writer(Box::new(io::sink()), true);
        assert_ne!(styled.paint("passed", |s| s.green().bold()), "passed");
        // Off again for a plain reporter while the global override says on
        assert_eq!(plain.paint("passed", |s| s.green().bold()), "passed");
        colored::control::unset_override();
    }
}
