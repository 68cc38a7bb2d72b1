//! Run reporting: structured events consumed by pluggable reporters.

use std::time::Duration;

mod console;
pub use console::ConsoleReporter;

/// Consumes the ordered event stream of a run.
///
/// Events arrive in execution order: `suite_started`, then one
/// `test_passed`/`test_failed` per executed test, a `suite_separator` after
/// each suite, every `failure_detail` once all suites have finished (suite
/// order, then recording order within a suite), and a final `summary`.
pub trait Reporter: Send {
    fn suite_started(&mut self, name: &str);

    fn test_passed(&mut self, message: &str);

    fn test_failed(&mut self, message: &str, error: &anyhow::Error);

    fn suite_separator(&mut self);

    fn failure_detail(&mut self, suite_name: &str, test_message: &str, error: &anyhow::Error);

    fn summary(&mut self, passed: usize, failed: usize, elapsed: Duration);
}

/// Discards every event. For headless and embedded runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn suite_started(&mut self, _: &str) {}

    fn test_passed(&mut self, _: &str) {}

    fn test_failed(&mut self, _: &str, _: &anyhow::Error) {}

    fn suite_separator(&mut self) {}

    fn failure_detail(&mut self, _: &str, _: &str, _: &anyhow::Error) {}

    fn summary(&mut self, _: usize, _: usize, _: Duration) {}
}
