use std::future::Future;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::action::{Action, ActionResult};
use crate::errors::{HookPhase, RunError};
use crate::hooks::Hooks;
use crate::report::{ConsoleReporter, Reporter, SilentReporter};
use crate::suite::Suite;

type FailureSignal = Box<dyn Fn() + Send + Sync>;

/// Top-level container of suites.
///
/// Runner-level hooks wrap suites, not individual tests: `before_each` and
/// `after_each` run once around every suite. Totals are aggregated once,
/// after every suite has finished, and accumulate across repeated
/// [`Runner::execute`] calls.
pub struct Runner {
    suites: Vec<Suite>,
    hooks: Hooks,
    passed: usize,
    failed: usize,
    reporter: Box<dyn Reporter>,
    failure_signal: Option<FailureSignal>,
}

impl Runner {
    /// A runner reporting to stdout with ANSI colors.
    pub fn new() -> Self {
        Self::with_reporter(Box::new(ConsoleReporter::stdout()))
    }

    /// A runner that produces no output.
    pub fn silent() -> Self {
        Self::with_reporter(Box::new(SilentReporter))
    }

    pub fn with_reporter(reporter: Box<dyn Reporter>) -> Self {
        Self {
            suites: Vec::new(),
            hooks: Hooks::default(),
            passed: 0,
            failed: 0,
            reporter,
            failure_signal: None,
        }
    }

    /// Creates, registers, and returns a new suite. Suites execute in
    /// registration order.
    pub fn suite(&mut self, name: impl Into<String>) -> &mut Suite {
        self.suites.push(Suite::new(name));
        self.suites.last_mut().expect("suite just registered")
    }

    /// Alias of [`Runner::suite`].
    pub fn describe(&mut self, name: impl Into<String>) -> &mut Suite {
        self.suite(name)
    }

    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Runs once before the first suite. Replaces any previous registration.
    pub fn before_all<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.before_all = Action::new(action);
    }

    /// Runs before every suite. Replaces any previous registration.
    pub fn before_each<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.before_each = Action::new(action);
    }

    /// Runs once after the last suite. Replaces any previous registration.
    pub fn after_all<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.after_all = Action::new(action);
    }

    /// Runs after every suite. Replaces any previous registration.
    pub fn after_each<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.after_each = Action::new(action);
    }

    /// Injects the host-process failure signal, invoked once when a run
    /// finishes with a nonzero failed count. The signal must not terminate
    /// the process; pending work (final log flushes) still completes.
    pub fn on_failure<F>(&mut self, signal: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.failure_signal = Some(Box::new(signal));
    }

    /// Executes every registered suite in order and aggregates totals.
    ///
    /// Test-body failures surface only through the summary, the recorded
    /// failure details, and the failure signal. Hook failures at either
    /// level abort the run with an error and no summary.
    pub async fn execute(&mut self) -> Result<RunSummary, RunError> {
        let start = Instant::now();

        Self::run_hook(&self.hooks.before_all, HookPhase::BeforeAll).await?;

        for suite in &mut self.suites {
            Self::run_hook(&self.hooks.before_each, HookPhase::BeforeEach).await?;
            suite.execute(self.reporter.as_mut()).await?;
            Self::run_hook(&self.hooks.after_each, HookPhase::AfterEach).await?;
            self.reporter.suite_separator();
        }

        Self::run_hook(&self.hooks.after_all, HookPhase::AfterAll).await?;

        for suite in &self.suites {
            self.passed += suite.passed();
            self.failed += suite.failed();
        }

        for suite in &self.suites {
            for error in suite.errors() {
                self.reporter
                    .failure_detail(suite.name(), &error.test_message, &error.error);
            }
        }

        if self.failed > 0 {
            if let Some(signal) = &self.failure_signal {
                signal();
            }
        }

        let elapsed = start.elapsed();
        self.reporter.summary(self.passed, self.failed, elapsed);
        debug!(
            passed = self.passed,
            failed = self.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "run finished"
        );

        Ok(RunSummary {
            passed: self.passed,
            failed: self.failed,
            elapsed,
        })
    }

    async fn run_hook(action: &Action, phase: HookPhase) -> Result<(), RunError> {
        action
            .run()
            .await
            .map_err(|source| RunError::RunnerHook { phase, source })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Final totals of a run, available once [`Runner::execute`] resolves.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Exit status for the host `main`, without terminating the process.
    pub fn exit_code(&self) -> ExitCode {
        if self.failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn shared_counter_test(suite: &mut Suite, message: &str, value: &Arc<AtomicI64>, delta: i64) {
        let value = Arc::clone(value);
        suite.test(message, move || {
            let value = Arc::clone(&value);
            async move {
                value.fetch_add(delta, Ordering::SeqCst);
                Ok(())
            }
        });
    }

    #[test]
    fn registers_suites_in_order() {
        let mut runner = Runner::silent();
        runner.suite("first suite");
        runner.describe("second suite");

        assert_eq!(runner.suites().len(), 2);
        assert_eq!(runner.suites()[0].name(), "first suite");
        assert_eq!(runner.suites()[1].name(), "second suite");
    }

    #[tokio::test]
    async fn executes_all_suites() {
        let value = Arc::new(AtomicI64::new(0));
        let mut runner = Runner::silent();
        shared_counter_test(runner.suite("first suite"), "first test", &value, 2);
        shared_counter_test(runner.suite("second suite"), "second test", &value, -1);

        let summary = runner.execute().await.unwrap();

        assert_eq!(value.load(Ordering::SeqCst), 1);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 0);
        assert!(summary.is_success());
    }

    #[tokio::test]
    async fn before_all_runs_before_every_suite() {
        let value = Arc::new(AtomicI64::new(0));
        let seen = Arc::new(AtomicI64::new(-1));
        let mut runner = Runner::silent();

        let v = Arc::clone(&value);
        runner.before_all(move || {
            let v = Arc::clone(&v);
            async move {
                v.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let v = Arc::clone(&value);
        let s = Arc::clone(&seen);
        runner.suite("first suite").test("first test", move || {
            let v = Arc::clone(&v);
            let s = Arc::clone(&s);
            async move {
                s.store(v.load(Ordering::SeqCst), Ordering::SeqCst);
                Ok(())
            }
        });

        runner.execute().await.unwrap();

        assert_eq!(value.load(Ordering::SeqCst), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn before_each_runs_once_per_suite() {
        let value = Arc::new(AtomicI64::new(0));
        let mut runner = Runner::silent();

        let v = Arc::clone(&value);
        runner.before_each(move || {
            let v = Arc::clone(&v);
            async move {
                v.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        runner.suite("first suite").test("first test", || async { Ok(()) });
        runner.suite("second suite").test("second test", || async { Ok(()) });

        runner.execute().await.unwrap();
        assert_eq!(value.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn after_all_runs_after_last_suite() {
        let value = Arc::new(AtomicI64::new(0));
        let was_zero_in_last_suite = Arc::new(AtomicI64::new(0));
        let mut runner = Runner::silent();

        let v = Arc::clone(&value);
        runner.after_all(move || {
            let v = Arc::clone(&v);
            async move {
                v.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        runner.suite("first suite").test("first test", || async { Ok(()) });

        let v = Arc::clone(&value);
        let flag = Arc::clone(&was_zero_in_last_suite);
        runner.suite("second suite").test("second test", move || {
            let v = Arc::clone(&v);
            let flag = Arc::clone(&flag);
            async move {
                flag.store(i64::from(v.load(Ordering::SeqCst) == 0), Ordering::SeqCst);
                Ok(())
            }
        });

        runner.execute().await.unwrap();

        assert_eq!(value.load(Ordering::SeqCst), 1);
        assert_eq!(was_zero_in_last_suite.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn aggregates_totals_across_suites() {
        let mut runner = Runner::silent();
        runner.suite("passing").test("ok", || async { Ok(()) });
        runner
            .suite("failing")
            .test("broken", || async { anyhow::bail!("bug") });

        let summary = runner.execute().await.unwrap();

        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(runner.passed(), 1);
        assert_eq!(runner.failed(), 1);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn signals_failure_exactly_when_tests_failed() {
        let signaled = Arc::new(AtomicI64::new(0));
        let mut runner = Runner::silent();
        let s = Arc::clone(&signaled);
        runner.on_failure(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });
        runner.suite("ok").test("passes", || async { Ok(()) });

        runner.execute().await.unwrap();
        assert_eq!(signaled.load(Ordering::SeqCst), 0);

        runner
            .suite("bad")
            .test("fails", || async { anyhow::bail!("bug") });
        runner.execute().await.unwrap();
        assert_eq!(signaled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn runner_hook_failure_is_fatal() {
        let mut runner = Runner::silent();
        runner.before_all(|| async { anyhow::bail!("global setup broke") });
        runner.suite("never").test("runs", || async { Ok(()) });

        let err = runner.execute().await.unwrap_err();
        assert!(matches!(
            err,
            RunError::RunnerHook {
                phase: HookPhase::BeforeAll,
                ..
            }
        ));
    }
}
