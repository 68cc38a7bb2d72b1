use std::future::Future;

use tracing::debug;

use crate::action::{Action, ActionResult};
use crate::errors::{HookPhase, RunError, TestError};
use crate::hooks::Hooks;
use crate::report::Reporter;
use crate::test::{Selection, Test};

/// A named, ordered group of tests sharing lifecycle hooks.
///
/// Tests execute in registration order, strictly sequentially. Counts and
/// recorded errors accumulate across repeated [`Suite::execute`] calls; a
/// suite is never reset between runs.
#[derive(Debug)]
pub struct Suite {
    name: String,
    tests: Vec<Test>,
    hooks: Hooks,
    has_only: bool,
    passed: usize,
    failed: usize,
    errors: Vec<TestError>,
}

impl Suite {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            hooks: Hooks::default(),
            has_only: false,
            passed: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Failures recorded so far, in execution order.
    pub fn errors(&self) -> &[TestError] {
        &self.errors
    }

    /// Runs once before the suite's first test. Replaces any previously
    /// registered before-all action.
    pub fn before_all<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.before_all = Action::new(action);
    }

    /// Runs before every executed test. Replaces any previous registration.
    pub fn before_each<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.before_each = Action::new(action);
    }

    /// Runs once after the suite's last test. Replaces any previous
    /// registration.
    pub fn after_all<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.after_all = Action::new(action);
    }

    /// Runs after every executed test, including failed ones. Replaces any
    /// previous registration.
    pub fn after_each<F, Fut>(&mut self, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.hooks.after_each = Action::new(action);
    }

    /// Registers a test.
    pub fn test<F, Fut>(&mut self, message: impl Into<String>, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.push(message, action, Selection::Default);
    }

    /// Alias of [`Suite::test`].
    pub fn it<F, Fut>(&mut self, message: impl Into<String>, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.test(message, action);
    }

    /// Registers a test that runs alone: when at least one `Only` test
    /// exists, the suite executes exactly the first-registered one.
    pub fn test_only<F, Fut>(&mut self, message: impl Into<String>, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.has_only = true;
        self.push(message, action, Selection::Only);
    }

    /// Registers a test that never runs.
    pub fn test_except<F, Fut>(&mut self, message: impl Into<String>, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.push(message, action, Selection::Except);
    }

    fn push<F, Fut>(&mut self, message: impl Into<String>, action: F, selection: Selection)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.tests
            .push(Test::new(message, Action::new(action), selection));
    }

    /// Executes the suite against `reporter`.
    ///
    /// Test-body failures are isolated: recorded, counted, and the loop
    /// moves on, with after-each still run. Hook failures are fatal and
    /// return [`RunError::SuiteHook`] immediately.
    pub async fn execute(&mut self, reporter: &mut dyn Reporter) -> Result<(), RunError> {
        reporter.suite_started(&self.name);
        debug!(suite = %self.name, tests = self.tests.len(), "suite started");

        self.run_hook(&self.hooks.before_all, HookPhase::BeforeAll)
            .await?;

        // The working list is fixed before the first test runs. With at
        // least one `Only` test, it is exactly the first-registered one.
        let working: Vec<usize> = if self.has_only {
            self.tests
                .iter()
                .position(|t| t.selection() == Selection::Only)
                .into_iter()
                .collect()
        } else {
            (0..self.tests.len()).collect()
        };

        for idx in working {
            if self.tests[idx].selection() == Selection::Except {
                continue;
            }

            self.run_hook(&self.hooks.before_each, HookPhase::BeforeEach)
                .await?;

            match self.tests[idx].execute().await {
                Ok(()) => {
                    self.passed += 1;
                    reporter.test_passed(self.tests[idx].message());
                    debug!(suite = %self.name, test = self.tests[idx].message(), "test passed");
                }
                Err(error) => {
                    self.failed += 1;
                    reporter.test_failed(self.tests[idx].message(), &error);
                    debug!(suite = %self.name, test = self.tests[idx].message(), "test failed");
                    self.errors.push(TestError {
                        test_message: self.tests[idx].message().to_string(),
                        error,
                    });
                }
            }

            self.run_hook(&self.hooks.after_each, HookPhase::AfterEach)
                .await?;
        }

        self.run_hook(&self.hooks.after_all, HookPhase::AfterAll)
            .await?;

        debug!(
            suite = %self.name,
            passed = self.passed,
            failed = self.failed,
            "suite finished"
        );
        Ok(())
    }

    async fn run_hook(&self, action: &Action, phase: HookPhase) -> Result<(), RunError> {
        action.run().await.map_err(|source| RunError::SuiteHook {
            suite: self.name.clone(),
            phase,
            source,
        })
    }
}
