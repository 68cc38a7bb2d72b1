use std::fmt;

/// Which lifecycle hook was running when a fatal failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    BeforeAll,
    BeforeEach,
    AfterAll,
    AfterEach,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HookPhase::BeforeAll => "before-all",
            HookPhase::BeforeEach => "before-each",
            HookPhase::AfterAll => "after-all",
            HookPhase::AfterEach => "after-each",
        };
        f.write_str(s)
    }
}

/// Fatal execution errors.
///
/// Only hook failures surface here. Test-body failures are isolated: they
/// are recorded as [`TestError`]s on the owning suite and reported through
/// the summary, never through `execute`'s return value.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A suite-level hook failed; the run is aborted.
    #[error("{phase} hook failed in suite `{suite}`")]
    SuiteHook {
        suite: String,
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },
    /// A runner-level hook failed; the run is aborted.
    #[error("runner {phase} hook failed")]
    RunnerHook {
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },
}

/// A captured test-body failure.
///
/// The cause is kept unmodified, so callers can `downcast_ref` to the
/// exact value the test action returned.
#[derive(Debug)]
pub struct TestError {
    pub test_message: String,
    pub error: anyhow::Error,
}
