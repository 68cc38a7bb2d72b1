//! veritest — a minimal sequential test-execution framework.
//!
//! Callers register named tests on [`Suite`]s and suites on a [`Runner`],
//! attach lifecycle hooks (`before_all`/`before_each`/`after_all`/`after_each`)
//! at either level, and execute everything in registration order. A failing
//! test is recorded and counted without stopping the run; a failing hook
//! aborts the run. Output goes through a pluggable [`Reporter`];
//! [`SilentReporter`] keeps a run completely quiet.
//!
//! ```
//! use veritest::{Runner, RunError};
//!
//! # async fn demo() -> Result<(), RunError> {
//! let mut runner = Runner::silent();
//! let suite = runner.suite("math");
//! suite.test("adds", || async {
//!     anyhow::ensure!(1 + 1 == 2, "bad math");
//!     Ok(())
//! });
//! let summary = runner.execute().await?;
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

mod action;
mod errors;
mod hooks;
mod runner;
mod suite;

pub mod discovery;
pub mod report;

pub use action::ActionResult;
pub use errors::{HookPhase, RunError, TestError};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use runner::{RunSummary, Runner};
pub use suite::Suite;
pub use test::{Selection, Test};

/// Constructs a [`Runner`] reporting to stdout.
pub fn runner() -> Runner {
    Runner::new()
}
