use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Outcome of a single action invocation. `Err` carries the caller's
/// failure value unmodified.
pub type ActionResult = anyhow::Result<()>;

type ActionFuture = Pin<Box<dyn Future<Output = ActionResult> + Send>>;

/// A registered piece of caller work: a test body or a lifecycle hook.
///
/// Actions are boxed so one suite can hold closures of different types, and
/// are `Fn` rather than `FnOnce` because executing a suite again re-invokes
/// every registered action.
pub struct Action(Box<dyn Fn() -> ActionFuture + Send + Sync>);

impl Action {
    pub(crate) fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        Self(Box::new(move || Box::pin(f())))
    }

    /// An action that completes immediately with success.
    pub(crate) fn noop() -> Self {
        Self::new(|| async { Ok(()) })
    }

    pub(crate) async fn run(&self) -> ActionResult {
        (self.0)().await
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
