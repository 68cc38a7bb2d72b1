use crate::action::Action;

/// The four lifecycle hooks shared by suites and runners.
///
/// Every hook defaults to a no-op action, so execution never branches on
/// hook presence. Setting a hook replaces the previous registration.
#[derive(Debug)]
pub(crate) struct Hooks {
    pub before_all: Action,
    pub before_each: Action,
    pub after_all: Action,
    pub after_each: Action,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            before_all: Action::noop(),
            before_each: Action::noop(),
            after_all: Action::noop(),
            after_each: Action::noop(),
        }
    }
}
