use std::fmt;

/// What a notification does when one of its callbacks panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PanicPolicy {
    /// The panic unwinds out of `notify`. Remaining callbacks are skipped.
    #[default]
    Propagate,
    /// The panic is caught and logged, and the remaining callbacks still run.
    Isolate,
}

impl PanicPolicy {
    pub fn is_propagate(&self) -> bool {
        matches!(self, PanicPolicy::Propagate)
    }

    pub fn is_isolate(&self) -> bool {
        matches!(self, PanicPolicy::Isolate)
    }
}

impl fmt::Display for PanicPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanicPolicy::Propagate => write!(f, "Propagate"),
            PanicPolicy::Isolate => write!(f, "Isolate"),
        }
    }
}
