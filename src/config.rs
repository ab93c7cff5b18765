use std::sync::Arc;

use crate::PanicPolicy;

/// Configuration of a [`Subject`](crate::Subject).
///
/// Use the builder methods to customize, or [`Default`] for sensible defaults.
///
/// # Examples
///
/// ```rust
/// use herald::{Config, PanicPolicy};
///
/// let config = Config::default()
///     .with_name("ui-events")                    // Shows up in log records
///     .with_panic_policy(PanicPolicy::Isolate);  // Keep notifying past a panicking callback
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Label used in log records emitted by the subject and its subscriptions.
    /// Default: "subject"
    pub name: Arc<str>,

    /// Behavior when a callback panics during a notification.
    /// Default: [`PanicPolicy::Propagate`]
    pub panic_policy: PanicPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: Arc::from("subject"),
            panic_policy: PanicPolicy::default(),
        }
    }
}

impl Config {
    /// Set the label used for this subject in log records.
    pub fn with_name<N: Into<Arc<str>>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Set how panicking callbacks are handled.
    ///
    /// With [`PanicPolicy::Isolate`] every callback runs under `catch_unwind`,
    /// which costs a little per invocation but guarantees the fan-out completes.
    pub fn with_panic_policy(mut self, policy: PanicPolicy) -> Self {
        self.panic_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(&*config.name, "subject");
        assert!(config.panic_policy.is_propagate());
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_name("sensors")
            .with_panic_policy(PanicPolicy::Isolate);
        assert_eq!(&*config.name, "sensors");
        assert!(config.panic_policy.is_isolate());
    }
}
