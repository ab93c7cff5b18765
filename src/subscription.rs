use std::fmt;

use parking_lot::Mutex;

type Action = Box<dyn FnOnce() + Send>;

/// A manual cancellation handle returned by [`Subject::subscribe`](crate::Subject::subscribe).
///
/// Call [`unsubscribe`](Subscription::unsubscribe) to remove the callback.
/// Dropping a `Subscription` does **not** unsubscribe: the callback stays
/// registered for the lifetime of the subject. Use
/// [`into_auto`](Subscription::into_auto) for scope-bound subscriptions.
///
/// The wrapped action runs at most once, no matter how many times or from how
/// many threads `unsubscribe` is called. Unsubscribing after the subject has
/// been dropped is a no-op.
///
/// # Example
///
/// ```rust
/// use herald::Subject;
///
/// let subject = Subject::<String>::new();
/// let sub = subject.subscribe(|x: i32| println!("got {x}"));
/// subject.notify((1,));   // prints "got 1"
/// sub.unsubscribe();
/// subject.notify((2,));   // prints nothing
/// ```
#[must_use = "dropping a Subscription keeps the callback registered; call `unsubscribe` or convert it with `into_auto`"]
pub struct Subscription {
    action: Mutex<Option<Action>>,
}

impl Subscription {
    /// Wraps an arbitrary cancellation action.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Mutex::new(Some(Box::new(action))),
        }
    }

    /// Runs the cancellation action if it has not run yet.
    ///
    /// Returns `true` if this call ran it. Concurrent callers wait until the
    /// action has finished, so once any call returns the callback is gone.
    /// The action must not call `unsubscribe` on its own handle.
    pub fn unsubscribe(&self) -> bool {
        let mut slot = self.action.lock();
        match slot.take() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Whether [`unsubscribe`](Subscription::unsubscribe) has already been called.
    pub fn is_unsubscribed(&self) -> bool {
        self.action.lock().is_none()
    }

    /// Converts into a handle that unsubscribes when dropped.
    pub fn into_auto(self) -> AutoUnsubscribe {
        AutoUnsubscribe { subscription: self }
    }
}

/// An inert handle, already unsubscribed.
impl Default for Subscription {
    fn default() -> Self {
        Self {
            action: Mutex::new(None),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("unsubscribed", &self.is_unsubscribed())
            .finish()
    }
}

/// A cancellation handle that unsubscribes when it goes out of scope.
///
/// ```rust
/// use herald::Subject;
///
/// let subject = Subject::<String>::new();
/// {
///     let _guard = subject.subscribe(|| println!("tick")).into_auto();
///     subject.notify(());  // prints "tick"
/// }
/// subject.notify(());      // prints nothing
/// ```
#[must_use = "an AutoUnsubscribe unsubscribes immediately when dropped"]
pub struct AutoUnsubscribe {
    subscription: Subscription,
}

impl AutoUnsubscribe {
    /// Unsubscribes now instead of on drop. See [`Subscription::unsubscribe`].
    pub fn unsubscribe(&self) -> bool {
        self.subscription.unsubscribe()
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.subscription.is_unsubscribed()
    }

    /// Gives up scope-bound cancellation and returns the manual handle.
    pub fn release(mut self) -> Subscription {
        std::mem::take(&mut self.subscription)
    }
}

impl From<Subscription> for AutoUnsubscribe {
    fn from(subscription: Subscription) -> Self {
        subscription.into_auto()
    }
}

impl Drop for AutoUnsubscribe {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl fmt::Debug for AutoUnsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoUnsubscribe")
            .field("unsubscribed", &self.is_unsubscribed())
            .finish()
    }
}
