use std::{borrow::Borrow, fmt, hash::Hash, sync::Arc};

use tracing::{debug, trace};

use crate::{
    Arguments, Callback, Config, Error, Result, Signature, Subscription, Tag, internal::Shared,
};

/// A thread-safe registry of callbacks notified with heterogeneous arguments.
///
/// - Register callbacks with [`subscribe`](Subject::subscribe) (untagged) or
///   [`subscribe_tagged`](Subject::subscribe_tagged). Each call returns a
///   [`Subscription`] that removes the callback again.
/// - Publish with [`notify`](Subject::notify) or
///   [`notify_tagged`](Subject::notify_tagged). Every callback registered
///   under the same tag whose parameter types are exactly the argument tuple
///   is invoked synchronously, on the calling thread, in subscription order.
///
/// All methods take `&self` and may be called from any number of threads.
/// Subscribing and unsubscribing copy the registry and publish the copy, so a
/// notification always works on one complete snapshot: changes committed
/// while it runs are invisible to it and visible to the next one. Callbacks may
/// subscribe and unsubscribe freely; no lock is held while they run.
///
/// A subject can be moved freely. Subscriptions never point at the subject
/// itself, only (weakly) at its internal state, and become no-ops once the
/// subject is dropped.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
/// use herald::Subject;
///
/// let total = Arc::new(AtomicI32::new(0));
/// let subject = Subject::<String>::new();
///
/// let sum = total.clone();
/// let sub = subject.subscribe(move |x: i32| {
///     sum.fetch_add(x, Ordering::SeqCst);
/// });
///
/// subject.notify((5,));
/// subject.notify((5.0,));  // (f64,) does not match (i32,)
/// assert_eq!(total.load(Ordering::SeqCst), 5);
///
/// sub.unsubscribe();
/// subject.notify((5,));
/// assert_eq!(total.load(Ordering::SeqCst), 5);
/// ```
pub struct Subject<T: Tag = String> {
    shared: Arc<Shared<T>>,
}

impl<T: Tag> Subject<T> {
    /// Create an empty subject with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty subject with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            shared: Arc::new(Shared::new(config)),
        }
    }

    /// Subscribe to untagged notifications.
    ///
    /// Same as [`subscribe_tagged`](Subject::subscribe_tagged) with `T::default()`.
    pub fn subscribe<Args, F>(&self, callback: F) -> Subscription
    where
        Args: Arguments,
        F: Callback<Args>,
    {
        self.subscribe_tagged(T::default(), callback)
    }

    /// Subscribe to notifications carrying `tag`.
    ///
    /// The callback is invoked by every later notification with an equal tag
    /// and an argument tuple of exactly its parameter types.
    pub fn subscribe_tagged<Args, F>(&self, tag: impl Into<T>, callback: F) -> Subscription
    where
        Args: Arguments,
        F: Callback<Args>,
    {
        let tag = tag.into();
        let id = self.shared.insert(tag.clone(), callback);
        let shared = Arc::downgrade(&self.shared);

        Subscription::new(move || match shared.upgrade() {
            Some(shared) => {
                shared.remove(&tag, id);
            }
            None => trace!(tag = ?tag, id, "Subject already dropped, nothing to unsubscribe"),
        })
    }

    /// Notify untagged subscribers.
    ///
    /// Same as [`notify_tagged`](Subject::notify_tagged) with `T::default()`.
    pub fn notify<Args: Arguments>(&self, args: Args) {
        self.notify_tagged(&T::default(), args);
    }

    /// Notify the subscribers of `tag` whose signature is exactly `Args`.
    ///
    /// Unknown tags and unmatched signatures are silently ignored. A panicking
    /// callback follows the configured [`PanicPolicy`](crate::PanicPolicy).
    pub fn notify_tagged<Q, Args>(&self, tag: &Q, args: Args)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
        Args: Arguments,
    {
        // Panics were logged one by one in isolate mode.
        let _ = self.try_notify_tagged(tag, args);
    }

    /// Like [`notify`](Subject::notify), returning the number of callbacks invoked.
    pub fn try_notify<Args: Arguments>(&self, args: Args) -> Result<usize> {
        self.try_notify_tagged(&T::default(), args)
    }

    /// Like [`notify_tagged`](Subject::notify_tagged), returning the number of
    /// callbacks invoked.
    ///
    /// # Errors
    ///
    /// [`Error::CallbackPanicked`] if the subject isolates panics and at least
    /// one callback panicked. All matching callbacks were still invoked.
    pub fn try_notify_tagged<Q, Args>(&self, tag: &Q, args: Args) -> Result<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
        Args: Arguments,
    {
        let config = &self.shared.config;
        let snapshot = self.shared.snapshot();
        let Some(callables) = snapshot.get(tag) else {
            debug!(subject = %config.name, tag = ?tag, "No subscribers for tag");
            return Ok(0);
        };

        let outcome = callables.invoke_all(&args, config.panic_policy);
        trace!(
            subject = %config.name,
            tag = ?tag,
            signature = %Signature::of::<Args>(),
            invoked = outcome.invoked,
            "Notified"
        );

        if outcome.panicked > 0 {
            return Err(Error::CallbackPanicked {
                invoked: outcome.invoked,
                panicked: outcome.panicked,
            });
        }
        Ok(outcome.invoked)
    }

    /// Number of callbacks currently subscribed under `tag`, of any signature.
    pub fn subscriber_count<Q>(&self, tag: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shared.snapshot().get(tag).map_or(0, |c| c.len())
    }

    /// Number of tags with at least one subscribed callback.
    ///
    /// A tag stops counting as soon as its last callback is unsubscribed.
    pub fn tag_count(&self) -> usize {
        self.shared.snapshot().len()
    }

    /// Whether no callback is subscribed under any tag.
    pub fn is_empty(&self) -> bool {
        self.shared.snapshot().is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

impl<T: Tag> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tag> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("shared", &self.shared)
            .finish()
    }
}
