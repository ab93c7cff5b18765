use std::{fmt, sync::Arc};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{CallbackId, Registry};
use crate::{Arguments, Callback, Config, Signature, Tag};

/// State shared by a subject and, weakly, by all of its subscriptions.
///
/// - `published` is the current registry snapshot. Readers load it once and
///   never lock.
/// - `writer` serializes subscribe and unsubscribe and holds the next callback
///   id. A writer copies the published snapshot, edits the copy and swaps it in
///   while holding the lock, so no update is lost and no reader sees a
///   half-edited registry.
///
/// No user code runs while `writer` is held. That includes the destructors of
/// removed callbacks: the replaced snapshot may own the last reference to one,
/// so it is released only after the lock.
pub(crate) struct Shared<T: Tag> {
    pub config: Config,
    writer: Mutex<CallbackId>,
    published: ArcSwap<Registry<T>>,
}

impl<T: Tag> Shared<T> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            writer: Mutex::new(0),
            published: ArcSwap::from_pointee(Registry::default()),
        }
    }

    /// The currently published snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<Registry<T>> {
        self.published.load_full()
    }

    pub fn insert<Args, F>(&self, tag: T, callback: F) -> CallbackId
    where
        Args: Arguments,
        F: Callback<Args>,
    {
        let mut next_id = self.writer.lock();
        let id = *next_id;
        *next_id += 1;

        let mut next = Registry::clone(&self.published.load_full());
        next.collection_mut(tag.clone()).insert::<Args, F>(id, callback);
        let previous = self.published.swap(Arc::new(next));
        drop(next_id);
        drop(previous);

        trace!(
            subject = %self.config.name,
            tag = ?tag,
            id,
            signature = %Signature::of::<Args>(),
            "Subscribed"
        );
        id
    }

    /// Removes callback `id` from `tag`'s collection, dropping the collection
    /// once it is empty.
    ///
    /// Publishes nothing and returns `false` when the tag or the id is unknown.
    pub fn remove(&self, tag: &T, id: CallbackId) -> bool {
        let guard = self.writer.lock();
        let current = self.published.load_full();
        if !current.contains(tag, id) {
            drop(guard);
            debug!(subject = %self.config.name, tag = ?tag, id, "Already unsubscribed");
            return false;
        }

        let mut next = Registry::clone(&current);
        next.remove(tag, id);
        let previous = self.published.swap(Arc::new(next));
        drop(guard);

        // Either may hold the last reference to the removed callback.
        drop(previous);
        drop(current);

        trace!(subject = %self.config.name, tag = ?tag, id, "Unsubscribed");
        true
    }
}

impl<T: Tag> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("config", &self.config)
            .field("published", &*self.published.load_full())
            .finish()
    }
}
