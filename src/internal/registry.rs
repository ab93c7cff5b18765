use std::{borrow::Borrow, collections::HashMap, fmt, hash::Hash};

use super::{CallbackId, Callables};
use crate::Tag;

/// One immutable version of "who is subscribed to what".
///
/// Published snapshots are never mutated; writers clone the current one,
/// change the clone and publish it in its place.
///
/// Only tags with at least one callback have a collection.
#[derive(Clone)]
pub(crate) struct Registry<T: Tag> {
    collections: HashMap<T, Callables>,
}

impl<T: Tag> Registry<T> {
    pub fn get<Q>(&self, tag: &Q) -> Option<&Callables>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.collections.get(tag)
    }

    pub fn contains(&self, tag: &T, id: CallbackId) -> bool {
        self.get(tag).is_some_and(|c| c.contains(id))
    }

    /// Collection for `tag`, created empty if the tag is new.
    pub fn collection_mut(&mut self, tag: T) -> &mut Callables {
        self.collections.entry(tag).or_default()
    }

    /// Removes callback `id` from `tag`, dropping the collection once empty.
    pub fn remove(&mut self, tag: &T, id: CallbackId) -> bool {
        let Some(collection) = self.collections.get_mut(tag) else {
            return false;
        };
        let removed = collection.remove(id);
        if collection.is_empty() {
            self.collections.remove(tag);
        }
        removed
    }

    /// Number of tags with at least one callback.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl<T: Tag> Default for Registry<T> {
    fn default() -> Self {
        Self {
            collections: HashMap::new(),
        }
    }
}

impl<T: Tag> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.collections.iter()).finish()
    }
}
