use std::{
    any::Any,
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use tracing::{error, warn};

use crate::{Arguments, Callback, PanicPolicy, Signature};

pub(crate) type CallbackId = u64;

#[derive(Clone)]
struct Entry {
    id: CallbackId,
    signature: Signature,
    /// Holds a `Box<dyn Callback<Args>>` for the `Args` described by `signature`.
    callback: Arc<dyn Any + Send + Sync>,
}

/// Outcome of a fan-out over one collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub invoked: usize,
    pub panicked: usize,
}

/// Callbacks of heterogeneous signatures, kept in insertion order.
///
/// Ids are allocated by the owning subject, so they stay unique even when an
/// emptied collection is dropped and later recreated for the same tag.
///
/// Not synchronized: the subject only mutates private copies under its writer
/// lock and publishes them afterwards. Cloning is shallow; callbacks are shared
/// between the copies.
#[derive(Clone, Default)]
pub(crate) struct Callables {
    entries: Vec<Entry>,
}

impl Callables {
    pub fn insert<Args, F>(&mut self, id: CallbackId, callback: F)
    where
        Args: Arguments,
        F: Callback<Args>,
    {
        debug_assert!(!self.contains(id), "callback id {id} allocated twice");
        let callback: Box<dyn Callback<Args>> = Box::new(callback);
        self.entries.push(Entry {
            id,
            signature: Signature::of::<Args>(),
            callback: Arc::new(callback),
        });
    }

    pub fn remove(&mut self, id: CallbackId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: CallbackId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls every callback registered for exactly `Args`, in insertion order.
    pub fn invoke_all<Args: Arguments>(&self, args: &Args, policy: PanicPolicy) -> Invocation {
        let signature = Signature::of::<Args>();
        let mut outcome = Invocation::default();

        for entry in self.entries.iter().filter(|e| e.signature == signature) {
            let Some(callback) = entry.callback.downcast_ref::<Box<dyn Callback<Args>>>() else {
                warn!(callback_id = entry.id, %signature, "Callback storage does not match its signature");
                continue;
            };
            outcome.invoked += 1;

            if policy.is_propagate() {
                callback.call(args);
                continue;
            }

            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback.call(args))) {
                outcome.panicked += 1;
                error!(
                    callback_id = entry.id,
                    %signature,
                    reason = panic_message(payload.as_ref()),
                    "Callback panicked, continuing"
                );
            }
        }
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

impl fmt::Debug for Callables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (e.id, e.signature)))
            .finish()
    }
}
