use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

/// An argument list passed to [`Subject::notify`](crate::Subject::notify).
///
/// Implemented for tuples of up to eight elements, including the unit tuple
/// `()` for notifications without arguments. Every element must be
/// `Clone + Send + Sync + 'static`: each callback receives its own clone.
///
/// The concrete tuple type is the notification's signature. A callback fires
/// only when its parameter list is *exactly* that tuple, so `(3,)` (an `i32`)
/// never reaches a callback declared as `|x: f64|` or `|x: i64|`.
pub trait Arguments: Send + Sync + 'static {
    /// Returns the descriptor used to match this argument list against callbacks.
    fn signature(&self) -> Signature
    where
        Self: Sized,
    {
        Signature::of::<Self>()
    }
}

macro_rules! impl_arguments {
    ($($arg:ident),*) => {
        impl<$($arg),*> Arguments for ($($arg,)*)
        where
            $($arg: Clone + Send + Sync + 'static,)*
        {
        }
    };
}

impl_arguments!();
impl_arguments!(A1);
impl_arguments!(A1, A2);
impl_arguments!(A1, A2, A3);
impl_arguments!(A1, A2, A3, A4);
impl_arguments!(A1, A2, A3, A4, A5);
impl_arguments!(A1, A2, A3, A4, A5, A6);
impl_arguments!(A1, A2, A3, A4, A5, A6, A7);
impl_arguments!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Runtime descriptor of an argument list.
///
/// Two signatures are equal only if they describe the very same Rust type.
/// The human-readable name is carried along for log records.
#[derive(Clone, Copy)]
pub struct Signature {
    id: TypeId,
    name: &'static str,
}

impl Signature {
    pub fn of<A: Arguments>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            name: type_name::<A>(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.name).finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
