use crate::Arguments;

/// A function that can be subscribed to a [`Subject`](crate::Subject) for
/// notifications carrying `Args`.
///
/// Implemented for every `Fn(A1, .., An) + Send + Sync + 'static` with up to
/// eight parameters, so closures and plain functions can be passed directly.
/// `Args` is inferred from the callback's declared parameter types:
///
/// ```rust
/// use herald::Subject;
///
/// fn on_resize(width: u32, height: u32) {
///     println!("{width}x{height}");
/// }
///
/// let subject = Subject::<String>::new();
/// let _a = subject.subscribe(on_resize);                          // (u32, u32)
/// let _b = subject.subscribe(|name: String| println!("{name}"));  // (String,)
/// let _c = subject.subscribe(|| println!("tick"));                // ()
/// ```
///
/// The bounds reject callbacks a subject cannot deliver to. A callback that
/// returns a value, or one taking a mutable reference, does not implement
/// `Callback` and is refused at build time:
///
/// ```rust,compile_fail
/// let subject = herald::Subject::<String>::new();
/// let _ = subject.subscribe(|x: i32| x + 1);
/// ```
///
/// ```rust,compile_fail
/// let subject = herald::Subject::<String>::new();
/// let _ = subject.subscribe(|x: &mut i32| *x += 1);
/// ```
pub trait Callback<Args: Arguments>: Send + Sync + 'static {
    /// Invokes the callback with clones of the notified arguments.
    fn call(&self, args: &Args);
}

macro_rules! impl_callback {
    ($($arg:ident . $idx:tt),*) => {
        impl<Func, $($arg),*> Callback<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) + Send + Sync + 'static,
            $($arg: Clone + Send + Sync + 'static,)*
        {
            #[allow(unused_variables)]
            #[inline]
            fn call(&self, args: &($($arg,)*)) {
                (self)($(args.$idx.clone()),*)
            }
        }
    };
}

impl_callback!();
impl_callback!(A1 . 0);
impl_callback!(A1 . 0, A2 . 1);
impl_callback!(A1 . 0, A2 . 1, A3 . 2);
impl_callback!(A1 . 0, A2 . 1, A3 . 2, A4 . 3);
impl_callback!(A1 . 0, A2 . 1, A3 . 2, A4 . 3, A5 . 4);
impl_callback!(A1 . 0, A2 . 1, A3 . 2, A4 . 3, A5 . 4, A6 . 5);
impl_callback!(A1 . 0, A2 . 1, A3 . 2, A4 . 3, A5 . 4, A6 . 5, A7 . 6);
impl_callback!(A1 . 0, A2 . 1, A3 . 2, A4 . 3, A5 . 4, A6 . 5, A7 . 6, A8 . 7);
