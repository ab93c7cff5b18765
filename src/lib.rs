//! Herald - tagged, heterogeneous, thread-safe subject
//!
//! A [`Subject`] lets independent parts of a program register callbacks of
//! arbitrary argument shapes, optionally scoped by a [`Tag`], and notifies them
//! synchronously when a matching event is published. Subscribing,
//! unsubscribing and notifying can all happen concurrently without external
//! locking: notifications read an immutable snapshot of the registry, while
//! subscription changes publish a fresh copy.
//!
//! ```rust
//! use herald::Subject;
//!
//! let subject = Subject::<String>::new();
//!
//! let _greeter = subject
//!     .subscribe_tagged("greetings", |name: String| println!("Hello, {name}!"))
//!     .into_auto();
//!
//! subject.notify_tagged("greetings", ("World".to_string(),));
//! ```
//!
//! See `demos/hello-world.rs`.

mod arguments;
mod callback;
mod config;
mod error;
mod panic_policy;
mod subject;
mod subscription;
mod tag;

mod internal;

pub use arguments::{Arguments, Signature};
pub use callback::Callback;
pub use config::Config;
pub use error::Error;
pub use panic_policy::PanicPolicy;
pub use subject::Subject;
pub use subscription::{AutoUnsubscribe, Subscription};
pub use tag::Tag;

pub type Result<T = ()> = std::result::Result<T, Error>;
