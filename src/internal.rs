mod callables;
mod registry;
mod shared;

pub(crate) use callables::{CallbackId, Callables};
pub(crate) use registry::Registry;
pub(crate) use shared::Shared;
