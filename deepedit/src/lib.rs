#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod macros;

mod value;
pub use value::*;

mod node;
pub use node::Node;

mod container;
pub use container::{Container, IdentityMap, MAX_LIST_PADDING, Store};

mod kind;
pub use kind::*;

mod key;
pub use key::{KeyChain, LAST};

mod lookup;
pub use lookup::*;

mod decide;
pub use decide::*;

mod options;
pub use options::*;

mod setter;
pub use setter::*;

mod construct;

mod edit;
pub use edit::*;

mod error;
pub use error::*;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
pub(crate) use debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
