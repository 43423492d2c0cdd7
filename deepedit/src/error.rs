//! The error type shared by every edit operation.

use std::sync::Arc;

use crate::{Kind, Shape};

/// Errors raised while editing.
///
/// All of them propagate straight out of [`edit_one`](crate::edit_one); in
/// batch mode the first error stops the remaining chains.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum EditError {
    /// Tried to write a key into a value that is not a container.
    TypeMismatch {
        /// The key being written.
        key: String,
        /// Type name of the value written into.
        found: String,
    },

    /// Nothing changed and the caller asked for an error in that case.
    NoChange(Arc<dyn core::error::Error + Send + Sync>),

    /// A kind name with no registered shape was asked to be built.
    UnknownKind(Kind),

    /// No kind was configured for a missing ancestor and the root is not a
    /// container whose kind could be reused.
    Unconstructible {
        /// Depth of the missing ancestor.
        depth: usize,
        /// Type name of the root.
        found: String,
    },

    /// The key cannot address anything in a container of this kind, such as
    /// a string index into a list or a primitive key into an identity map.
    InvalidKey {
        /// The offending key.
        key: String,
        /// Kind of the container.
        kind: Kind,
    },

    /// A list write lies too far past the end to be padded.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the list.
        len: usize,
        /// Kind of the container.
        kind: Kind,
    },

    /// A kind is registered with one shape but its storage has another.
    KindMismatch {
        /// Kind of the container.
        kind: Kind,
        /// Shape the registry assigns to the kind.
        registered: Shape,
        /// Shape of the container's storage.
        stored: Shape,
    },
}

impl EditError {
    /// Wrap a caller error as the "nothing changed" error.
    pub fn no_change(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        EditError::NoChange(Arc::new(err))
    }
}

impl core::fmt::Display for EditError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EditError::TypeMismatch { key, found } => {
                write!(
                    f,
                    "cannot write key {key} into a non-container value ({found})"
                )
            }
            EditError::NoChange(err) => write!(f, "no change was made: {err}"),
            EditError::UnknownKind(kind) => {
                write!(f, "unknown container kind `{kind}`")
            }
            EditError::Unconstructible { depth, found } => {
                write!(f, "cannot construct an ancestor at depth {depth}: ")?;
                write!(f, "root is not a container ({found})")
            }
            EditError::InvalidKey { key, kind } => {
                write!(f, "key {key} cannot address an entry of kind {kind}")
            }
            EditError::IndexOutOfRange { index, len, kind } => {
                write!(f, "cannot pad {kind} of length {len} out to index {index}")
            }
            EditError::KindMismatch {
                kind,
                registered,
                stored,
            } => {
                write!(
                    f,
                    "kind `{kind}` is registered as a {registered} but stores a {stored}"
                )
            }
        }
    }
}

impl core::error::Error for EditError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EditError::NoChange(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
