//! Decision functions: what to store at the end of a key chain.

use crate::Value;

/// Proof that a decision function may cancel.
///
/// Returning [`CancelToken::cancel`] (or [`Decision::Cancel`]) leaves the
/// structure untouched at this position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelToken {
    _private: (),
}

impl CancelToken {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }

    /// The cancelling outcome.
    pub fn cancel(self) -> Decision {
        Decision::Cancel
    }
}

/// What a decision function sees.
#[derive(Clone, Debug)]
pub struct DecisionContext {
    /// The stored value, or the configured `not_found` placeholder when the
    /// key is absent (`None` unless one was configured).
    pub current: Option<Value>,
    /// Whether the key was present.
    pub found: bool,
    /// Token for cancelling the edit.
    pub cancel: CancelToken,
}

impl DecisionContext {
    pub(crate) fn found(current: Value) -> Self {
        Self {
            current: Some(current),
            found: true,
            cancel: CancelToken::new(),
        }
    }

    pub(crate) fn missing(placeholder: Option<Value>) -> Self {
        Self {
            current: placeholder,
            found: false,
            cancel: CancelToken::new(),
        }
    }

    /// Shorthand for `self.cancel.cancel()`.
    pub fn cancel(&self) -> Decision {
        self.cancel.cancel()
    }
}

/// The outcome of a decision function.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Store this value.
    Commit(Value),
    /// Change nothing.
    Cancel,
}

impl Decision {
    /// Store `value`.
    pub fn commit(value: impl Into<Value>) -> Self {
        Decision::Commit(value.into())
    }
}

/// A decision that ignores its context and always commits `value`.
///
/// ```
/// use deepedit::{Value, constant, edit};
///
/// let root = Value::map([]);
/// edit(&root, "key", constant("value")).unwrap();
/// assert_eq!(root.get("key"), Some(Value::from("value")));
/// ```
pub fn constant(value: impl Into<Value>) -> impl FnMut(DecisionContext) -> Decision {
    let value = value.into();
    move |_| Decision::Commit(value.clone())
}
