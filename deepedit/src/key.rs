//! Key chains and key coercions.

use crate::Value;

/// Reserved list key meaning "the last element".
pub const LAST: &str = "last";

/// An ordered sequence of keys describing a path from a root container.
///
/// A single key converts into a one-element chain:
///
/// ```
/// use deepedit::KeyChain;
///
/// assert_eq!(KeyChain::from("key"), KeyChain::from(["key"]));
/// assert!(KeyChain::new().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyChain(Vec<Value>);

impl KeyChain {
    /// An empty chain. Editing with it never changes anything.
    pub fn new() -> Self {
        KeyChain(Vec::new())
    }

    /// Append a key.
    pub fn push(&mut self, key: impl Into<Value>) {
        self.0.push(key.into());
    }

    /// The keys, root first.
    pub fn keys(&self) -> &[Value] {
        &self.0
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the chain has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Value> for KeyChain {
    fn from(key: Value) -> Self {
        KeyChain(vec![key])
    }
}

impl From<&Value> for KeyChain {
    fn from(key: &Value) -> Self {
        KeyChain(vec![key.clone()])
    }
}

impl From<&str> for KeyChain {
    fn from(key: &str) -> Self {
        KeyChain(vec![Value::from(key)])
    }
}

impl From<String> for KeyChain {
    fn from(key: String) -> Self {
        KeyChain(vec![Value::from(key)])
    }
}

impl From<i64> for KeyChain {
    fn from(key: i64) -> Self {
        KeyChain(vec![Value::Int(key)])
    }
}

impl From<i32> for KeyChain {
    fn from(key: i32) -> Self {
        KeyChain(vec![Value::from(key)])
    }
}

impl From<usize> for KeyChain {
    fn from(key: usize) -> Self {
        KeyChain(vec![Value::from(key)])
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for KeyChain {
    fn from(keys: [V; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<V: Into<Value>> From<Vec<V>> for KeyChain {
    fn from(keys: Vec<V>) -> Self {
        keys.into_iter().collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for KeyChain {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        KeyChain(iter.into_iter().map(Into::into).collect())
    }
}

/// Resolve `key` to a position in a sequence of `len` elements.
///
/// The position may lie past the end; callers decide whether that is a miss
/// or an append. [`LAST`] resolves to `len - 1`, or `0` when empty. In loose
/// mode, integral floats and numeric strings are accepted too.
pub(crate) fn ordinal(key: &Value, len: usize, loose: bool) -> Option<usize> {
    match key {
        Value::Int(i) => usize::try_from(*i).ok(),
        Value::String(s) if s == LAST => Some(len.saturating_sub(1)),
        Value::Float(f) if loose => float_ordinal(*f),
        Value::String(s) if loose => s.parse().ok(),
        _ => None,
    }
}

/// A float names an index only when it is a whole number that fits a `usize`.
fn float_ordinal(f: f64) -> Option<usize> {
    let whole = f.is_finite() && f.fract() == 0.0 && f >= 0.0;
    (whole && f < usize::MAX as f64).then_some(f as usize)
}

/// The property name `key` addresses in a record, if it can address one.
pub(crate) fn property_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Node(_) => None,
    }
}
