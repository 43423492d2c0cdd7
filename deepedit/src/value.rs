//! The dynamic `Value` type edited by this crate.
//!
//! # Equality
//!
//! Two notions of equality are used when matching keys:
//!
//! | Mode     | Primitives                          | Containers                      |
//! |----------|-------------------------------------|---------------------------------|
//! | strict   | same variant, same value            | same [`Node`] (identity)        |
//! | loose    | numerically equal `Int`/`Float` too | same kind and loosely equal contents |
//!
//! Strict equality is what `PartialEq`, `Eq` and `Hash` implement, so a
//! `Value` can be used directly as an `IndexMap` key. Floats follow
//! SameValueZero: `NaN` equals `NaN` and `0.0` equals `-0.0`.
//!
//! Loose equality walks containers recursively and does not detect cycles.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};

use crate::{Container, Kind, Node, Shape, Store};

/// A dynamic value: either a primitive or a shared handle to a container.
#[derive(Clone, Default)]
pub enum Value {
    /// An explicit null. Distinct from "no value", which is `Option::None`.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A shared handle to a container.
    Node(Node),
}

impl Value {
    /// Create an `Array` holding `items`.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        Value::from(Container::new(Kind::ARRAY, Store::List(items)))
    }

    /// Create an `Object` record from `(property, value)` pairs.
    pub fn record<K: Into<String>>(props: impl IntoIterator<Item = (K, Value)>) -> Self {
        let props: IndexMap<String, Value> =
            props.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::from(Container::new(Kind::OBJECT, Store::Record(props)))
    }

    /// Create a `Map` from `(key, value)` pairs, in insertion order.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let entries: IndexMap<Value, Value> = entries.into_iter().collect();
        Value::from(Container::new(Kind::MAP, Store::Map(entries)))
    }

    /// Create a `Set` from `values`. Duplicates collapse.
    pub fn set(values: impl IntoIterator<Item = Value>) -> Self {
        let values: IndexSet<Value> = values.into_iter().collect();
        Value::from(Container::new(Kind::SET, Store::Set(values)))
    }

    /// Create an empty `WeakMap`.
    pub fn weak_map() -> Self {
        Value::from(Container::empty(Kind::WEAK_MAP, Shape::IdentityMap))
    }

    /// Returns the container handle, if this is a container.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns `true` if this value is a container (anything a key can be written into).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    /// Returns `true` if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of this value's type: a primitive name, or the container's kind name.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Float(_) => Cow::Borrowed("float"),
            Value::String(_) => Cow::Borrowed("string"),
            Value::Node(node) => Cow::Owned(String::from(node.kind().name())),
        }
    }

    /// Strictly look up `key` in this value.
    ///
    /// Returns `None` for non-containers and missing keys.
    pub fn get(&self, key: impl Into<Value>) -> Option<Value> {
        crate::lookup(self, &key.into(), crate::LookupOptions::default()).into_value()
    }

    /// Number of entries, if this is a container.
    pub fn size(&self) -> Option<usize> {
        self.as_node().map(|node| node.borrow().len())
    }

    /// Deep structural equality.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Node(a), Value::Node(b)) => {
                a.ptr_eq(b) || a.borrow().loose_eq(&b.borrow())
            }
            _ => self == other,
        }
    }
}

fn same_value_zero(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => same_value_zero(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => canonical_bits(*f).hash(state),
            Value::String(s) => s.hash(state),
            Value::Node(node) => node.hash(state),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Node(node) => Debug::fmt(node, f),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Node(node) => Display::fmt(&*node.borrow(), f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        Value::Node(node.clone())
    }
}

impl From<Container> for Value {
    fn from(container: Container) -> Self {
        Value::Node(Node::new(container))
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}
