//! Kind names, the five container shapes, and the registry between them.
//!
//! A [`Kind`] is the name a container carries (`Array`, `Map`, or anything a
//! caller invents, such as `Int32Array`). A [`Shape`] is one of the five
//! storage behaviours the setter knows how to write into. The
//! [`KindRegistry`] maps the former onto the latter; it is consulted both to
//! recognize an existing container and to build a new one for a kind name.

use core::fmt::{self, Debug, Display, Formatter};
use std::borrow::Cow;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{Container, EditError, Value};

/// The name of a container kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    /// Ordered, integer-indexed list.
    pub const ARRAY: Kind = Kind(Cow::Borrowed("Array"));
    /// Property bag with string keys.
    pub const OBJECT: Kind = Kind(Cow::Borrowed("Object"));
    /// Key/value map with arbitrary keys.
    pub const MAP: Kind = Kind(Cow::Borrowed("Map"));
    /// Map keyed by container identity.
    pub const WEAK_MAP: Kind = Kind(Cow::Borrowed("WeakMap"));
    /// Insertion-ordered set of unique values.
    pub const SET: Kind = Kind(Cow::Borrowed("Set"));

    /// A kind with an arbitrary name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Kind(name.into())
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Kind {
    fn from(name: &'static str) -> Self {
        Kind(Cow::Borrowed(name))
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind(Cow::Owned(name))
    }
}

/// The storage behaviour of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Integer-indexed; writes replace or extend.
    List,
    /// Arbitrary keys matched by equality.
    Map,
    /// Container keys matched by identity; not enumerable.
    IdentityMap,
    /// Unique values; "keys" are ordinal positions.
    Set,
    /// String-keyed property bag.
    Record,
}

impl Shape {
    /// The built-in kind with this shape.
    pub fn builtin_kind(self) -> Kind {
        match self {
            Shape::List => Kind::ARRAY,
            Shape::Map => Kind::MAP,
            Shape::IdentityMap => Kind::WEAK_MAP,
            Shape::Set => Kind::SET,
            Shape::Record => Kind::OBJECT,
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::List => "list",
            Shape::Map => "map",
            Shape::IdentityMap => "identity map",
            Shape::Set => "set",
            Shape::Record => "record",
        })
    }
}

/// Maps kind names to shapes.
///
/// A fresh registry recognizes the five built-in kinds. Callers extend it so
/// their own kinds are treated as list-, map-, set- or identity-map-like.
#[derive(Clone, Debug)]
pub struct KindRegistry {
    shapes: IndexMap<Kind, Shape>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KindRegistry {
    /// A registry recognizing only the built-in kinds.
    pub fn new() -> Self {
        let shapes = [
            Shape::List,
            Shape::Record,
            Shape::Map,
            Shape::IdentityMap,
            Shape::Set,
        ]
        .into_iter()
        .map(|shape| (shape.builtin_kind(), shape))
        .collect();
        Self { shapes }
    }

    /// Treat `kind` as having `shape`. Re-registering a kind replaces its shape.
    pub fn register(&mut self, kind: impl Into<Kind>, shape: Shape) {
        self.shapes.insert(kind.into(), shape);
    }

    /// The shape registered for `kind`, if any.
    pub fn shape_of(&self, kind: &Kind) -> Option<Shape> {
        self.shapes.get(kind).copied()
    }

    /// Recognize a value: the registered shape of its kind, or `None` for
    /// non-containers and unregistered kinds.
    pub fn classify(&self, value: &Value) -> Option<Shape> {
        value.as_node().and_then(|node| self.shape_of(&node.kind()))
    }

    /// Build an empty container of `kind`.
    pub fn instantiate(&self, kind: &Kind) -> Result<Value, EditError> {
        let shape = self
            .shape_of(kind)
            .ok_or_else(|| EditError::UnknownKind(kind.clone()))?;
        Ok(Value::from(Container::empty(kind.clone(), shape)))
    }
}

/// How to obtain a new ancestor container: by kind name, or from a factory.
#[derive(Clone)]
pub enum KindSpec {
    /// Instantiate this kind through the registry.
    Name(Kind),
    /// Call this zero-argument factory.
    Factory(Rc<dyn Fn() -> Value>),
}

impl KindSpec {
    /// A spec backed by a factory closure.
    pub fn factory(f: impl Fn() -> Value + 'static) -> Self {
        KindSpec::Factory(Rc::new(f))
    }

    pub(crate) fn build(&self, registry: &KindRegistry) -> Result<Value, EditError> {
        match self {
            KindSpec::Name(kind) => registry.instantiate(kind),
            KindSpec::Factory(f) => Ok(f()),
        }
    }
}

impl Debug for KindSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KindSpec::Name(kind) => f.debug_tuple("Name").field(kind).finish(),
            KindSpec::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<Kind> for KindSpec {
    fn from(kind: Kind) -> Self {
        KindSpec::Name(kind)
    }
}

impl From<&'static str> for KindSpec {
    fn from(name: &'static str) -> Self {
        KindSpec::Name(Kind::from(name))
    }
}

impl From<Shape> for KindSpec {
    fn from(shape: Shape) -> Self {
        KindSpec::Name(shape.builtin_kind())
    }
}
