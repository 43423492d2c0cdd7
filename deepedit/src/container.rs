//! Containers and their storage.

use core::fmt::{self, Display, Formatter};
use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::key::{ordinal, property_name};
use crate::node::WeakNode;
use crate::{EditError, Kind, Lookup, LookupOptions, Node, Shape, Value};

/// Most `Null` slots a list write may add to reach an index past the end.
///
/// Writing further out fails with [`EditError::IndexOutOfRange`].
pub const MAX_LIST_PADDING: usize = 1 << 20;

/// A mutable container: a kind name plus storage of one of the five shapes.
#[derive(Clone)]
pub struct Container {
    kind: Kind,
    store: Store,
}

/// Storage of a container, one variant per [`Shape`].
#[derive(Clone)]
pub enum Store {
    /// Elements in index order.
    List(Vec<Value>),
    /// Entries in insertion order, keyed by strict equality.
    Map(IndexMap<Value, Value>),
    /// Entries keyed by container identity.
    IdentityMap(IdentityMap),
    /// Unique values in insertion order.
    Set(IndexSet<Value>),
    /// Properties in insertion order.
    Record(IndexMap<String, Value>),
}

impl Store {
    /// Empty storage of `shape`.
    pub fn empty(shape: Shape) -> Self {
        match shape {
            Shape::List => Store::List(Vec::new()),
            Shape::Map => Store::Map(IndexMap::new()),
            Shape::IdentityMap => Store::IdentityMap(IdentityMap::new()),
            Shape::Set => Store::Set(IndexSet::new()),
            Shape::Record => Store::Record(IndexMap::new()),
        }
    }

    /// The shape this storage implements.
    pub fn shape(&self) -> Shape {
        match self {
            Store::List(_) => Shape::List,
            Store::Map(_) => Shape::Map,
            Store::IdentityMap(_) => Shape::IdentityMap,
            Store::Set(_) => Shape::Set,
            Store::Record(_) => Shape::Record,
        }
    }
}

impl Container {
    /// A container of `kind` over existing storage.
    pub fn new(kind: Kind, store: Store) -> Self {
        Self { kind, store }
    }

    /// An empty container of `kind` with storage of `shape`.
    pub fn empty(kind: Kind, shape: Shape) -> Self {
        Self::new(kind, Store::empty(shape))
    }

    /// The kind name.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The storage shape.
    pub fn shape(&self) -> Shape {
        self.store.shape()
    }

    /// Read access to the storage.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Write access to the storage.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Number of entries. Identity maps count only entries whose key is alive.
    pub fn len(&self) -> usize {
        match &self.store {
            Store::List(items) => items.len(),
            Store::Map(entries) => entries.len(),
            Store::IdentityMap(entries) => entries.len(),
            Store::Set(values) => values.len(),
            Store::Record(props) => props.len(),
        }
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn lookup(&self, key: &Value, options: LookupOptions) -> Lookup {
        match &self.store {
            Store::List(items) => match ordinal(key, items.len(), options.loose) {
                Some(i) if i < items.len() => Lookup::found(Value::from(i), items[i].clone()),
                _ => Lookup::NotFound,
            },
            Store::Set(values) => match ordinal(key, values.len(), options.loose) {
                Some(i) if i < values.len() => Lookup::found(Value::from(i), values[i].clone()),
                _ => Lookup::NotFound,
            },
            Store::Map(entries) if options.loose => {
                let matches = |(k, _): &(&Value, &Value)| k.loose_eq(key);
                let hit = if options.reverse {
                    entries.iter().rev().find(matches)
                } else {
                    entries.iter().find(matches)
                };
                match hit {
                    Some((k, v)) => Lookup::found(k.clone(), v.clone()),
                    None => Lookup::NotFound,
                }
            }
            Store::Map(entries) => match entries.get_key_value(key) {
                Some((k, v)) => Lookup::found(k.clone(), v.clone()),
                None => Lookup::NotFound,
            },
            Store::IdentityMap(entries) => match key.as_node().and_then(|n| entries.get(n)) {
                Some(v) => Lookup::found(key.clone(), v.clone()),
                None => Lookup::NotFound,
            },
            Store::Record(props) => {
                let hit = property_name(key).and_then(|name| props.get_key_value(&name));
                match hit {
                    Some((k, v)) => Lookup::found(Value::from(k.as_str()), v.clone()),
                    None => Lookup::NotFound,
                }
            }
        }
    }

    /// Write `value` at `key`, treating the storage as `shape`.
    ///
    /// Fails with [`EditError::KindMismatch`] when the storage is not of `shape`.
    pub(crate) fn write_as(
        &mut self,
        shape: Shape,
        key: Value,
        value: Value,
        loose: bool,
    ) -> Result<(), EditError> {
        let Container { kind, store } = self;
        match (shape, store) {
            (Shape::List, Store::List(items)) => {
                let Some(index) = ordinal(&key, items.len(), loose) else {
                    return Err(invalid_key(&key, kind));
                };
                if index < items.len() {
                    items[index] = value;
                    return Ok(());
                }
                let gap = index - items.len();
                if gap > MAX_LIST_PADDING || items.try_reserve(gap + 1).is_err() {
                    return Err(EditError::IndexOutOfRange {
                        index,
                        len: items.len(),
                        kind: kind.clone(),
                    });
                }
                items.resize(index, Value::Null);
                items.push(value);
            }
            (Shape::Map, Store::Map(entries)) => {
                entries.insert(key, value);
            }
            (Shape::IdentityMap, Store::IdentityMap(entries)) => {
                let Value::Node(node) = &key else {
                    return Err(invalid_key(&key, kind));
                };
                entries.insert(node, value);
            }
            (Shape::Set, Store::Set(values)) => {
                let Some(index) = ordinal(&key, values.len(), loose) else {
                    return Err(invalid_key(&key, kind));
                };
                // Rebuild in order; a value equal to a surviving one collapses into it.
                let mut ordered: Vec<Value> = values.drain(..).collect();
                if index < ordered.len() {
                    ordered[index] = value;
                } else {
                    ordered.push(value);
                }
                values.extend(ordered);
            }
            (Shape::Record, Store::Record(props)) => {
                let name = property_name(&key).ok_or_else(|| invalid_key(&key, kind))?;
                props.insert(name, value);
            }
            (registered, store) => {
                return Err(EditError::KindMismatch {
                    kind: kind.clone(),
                    registered,
                    stored: store.shape(),
                });
            }
        }
        Ok(())
    }

    /// Write through the storage's own shape.
    pub(crate) fn assign(
        &mut self,
        key: Value,
        value: Value,
        loose: bool,
    ) -> Result<(), EditError> {
        let shape = self.shape();
        self.write_as(shape, key, value, loose)
    }

    pub(crate) fn loose_eq(&self, other: &Container) -> bool {
        if self.kind != other.kind || self.len() != other.len() {
            return false;
        }
        match (&self.store, &other.store) {
            (Store::List(a), Store::List(b)) => a.iter().zip(b).all(|(x, y)| x.loose_eq(y)),
            (Store::Record(a), Store::Record(b)) => a.iter().all(|(k, v)| has_prop(b, k, v)),
            (Store::Map(a), Store::Map(b)) => a.iter().all(|(k, v)| has_entry(b, k, v)),
            (Store::Set(a), Store::Set(b)) => a.iter().all(|x| b.iter().any(|y| x.loose_eq(y))),
            // Identity maps cannot be enumerated, so only identity makes them equal.
            _ => false,
        }
    }
}

fn invalid_key(key: &Value, kind: &Kind) -> EditError {
    EditError::InvalidKey {
        key: key.to_string(),
        kind: kind.clone(),
    }
}

fn has_prop(props: &IndexMap<String, Value>, name: &str, value: &Value) -> bool {
    props.get(name).is_some_and(|v| v.loose_eq(value))
}

fn has_entry(entries: &IndexMap<Value, Value>, key: &Value, value: &Value) -> bool {
    entries
        .iter()
        .any(|(k, v)| k.loose_eq(key) && v.loose_eq(value))
}

impl Display for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.kind != self.shape().builtin_kind()
            || matches!(self.shape(), Shape::Map | Shape::Set | Shape::IdentityMap)
        {
            write!(f, "{} ", self.kind)?;
        }
        match &self.store {
            Store::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Store::Record(props) => {
                f.write_str("{")?;
                for (i, (k, v)) in props.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Store::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Store::Set(values) => {
                f.write_str("{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
            Store::IdentityMap(_) => f.write_str("{..}"),
        }
    }
}

/// Entries keyed by container identity.
///
/// Keys are held weakly and the map cannot be enumerated: a value is reachable
/// only through the very [`Node`] it was stored under. Entries whose key has
/// been dropped are pruned on the next insert.
#[derive(Clone, Default)]
pub struct IdentityMap {
    entries: HashMap<usize, (WeakNode, Value)>,
}

impl IdentityMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &Node) -> Option<&Value> {
        self.entries.get(&key.address()).map(|(_, v)| v)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains(&self, key: &Node) -> bool {
        self.entries.contains_key(&key.address())
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: &Node, value: Value) -> Option<Value> {
        self.entries.retain(|_, (k, _)| k.is_alive());
        self.entries
            .insert(key.address(), (key.downgrade(), value))
            .map(|(_, v)| v)
    }

    /// Remove the value stored under `key`.
    pub fn remove(&mut self, key: &Node) -> Option<Value> {
        self.entries.remove(&key.address()).map(|(_, v)| v)
    }

    /// Number of entries whose key is still alive.
    pub fn len(&self) -> usize {
        self.entries.values().filter(|(k, _)| k.is_alive()).count()
    }

    /// Returns `true` if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
