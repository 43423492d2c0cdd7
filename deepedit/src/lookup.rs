//! Key lookup: find the value stored under a key, strictly or loosely.

use crate::Value;

/// How keys are matched during lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Match keys by structural equality rather than identity.
    pub loose: bool,
    /// With `loose`, prefer the last matching entry over the first.
    pub reverse: bool,
}

/// Outcome of a lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    /// The key is present.
    Found {
        /// The key as stored in the container. Under loose matching this may
        /// differ from the key that was asked for.
        key: Value,
        /// The stored value.
        value: Value,
    },
    /// The key is absent, or the target is not a container.
    NotFound,
}

impl Lookup {
    pub(crate) fn found(key: Value, value: Value) -> Self {
        Lookup::Found { key, value }
    }

    /// Returns `true` if the key was present.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }

    /// The stored value, if found.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Found { value, .. } => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Look up `key` in `target`.
///
/// Per shape:
///
/// - list and set: `key` is a position (`"last"` is the final one)
/// - map: strict hash lookup, or a scan in insertion order under `loose`
///   (from the end with `reverse`)
/// - identity map: `key` must be the very container stored as key
/// - record: `key` is stringified into a property name
///
/// Non-containers never contain anything.
pub fn lookup(target: &Value, key: &Value, options: LookupOptions) -> Lookup {
    match target {
        Value::Node(node) => node.borrow().lookup(key, options),
        _ => Lookup::NotFound,
    }
}

/// The key actually stored in `target` that `key` matches, or `key` itself.
///
/// Writing through the normalized key updates an existing loose match rather
/// than inserting a lookalike next to it.
pub fn normalize_key(target: &Value, key: &Value, options: LookupOptions) -> Value {
    match lookup(target, key, options) {
        Lookup::Found { key, .. } => key,
        Lookup::NotFound => key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LAST, list, map, record};

    fn strict() -> LookupOptions {
        LookupOptions::default()
    }

    fn loose(reverse: bool) -> LookupOptions {
        LookupOptions {
            loose: true,
            reverse,
        }
    }

    #[test]
    fn list_lookup_by_index_and_last() {
        let v = list!["a", "b", "c"];
        let second = lookup(&v, &Value::Int(1), strict());
        assert_eq!(second.into_value(), Some(Value::from("b")));
        let last = lookup(&v, &Value::from(LAST), strict());
        assert_eq!(last.into_value(), Some(Value::from("c")));
        assert_eq!(lookup(&v, &Value::Int(3), strict()), Lookup::NotFound);
    }

    #[test]
    fn last_on_empty_list_is_not_found() {
        let last = Value::from(LAST);
        assert_eq!(lookup(&list![], &last, strict()), Lookup::NotFound);
    }

    #[test]
    fn map_lookup_is_strict_by_default() {
        let key = record! { "key" => true };
        let lookalike = record! { "key" => true };
        let m = map! { key.clone() => 1 };
        assert!(lookup(&m, &key, strict()).is_found());
        assert!(!lookup(&m, &lookalike, strict()).is_found());
        assert!(lookup(&m, &lookalike, loose(false)).is_found());
    }

    #[test]
    fn loose_lookup_picks_first_or_last_match() {
        let key1 = record! { "key" => true };
        let key2 = record! { "key" => true };
        let m = map! { key1.clone() => 1, key2.clone() => 2 };
        let wanted = record! { "key" => true };

        match lookup(&m, &wanted, loose(false)) {
            Lookup::Found { key, value } => {
                assert_eq!(key, key1);
                assert_eq!(value, Value::Int(1));
            }
            Lookup::NotFound => panic!("expected a match"),
        }
        assert_eq!(normalize_key(&m, &wanted, loose(true)), key2);
    }

    #[test]
    fn record_lookup_stringifies_keys() {
        let v = record! { "1" => "one" };
        let hit = lookup(&v, &Value::Int(1), strict());
        assert_eq!(hit.into_value(), Some(Value::from("one")));
    }

    #[test]
    fn primitives_contain_nothing() {
        let s = Value::from("string");
        assert_eq!(lookup(&s, &Value::from("len"), strict()), Lookup::NotFound);
        let key = normalize_key(&Value::Null, &Value::Int(0), strict());
        assert_eq!(key, Value::Int(0));
    }
}
