//! The default setter: commit a value at a key in any recognized container.

use crate::{EditError, EditOptions, Value, debug, normalize_key};

/// Write `value` at `key` in `target`.
///
/// The key is first normalized through lookup (honoring `loose`), so an
/// existing loosely-equal key is overwritten instead of duplicated. The write
/// then dispatches on the shape the registry in `options` assigns to the
/// container's kind:
///
/// | Shape        | Write                                                      |
/// |--------------|------------------------------------------------------------|
/// | list         | index assignment; `"last"` is the final index; past-the-end pads with `null` |
/// | map          | insert or replace                                          |
/// | identity map | insert or replace; the key must be a container             |
/// | set          | replace the value at that position, keeping the others in order |
/// | record       | set the property named by the key                          |
///
/// List padding stops at [`MAX_LIST_PADDING`](crate::MAX_LIST_PADDING) slots;
/// further out is [`EditError::IndexOutOfRange`].
///
/// Containers whose kind is not registered are written through their own
/// storage, as generic keyed records. Anything else is a
/// [`EditError::TypeMismatch`].
pub fn default_set(
    target: &Value,
    key: &Value,
    value: Value,
    options: &EditOptions,
) -> Result<(), EditError> {
    let Value::Node(node) = target else {
        return Err(EditError::TypeMismatch {
            key: key.to_string(),
            found: target.type_name().into_owned(),
        });
    };

    let key = normalize_key(target, key, options.lookup);
    let shape = options.registry.classify(target);
    debug!(kind = %node.kind(), ?shape, %key, "default_set");

    let mut container = node.borrow_mut();
    match shape {
        Some(shape) => container.write_as(shape, key, value, options.lookup.loose),
        None => container.assign(key, value, options.lookup.loose),
    }
}

/// One final-key write, handed to a caller-supplied setter.
///
/// The override decides whether and how to write; [`SetCall::apply_default`]
/// performs the write [`default_set`] would have done.
pub struct SetCall<'a> {
    /// The container being written into.
    pub target: &'a Value,
    /// The final key of the chain.
    pub key: &'a Value,
    /// The value the decision function committed.
    pub value: Value,
    /// The options of the edit in progress.
    pub options: &'a EditOptions,
}

impl SetCall<'_> {
    /// Perform the default write.
    pub fn apply_default(self) -> Result<(), EditError> {
        default_set(self.target, self.key, self.value, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Kind, Shape, list, map, record};

    #[test]
    fn writes_list_by_index_and_last() {
        let v = list!["a", "b"];
        let options = EditOptions::new();
        default_set(&v, &Value::Int(0), Value::from("A"), &options).unwrap();
        default_set(&v, &Value::from("last"), Value::from("B"), &options).unwrap();
        assert_eq!(v.to_string(), r#"["A", "B"]"#);
    }

    #[test]
    fn loose_write_reuses_the_existing_key() {
        let key = record! { "id" => 1 };
        let v = map! { key.clone() => "old" };
        let options = EditOptions::new().loose(true);
        default_set(&v, &record! { "id" => 1 }, Value::from("new"), &options).unwrap();
        assert_eq!(v.size(), Some(1));
        assert_eq!(v.get(key), Some(Value::from("new")));
    }

    #[test]
    fn strict_write_inserts_a_lookalike() {
        let v = map! { record! { "id" => 1 } => "old" };
        let lookalike = record! { "id" => 1 };
        default_set(&v, &lookalike, Value::from("new"), &EditOptions::new()).unwrap();
        assert_eq!(v.size(), Some(2));
    }

    #[test]
    fn primitives_reject_writes() {
        let err = default_set(
            &Value::from("string"),
            &Value::from("key"),
            Value::Null,
            &EditOptions::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"cannot write key "key" into a non-container value (string)"#
        );
    }

    #[test]
    fn unregistered_kinds_write_through_their_storage() {
        let v = Value::from(Container::empty(Kind::named("Int32Array"), Shape::List));
        default_set(&v, &Value::Int(0), Value::Int(123), &EditOptions::new()).unwrap();
        assert_eq!(v.get(0), Some(Value::Int(123)));
    }

    #[test]
    fn registry_shape_must_match_storage() {
        let v = Value::from(Container::empty(Kind::named("Bag"), Shape::Record));
        let options = EditOptions::new().sets(["Bag"]);
        let err = default_set(&v, &Value::Int(0), Value::Int(1), &options).unwrap_err();
        assert!(matches!(err, EditError::KindMismatch { .. }));
    }

    #[test]
    fn identity_map_requires_container_keys() {
        let v = Value::weak_map();
        let err = default_set(&v, &Value::from("k"), Value::Null, &EditOptions::new()).unwrap_err();
        let EditError::InvalidKey { kind, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*kind, Kind::WEAK_MAP);
    }
}
