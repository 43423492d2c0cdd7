//! Edit options: ancestor construction, matching, fallbacks and overrides.

use std::cell::RefCell;
use std::rc::Rc;

use deepedit::{
    Decision, EditError, EditOptions, Kind, KindSpec, SetCall, Shape, Value, chain, constant,
    default_set, edit_one, list, map, record,
};

fn unchanged() -> std::io::Error {
    std::io::Error::other("unchanged")
}

// ---------------------------------------------------------------------------
// Ancestor kinds
// ---------------------------------------------------------------------------

#[test]
fn single_kind_by_shape() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().kind(Shape::Record);
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: "value"}}"#);
}

#[test]
fn single_kind_by_name() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().kind("Object");
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: "value"}}"#);
}

#[test]
fn kinds_per_depth_by_shape() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().types([Shape::Record, Shape::List]);
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: ["value"]}}"#);
}

#[test]
fn kinds_per_depth_by_name() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().types(["Object", "Array"]);
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: ["value"]}}"#);
}

#[test]
fn last_listed_kind_repeats() {
    deepedit_testhelpers::setup();

    let root = record! {};
    let options = EditOptions::new().types([Shape::List]);
    edit_one(&root, chain!["a", 0, 0], constant(1), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @"{a: [[1]]}");
}

#[test]
fn kind_resolver_by_shape() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().get_type(|depth| {
        if depth == 0 {
            Shape::Record.into()
        } else {
            Shape::List.into()
        }
    });
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: ["value"]}}"#);
}

#[test]
fn kind_resolver_by_name() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().get_type(|depth| {
        KindSpec::from(if depth == 0 { Kind::OBJECT } else { Kind::ARRAY })
    });
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: ["value"]}}"#);
}

#[test]
fn kind_factories() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().types([
        KindSpec::factory(|| record! { "made" => true }),
        KindSpec::factory(|| list![]),
    ]);
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {made: true, key: ["value"]}}"#);
}

#[test]
fn custom_construct() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new().construct(|depth| match depth {
        0 => record! {},
        _ => list![],
    });
    edit_one(&root, chain!["sub", "key", 0], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => {key: ["value"]}}"#);
}

#[test]
fn registered_kinds_can_be_built() {
    deepedit_testhelpers::setup();

    let root = Value::map([]);
    let options = EditOptions::new()
        .arrays(["Int32Array"])
        .kind("Int32Array");
    edit_one(&root, chain!["sub", 0], constant(7), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"Map {"sub" => Int32Array [7]}"#);
}

#[test]
fn unregistered_kinds_cannot_be_built() {
    deepedit_testhelpers::setup();

    let root = record! {};
    let options = EditOptions::new().kind("Int32Array");
    let err = edit_one(&root, ["sub", "key"], constant(1), &options).unwrap_err();
    insta::assert_snapshot!(err, @"unknown container kind `Int32Array`");
    assert_eq!(root.get("sub"), None);
}

// ---------------------------------------------------------------------------
// Ancestor policy
// ---------------------------------------------------------------------------

#[test]
fn overwrite_ancestors_replaces_primitives() {
    deepedit_testhelpers::setup();

    let root = record! { "sub" => "string" };
    let options = EditOptions::new().overwrite_ancestors(true);
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"{sub: {key: "value"}}"#);
}

#[test]
fn overwrite_ancestors_keeps_containers() {
    deepedit_testhelpers::setup();

    let sub = record! { "other" => 1 };
    let root = record! { "sub" => sub.clone() };
    let options = EditOptions::new().overwrite_ancestors(true);
    edit_one(&root, ["sub", "key"], constant(2), &options).unwrap();
    insta::assert_snapshot!(sub.to_string(), @"{other: 1, key: 2}");
}

#[test]
fn no_construct_leaves_gaps_alone() {
    deepedit_testhelpers::setup();

    let root = record! {};
    let options = EditOptions::new().no_construct();
    let result = edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    assert_eq!(result, None);
    assert_eq!(root.size(), Some(0));
}

#[test]
fn no_construct_still_writes_the_final_key() {
    deepedit_testhelpers::setup();

    let root = record! { "sub" => record! {} };
    let options = EditOptions::new().no_construct();
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"{sub: {key: "value"}}"#);
}

#[test]
fn no_construct_with_else_throw_fails() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().no_construct().else_throw(unchanged());
    let err = edit_one(&record! {}, ["sub", "key"], constant("value"), &options).unwrap_err();
    insta::assert_snapshot!(err, @"no change was made: unchanged");
}

#[test]
fn overwrite_without_construct_changes_nothing() {
    deepedit_testhelpers::setup();

    let root = record! { "sub" => "string" };
    let options = EditOptions::new().no_construct().overwrite_ancestors(true);
    let result = edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    assert_eq!(result, None);
    insta::assert_snapshot!(root.to_string(), @r#"{sub: "string"}"#);
}

// ---------------------------------------------------------------------------
// Placeholders and fallbacks
// ---------------------------------------------------------------------------

#[test]
fn not_found_placeholder_is_passed_for_missing_keys() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().not_found("absent");
    let mut seen = None;
    edit_one(
        &record! {},
        "key",
        |cx| {
            seen = Some((cx.current.clone(), cx.found));
            cx.cancel()
        },
        &options,
    )
    .unwrap();
    assert_eq!(seen, Some((Some(Value::from("absent")), false)));
}

#[test]
fn else_return_on_no_change() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().else_return(123);
    let result = edit_one(&record! {}, chain![], constant("value"), &options).unwrap();
    assert_eq!(result, Some(Value::Int(123)));
}

#[test]
fn else_throw_on_no_change() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().else_return(1).else_throw(unchanged());
    let err = edit_one(&record! {}, ["sub", "key"], |_| Decision::Cancel, &options).unwrap_err();
    let EditError::NoChange(source) = &err else {
        panic!("expected NoChange, got {err:?}");
    };
    assert_eq!(source.to_string(), "unchanged");
    assert!(core::error::Error::source(&err).is_some());
}

#[test]
fn else_throw_only_on_no_change() {
    deepedit_testhelpers::setup();

    let root = record! {};
    let options = EditOptions::new().else_throw(unchanged());
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"{sub: {key: "value"}}"#);
}

#[test]
fn cancel_on_found_key_is_not_a_no_change() {
    deepedit_testhelpers::setup();

    let root = record! { "key" => "value" };
    let options = EditOptions::new().else_throw(unchanged());
    let result = edit_one(&root, "key", |cx| cx.cancel(), &options).unwrap();
    assert_eq!(result, Some(Value::from("value")));
}

// ---------------------------------------------------------------------------
// Loose matching
// ---------------------------------------------------------------------------

#[test]
fn loose_matches_first_equal_key() {
    deepedit_testhelpers::setup();

    let key1 = record! { "key" => true };
    let key2 = record! { "key" => true };
    let root = map! { key1.clone() => 1, key2.clone() => 2 };
    assert_eq!(root.size(), Some(2));

    let options = EditOptions::new().loose(true);
    edit_one(&root, record! { "key" => true }, constant(3), &options).unwrap();
    assert_eq!(root.size(), Some(2));
    assert_eq!(root.get(&key1), Some(Value::Int(3)));
    assert_eq!(root.get(&key2), Some(Value::Int(2)));
}

#[test]
fn loose_reverse_matches_last_equal_key() {
    deepedit_testhelpers::setup();

    let key1 = record! { "key" => true };
    let key2 = record! { "key" => true };
    let root = map! { key1.clone() => 1, key2.clone() => 2 };

    let options = EditOptions::new().loose(true).reverse(true);
    edit_one(&root, record! { "key" => true }, constant(3), &options).unwrap();
    assert_eq!(root.size(), Some(2));
    assert_eq!(root.get(&key1), Some(Value::Int(1)));
    assert_eq!(root.get(&key2), Some(Value::Int(3)));
}

#[test]
fn strict_matching_inserts_a_lookalike() {
    deepedit_testhelpers::setup();

    let key1 = record! { "key" => true };
    let root = map! { key1.clone() => 1 };
    let lookalike = record! { "key" => true };
    edit_one(&root, lookalike, constant(3), &EditOptions::new()).unwrap();
    assert_eq!(root.size(), Some(2));
    assert_eq!(root.get(&key1), Some(Value::Int(1)));
}

#[test]
fn loose_numbers_match_across_int_and_float() {
    deepedit_testhelpers::setup();

    let root = Value::map([(Value::Int(1), Value::from("int"))]);
    let options = EditOptions::new().loose(true);
    let mut seen = None;
    edit_one(
        &root,
        Value::Float(1.0),
        |cx| {
            seen = cx.current.clone();
            Decision::commit("float")
        },
        &options,
    )
    .unwrap();
    assert_eq!(seen, Some(Value::from("int")));
    assert_eq!(root.size(), Some(1));
    assert_eq!(root.get(1), Some(Value::from("float")));
}

#[test]
fn loose_lists_accept_numeric_strings() {
    deepedit_testhelpers::setup();

    let root = list!["a"];
    let options = EditOptions::new().loose(true);
    edit_one(&root, "0", constant("b"), &options).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"["b"]"#);
}

// ---------------------------------------------------------------------------
// Setter override
// ---------------------------------------------------------------------------

#[test]
fn setter_override_sees_only_the_final_key() {
    deepedit_testhelpers::setup();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let options = EditOptions::new().set(move |call: SetCall<'_>| {
        log.borrow_mut().push(call.key.to_string());
        call.apply_default()
    });

    let root = record! {};
    edit_one(&root, ["sub", "key"], constant("value"), &options).unwrap();
    assert_eq!(*seen.borrow(), vec![r#""key""#.to_string()]);
    insta::assert_snapshot!(root.to_string(), @r#"{sub: {key: "value"}}"#);
}

#[test]
fn setter_override_controls_the_write() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().set(|call: SetCall<'_>| {
        let wrapped = list![call.value.clone()];
        default_set(call.target, call.key, wrapped, call.options)
    });

    let root = record! {};
    let result = edit_one(&root, "key", constant(1), &options).unwrap();
    assert_eq!(result, Some(Value::Int(1)));
    insta::assert_snapshot!(root.to_string(), @"{key: [1]}");
}

#[test]
fn setter_override_errors_propagate() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().set(|call: SetCall<'_>| {
        Err(EditError::TypeMismatch {
            key: call.key.to_string(),
            found: "read-only".to_string(),
        })
    });

    let root = record! {};
    let err = edit_one(&root, "key", constant(1), &options).unwrap_err();
    assert!(matches!(err, EditError::TypeMismatch { .. }));
    assert_eq!(root.size(), Some(0));
}

#[test]
fn setter_override_can_refuse_as_no_change() {
    deepedit_testhelpers::setup();

    let options = EditOptions::new().set(|_| Err(EditError::no_change(unchanged())));

    let root = record! { "key" => 1 };
    let err = edit_one(&root, "key", constant(2), &options).unwrap_err();
    insta::assert_snapshot!(err, @"no change was made: unchanged");
    assert_eq!(root.get("key"), Some(Value::Int(1)));
}
