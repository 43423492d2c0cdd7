/// Build an `Array` value.
///
/// ```
/// use deepedit::list;
///
/// let v = list![1, "two", list![3.0]];
/// assert_eq!(v.to_string(), r#"[1, "two", [3.0]]"#);
/// ```
#[macro_export]
macro_rules! list {
    ($($item:expr),* $(,)?) => {
        $crate::Value::list([$($crate::Value::from($item)),*])
    };
}

/// Build an `Object` record value.
///
/// ```
/// use deepedit::record;
///
/// let v = record! { "sub" => record! { "key" => "value" } };
/// assert_eq!(v.to_string(), r#"{sub: {key: "value"}}"#);
/// ```
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Value::record::<::std::string::String>([
            $((::std::string::String::from($key), $crate::Value::from($value))),*
        ])
    };
}

/// Build a `Map` value. Keys may be any value.
#[macro_export]
macro_rules! map {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Value::map([$(($crate::Value::from($key), $crate::Value::from($value))),*])
    };
}

/// Build a `Set` value.
#[macro_export]
macro_rules! set {
    ($($item:expr),* $(,)?) => {
        $crate::Value::set([$($crate::Value::from($item)),*])
    };
}

/// Build a [`KeyChain`](crate::KeyChain) from keys of mixed types.
///
/// ```
/// use deepedit::{KeyChain, Value, chain};
///
/// let keys = chain!["sub", "key", 0];
/// assert_eq!(keys.keys()[2], Value::Int(0));
/// assert_eq!(chain![], KeyChain::new());
/// ```
#[macro_export]
macro_rules! chain {
    ($($key:expr),* $(,)?) => {{
        let keys: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($key)),*];
        $crate::KeyChain::from(keys)
    }};
}
