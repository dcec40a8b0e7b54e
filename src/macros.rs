/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Leaves are converted with `Value::from`, so anything with a `From` impl
/// (integers, floats, strings, `Option`s) can appear as a leaf.
///
/// ```rust
/// use csvx::{value, Value};
///
/// let v = value!({ "id": 1, "tags": ["a", "b"], "parent": null });
/// assert_eq!(v.as_object().unwrap().get("id"), Some(&Value::from(1)));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}

/// Builds a [`Record`](crate::Record) from `"name": value` pairs.
///
/// ```rust
/// use csvx::{record, Value};
///
/// let r = record!({ "foo": "first", "bar": 10 });
/// assert_eq!(r.get("bar"), Some(&Value::from(10)));
/// ```
#[macro_export]
macro_rules! record {
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($key.to_string(), $crate::value!($value));
        )*
        record
    }};
}
