/// Builds a [`DynamicValue`](crate::DynamicValue) from a JSON-like literal.
///
/// Besides JSON syntax the macro understands `unknown` for an unresolved
/// value, `set [...]` for an unordered collection and `dyn <value>` for a
/// dynamic wrapper. Any other expression goes through
/// [`to_dynamic`](crate::to_dynamic).
///
/// # Panics
///
/// When an interpolated expression cannot be converted, for example a
/// non-finite float.
///
/// ```rust
/// use helm_values::{dynamic, DynamicValue};
///
/// let value = dynamic!({
///     "replicas": 2,
///     "offset": -1,
///     "image": { "tag": null },
///     "zones": set ["a", "b"],
///     "extra": dyn [1, 2],
/// });
/// assert!(matches!(value, DynamicValue::Map(_)));
/// ```
#[macro_export]
macro_rules! dynamic {
    // Elements are collected token by token up to the next top-level comma.
    (@list [$($elems:expr,)*] [$($val:tt)+] , $($rest:tt)*) => {
        $crate::dynamic!(@list [$($elems,)* $crate::dynamic!($($val)+),] [] $($rest)*)
    };

    (@list [$($elems:expr,)*] [$($val:tt)+]) => {
        vec![$($elems,)* $crate::dynamic!($($val)+)]
    };

    (@list [$($elems:expr,)*] []) => {
        vec![$($elems,)*]
    };

    (@list [$($elems:expr,)*] [$($val:tt)*] $next:tt $($rest:tt)*) => {
        $crate::dynamic!(@list [$($elems,)*] [$($val)* $next] $($rest)*)
    };

    (@map $map:ident [$key:literal] [$($val:tt)+] , $($rest:tt)*) => {
        $map.insert(($key).to_string(), $crate::dynamic!($($val)+));
        $crate::dynamic!(@map $map $($rest)*);
    };

    (@map $map:ident [$key:literal] [$($val:tt)+]) => {
        $map.insert(($key).to_string(), $crate::dynamic!($($val)+));
    };

    (@map $map:ident [$key:literal] [$($val:tt)*] $next:tt $($rest:tt)*) => {
        $crate::dynamic!(@map $map [$key] [$($val)* $next] $($rest)*);
    };

    (@map $map:ident $key:literal : $($rest:tt)*) => {
        $crate::dynamic!(@map $map [$key] [] $($rest)*);
    };

    (@map $map:ident) => {};

    (null) => {
        $crate::DynamicValue::Null
    };

    (unknown) => {
        $crate::DynamicValue::Unknown
    };

    (true) => {
        $crate::DynamicValue::Bool(true)
    };

    (false) => {
        $crate::DynamicValue::Bool(false)
    };

    ([ $($tt:tt)* ]) => {
        $crate::DynamicValue::List($crate::dynamic!(@list [] [] $($tt)*))
    };

    (set [ $($tt:tt)* ]) => {
        $crate::DynamicValue::Set($crate::dynamic!(@list [] [] $($tt)*))
    };

    (dyn $($tt:tt)+) => {
        $crate::DynamicValue::wrap($crate::dynamic!($($tt)+))
    };

    ({ $($tt:tt)* }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::DynamicValueMap::new();
        $crate::dynamic!(@map map $($tt)*);
        $crate::DynamicValue::Map(map)
    }};

    // Any other expression
    ($e:expr) => {
        match $crate::to_dynamic(&$e) {
            Ok(value) => value,
            Err(err) => panic!("dynamic!: {}", err),
        }
    };
}
