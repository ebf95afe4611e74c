//! Lenient variants of throwing resolvers.
//!
//! A forgiving resolver turns [`crate::AssetError::Unresolvable`] into `Ok(None)` and passes every
//! other error through unchanged. The policy lives in [`forgive`]; the `try_get_*` functions
//! are generated from their strict counterparts with `forgiving!`.

use crate::error::AssetResult;

/// Map an unresolvable outcome to `Ok(None)`, keeping every other error.
pub fn forgive<T>(result: AssetResult<T>) -> AssetResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_unresolvable() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Wrap a single-argument resolver into its forgiving variant.
pub fn forgiving_resolver<A, T, F>(resolver: F) -> impl Fn(A) -> AssetResult<Option<T>>
where
    F: Fn(A) -> AssetResult<T>,
{
    move |input| forgive(resolver(input))
}

/// Declare `try_*` functions that forward to a strict resolver through [`forgive`].
macro_rules! forgiving {
    ($(
        $(#[$attr:meta])*
        $vis:vis fn $name:ident = $strict:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty;
    )+) => {
        $(
            $(#[$attr])*
            $vis fn $name($($arg: $ty),*) -> $crate::error::AssetResult<Option<$ret>> {
                $crate::forgiving::forgive($strict($($arg),*))
            }
        )+
    };
}

pub(crate) use forgiving;
