//! Combining many results into one.
//!
//! [`all`] takes a `Vec`, an array or a tuple of results and returns the collected
//! success values in the same shape, or the first failure in input order. [`all_iter`]
//! is the lazy form for arbitrary iterators and stops pulling at the first failure.
//! [`all_async`] does the same for tuples of [`ResultAsync`], awaiting every element
//! concurrently.

use crate::async_result::ResultAsync;

/// Collections of results that [`all`] can combine.
pub trait Combine {
    /// `Ok` of the collected success values, or the first `Err`.
    type Output;

    /// Combines the results, keeping the first failure in input order.
    fn combine(self) -> Self::Output;
}

/// Combines a collection of results.
///
/// ```
/// use resultant::prelude::*;
///
/// let pair: (Result<u8, &str>, Result<&str, &str>) = (ok(1), ok("one"));
/// assert_eq!(all(pair), Ok((1, "one")));
///
/// assert_eq!(all([ok(1), err("x"), ok(3)]), Err("x"));
/// assert_eq!(all(Vec::<Result<i32, ()>>::new()), Ok(vec![]));
/// ```
pub fn all<C: Combine>(results: C) -> C::Output {
    results.combine()
}

/// Collects the success values of `results`, stopping at the first failure.
///
/// Elements after the first failure are never pulled from the iterator.
pub fn all_iter<T, E, I>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    results.into_iter().collect()
}

/// Splits `results` into success values and failure values, keeping their order.
///
/// ```
/// use resultant::prelude::*;
///
/// let (parsed, rejected) = partition(["1", "x", "3"].map(str::parse::<i32>));
/// assert_eq!(parsed, [1, 3]);
/// assert_eq!(rejected.len(), 1);
/// ```
pub fn partition<T, E, I>(results: I) -> (Vec<T>, Vec<E>)
where
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut oks = Vec::new();
    let mut errs = Vec::new();
    for result in results {
        match result {
            Ok(value) => oks.push(value),
            Err(e) => errs.push(e),
        }
    }
    (oks, errs)
}

impl<T, E> Combine for Vec<Result<T, E>> {
    type Output = Result<Vec<T>, E>;

    fn combine(self) -> Self::Output {
        all_iter(self)
    }
}

impl<T, E, const N: usize> Combine for [Result<T, E>; N] {
    type Output = Result<[T; N], E>;

    fn combine(self) -> Self::Output {
        let values = all_iter(self)?;
        match <[T; N]>::try_from(values) {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("every element produced exactly one value"),
        }
    }
}

macro_rules! combine_tuple {
    ($($name:ident: $ty:ident),+) => {
        impl<$($ty,)+ Fail> Combine for ($(Result<$ty, Fail>,)+) {
            type Output = Result<($($ty,)+), Fail>;

            fn combine(self) -> Self::Output {
                let ($($name,)+) = self;
                Ok(($($name?,)+))
            }
        }
    };
}

combine_tuple!(a: T1);
combine_tuple!(a: T1, b: T2);
combine_tuple!(a: T1, b: T2, c: T3);
combine_tuple!(a: T1, b: T2, c: T3, d: T4);
combine_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5);
combine_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6);
combine_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6, g: T7);
combine_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6, g: T7, h: T8);

/// Tuples of [`ResultAsync`] that [`all_async`] can combine.
pub trait CombineAsync {
    /// Deferred tuple of success values.
    type Output;

    /// Awaits every element concurrently and keeps the first failure in input order.
    fn combine_async(self) -> Self::Output;
}

/// Concurrently combines a tuple of [`ResultAsync`] values.
///
/// ```
/// use resultant::prelude::*;
///
/// # futures::executor::block_on(async {
/// let user = ResultAsync::from_future(async { Ok::<_, String>("ada") });
/// let score = ok_async::<_, String>(97);
/// assert_eq!(all_async((user, score)).await, Ok(("ada", 97)));
/// # });
/// ```
pub fn all_async<C: CombineAsync>(results: C) -> C::Output {
    results.combine_async()
}

macro_rules! combine_async_tuple {
    ($($name:ident: $ty:ident),+) => {
        impl<$($ty: 'static,)+ Fail: 'static> CombineAsync for ($(ResultAsync<$ty, Fail>,)+) {
            type Output = ResultAsync<($($ty,)+), Fail>;

            fn combine_async(self) -> Self::Output {
                let ($($name,)+) = self;
                ResultAsync::from_future(async move {
                    let ($($name,)+) = futures::join!($($name),+);
                    Ok(($(
                        match $name {
                            Ok(value) => value,
                            Err(e) => return Err(e),
                        },
                    )+))
                })
            }
        }
    };
}

combine_async_tuple!(a: T1);
combine_async_tuple!(a: T1, b: T2);
combine_async_tuple!(a: T1, b: T2, c: T3);
combine_async_tuple!(a: T1, b: T2, c: T3, d: T4);
combine_async_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5);
combine_async_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6);
combine_async_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6, g: T7);
combine_async_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5, f: T6, g: T7, h: T8);
