//! Introductory functions and the combinators `std::result::Result` does not carry.
//!
//! The variant type itself is the standard library's [`Result`]: it already provides the
//! narrowing predicates (`is_ok`, `is_err`, `is_ok_and`, `is_err_and`), the unsafe
//! extractors (`unwrap`, `unwrap_err`, `expect`, `expect_err`) and most of the algebra
//! (`map`, `map_err`, `map_or`, `map_or_else`, `and_then`, `and`, `or`, `or_else`,
//! `unwrap_or`, `unwrap_or_else`, `inspect`, `inspect_err`). [`ResultExt`] fills in
//! the rest.
//!
//! # Examples
//!
//! ```
//! use resultant::prelude::*;
//!
//! fn divide(a: f64, b: f64) -> Result<f64, &'static str> {
//!     if b == 0.0 { err("division by zero") } else { ok(a / b) }
//! }
//!
//! let shown = divide(10.0, 4.0)
//!     .map(|n| format!("{n:.2}"))
//!     .match_with(|s| s, |e| format!("failed: {e}"));
//! assert_eq!(shown, "2.50");
//! ```

use crate::async_result::ResultAsync;

/// Wraps `value` as a success.
#[inline]
pub fn ok<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Wraps `error` as a failure.
#[inline]
pub fn err<T, E>(error: E) -> Result<T, E> {
    Err(error)
}

/// A success carrying no payload.
#[inline]
pub fn ok_unit<E>() -> Result<(), E> {
    Ok(())
}

mod sealed {
    pub trait Sealed {}

    impl<T, E> Sealed for Result<T, E> {}
}

/// Implemented only by `Result`, so a nested `Result<Result<U, F>, E>` can name its
/// inner variant types.
pub trait ResultLike: sealed::Sealed {
    /// Success payload type.
    type Ok;
    /// Failure payload type.
    type Err;

    /// Returns `self` as a plain `Result`.
    fn into_result(self) -> Result<Self::Ok, Self::Err>;
}

impl<T, E> ResultLike for Result<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_result(self) -> Result<T, E> {
        self
    }
}

/// Extension methods for [`Result`].
pub trait ResultExt<T, E>: Sized {
    /// Invokes exactly one of the two handlers and returns its value.
    ///
    /// Both handlers are required arguments, so neither branch can be left out.
    ///
    /// ```
    /// use resultant::prelude::*;
    ///
    /// let r: Result<u32, String> = err("nope".to_string());
    /// assert_eq!(r.match_with(|n| n * 2, |e| e.len() as u32), 4);
    /// ```
    fn match_with<U, OkF, ErrF>(self, on_ok: OkF, on_err: ErrF) -> U
    where
        OkF: FnOnce(T) -> U,
        ErrF: FnOnce(E) -> U;

    /// Collapses one level of nesting.
    ///
    /// The outer error is converted into the inner error type, which makes the inner
    /// type the union of both failure channels.
    ///
    /// ```
    /// use resultant::prelude::*;
    ///
    /// let nested: Result<Result<i32, &str>, &str> = ok(ok(1));
    /// assert_eq!(nested.flatten_result(), Ok(1));
    ///
    /// let nested: Result<Result<i32, &str>, &str> = ok(err("inner"));
    /// assert_eq!(nested.flatten_result(), Err("inner"));
    /// ```
    fn flatten_result(self) -> Result<T::Ok, T::Err>
    where
        T: ResultLike,
        E: Into<T::Err>;

    /// Converts the error into a wider error type.
    fn err_into<F>(self) -> Result<T, F>
    where
        E: Into<F>;

    /// Lifts the result into a [`ResultAsync`] that is already settled.
    fn to_async(self) -> ResultAsync<T, E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[inline]
    fn match_with<U, OkF, ErrF>(self, on_ok: OkF, on_err: ErrF) -> U
    where
        OkF: FnOnce(T) -> U,
        ErrF: FnOnce(E) -> U,
    {
        match self {
            Ok(t) => on_ok(t),
            Err(e) => on_err(e),
        }
    }

    #[inline]
    fn flatten_result(self) -> Result<T::Ok, T::Err>
    where
        T: ResultLike,
        E: Into<T::Err>,
    {
        match self {
            Ok(inner) => inner.into_result(),
            Err(e) => Err(e.into()),
        }
    }

    #[inline]
    fn err_into<F>(self) -> Result<T, F>
    where
        E: Into<F>,
    {
        self.map_err(Into::into)
    }

    #[inline]
    fn to_async(self) -> ResultAsync<T, E> {
        ResultAsync::from_result(self)
    }
}
