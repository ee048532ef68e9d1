//! A deferred computation that settles to a [`Result`].
//!
//! [`ResultAsync`] is itself a future: `.await` yields the `Result`. It re-exposes the
//! synchronous algebra with the same names, and every combinator works the same whether
//! the value is already settled or still pending.
//!
//! # Settled vs pending
//!
//! A `ResultAsync` built from a plain `Result` (via [`ok_async`], [`err_async`],
//! [`ResultExt::to_async`](crate::ResultExt::to_async), `From`) is *settled*: it holds
//! the value inline and combinators apply to it directly, without allocating or
//! suspending. Only a pending `ResultAsync` boxes a future. Combinators on a settled
//! value therefore run their callback immediately, not at the first poll.
//!
//! # Normalizing callback results
//!
//! Callbacks and arguments typed `impl Into<ResultAsync<U, E>>` accept any of:
//!
//! - a `Result<U, E>`,
//! - a `ResultAsync<U, E>`,
//! - an [`Either`] of the two, for callbacks that are synchronous on some branches and
//!   asynchronous on others.
//!
//! Callbacks returning an arbitrary future use the `_async` variants
//! ([`map_async`](ResultAsync::map_async), [`and_then_async`](ResultAsync::and_then_async),
//! [`inspect_async`](ResultAsync::inspect_async), ...).
//!
//! The resolving extractors `map_or`, `map_or_else` and `match_with` take synchronous
//! handlers only. For an asynchronous handler, await the `ResultAsync` first or use
//! [`unwrap_or_else_async`](ResultAsync::unwrap_or_else_async).
//!
//! # Panics and `from_future`
//!
//! [`ResultAsync::attempt`] captures a panic raised while creating *or* polling the
//! future and reports it as `Err(Panic)`. [`ResultAsync::from_future`] does not: the
//! future it wraps is expected to already report failure through its `Result`, and a
//! panic inside it propagates to whoever awaits the `ResultAsync`.
//!
//! Futures are boxed as [`LocalBoxFuture`], so payloads need not be `Send`; a
//! `ResultAsync` is meant to be awaited on the task that built it.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use either::Either;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};

use crate::attempt::{Panic, attempt};
use crate::result::{ResultExt, ResultLike};

const POLLED_AFTER_COMPLETION: &str = "ResultAsync polled after it already completed";

enum Deferred<T, E> {
    Settled(Option<Result<T, E>>),
    Pending(LocalBoxFuture<'static, Result<T, E>>),
}

/// A deferred `Result<T, E>`.
///
/// ```
/// use resultant::prelude::*;
///
/// # futures::executor::block_on(async {
/// let doubled = ok_async::<_, String>(2).map(|x| x * 2).await;
/// assert_eq!(doubled, Ok(4));
///
/// let doubled = ok_async::<_, String>(2).map_async(|x| async move { x * 2 }).await;
/// assert_eq!(doubled, Ok(4));
/// # });
/// ```
#[must_use = "a ResultAsync does nothing unless awaited"]
pub struct ResultAsync<T, E> {
    inner: Deferred<T, E>,
}

/// A settled `ResultAsync` holding `value`.
pub fn ok_async<T, E>(value: T) -> ResultAsync<T, E> {
    ResultAsync::ok(value)
}

/// A settled `ResultAsync` holding `error`.
pub fn err_async<T, E>(error: E) -> ResultAsync<T, E> {
    ResultAsync::err(error)
}

impl<T, E> ResultAsync<T, E> {
    /// Wraps an already computed result.
    pub fn from_result(result: Result<T, E>) -> Self {
        Self {
            inner: Deferred::Settled(Some(result)),
        }
    }

    /// A settled success.
    pub fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// A settled failure.
    pub fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Returns `true` if the outcome is already known and awaiting will not suspend.
    pub fn is_settled(&self) -> bool {
        matches!(self.inner, Deferred::Settled(Some(_)))
    }
}

impl<T: 'static> ResultAsync<T, Panic> {
    /// Runs `f` and awaits its future, capturing a panic from either as `Err(Panic)`.
    ///
    /// ```
    /// use resultant::ResultAsync;
    ///
    /// # futures::executor::block_on(async {
    /// let r = ResultAsync::attempt(|| async { 7 }).await;
    /// assert_eq!(r, Ok(7));
    ///
    /// let r = ResultAsync::<u8, _>::attempt(|| async { panic!("socket closed") }).await;
    /// assert_eq!(r.unwrap_err().message(), "socket closed");
    /// # });
    /// ```
    pub fn attempt<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        match attempt(f) {
            Ok(future) => Self::from_future(
                AssertUnwindSafe(future)
                    .catch_unwind()
                    .map(|outcome| outcome.map_err(Panic::from_payload)),
            ),
            Err(panic) => Self::err(panic),
        }
    }
}

impl<T: 'static, E: 'static> ResultAsync<T, E> {
    /// Wraps a future that already reports failure through its output.
    ///
    /// Panics inside `future` are not captured; they surface where the `ResultAsync` is
    /// awaited. Use [`ResultAsync::attempt`] for futures that may panic.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + 'static,
    {
        Self {
            inner: Deferred::Pending(future.boxed_local()),
        }
    }

    /// Like [`ResultAsync::attempt`], mapping a captured panic into the caller's error type.
    pub fn attempt_with<F, Fut, C>(f: F, catch: C) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
        C: FnOnce(Panic) -> E + 'static,
    {
        ResultAsync::<T, Panic>::attempt(f).map_err(catch)
    }

    /// Awaits every input concurrently and combines them.
    ///
    /// All inputs are polled before any is awaited to completion. If any fail, the
    /// result is the failure that comes first in input order, whichever settled first.
    ///
    /// ```
    /// use resultant::prelude::*;
    ///
    /// # futures::executor::block_on(async {
    /// let all = ResultAsync::all(vec![ok_async::<_, &str>(1), ok(2).to_async()]).await;
    /// assert_eq!(all, Ok(vec![1, 2]));
    /// # });
    /// ```
    pub fn all<I, R>(items: I) -> ResultAsync<Vec<T>, E>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResultAsync<T, E>>,
    {
        let items: Vec<ResultAsync<T, E>> = items.into_iter().map(Into::into).collect();
        if items.iter().all(ResultAsync::is_settled) {
            let settled = items.into_iter().filter_map(|item| match item.inner {
                Deferred::Settled(result) => result,
                Deferred::Pending(_) => None,
            });
            return ResultAsync::from_result(crate::all::all_iter(settled));
        }

        ResultAsync::from_future(async move {
            let outcomes = join_all(items).await;
            let total = outcomes.len();
            let mut values = Vec::with_capacity(total);
            for (index, outcome) in outcomes.into_iter().enumerate() {
                match outcome {
                    Ok(value) => values.push(value),
                    Err(e) => {
                        tracing::trace!(index, total, "ResultAsync::all failed");
                        return Err(e);
                    }
                }
            }
            Ok(values)
        })
    }

    fn pipe<U, F2, G>(self, g: G) -> ResultAsync<U, F2>
    where
        U: 'static,
        F2: 'static,
        G: FnOnce(Result<T, E>) -> Result<U, F2> + 'static,
    {
        match self.inner {
            Deferred::Settled(Some(result)) => ResultAsync::from_result(g(result)),
            Deferred::Settled(None) => panic!("{POLLED_AFTER_COMPLETION}"),
            inner => ResultAsync::from_future(async move { g(ResultAsync { inner }.await) }),
        }
    }

    fn pipe_async<U, F2, G>(self, g: G) -> ResultAsync<U, F2>
    where
        U: 'static,
        F2: 'static,
        G: FnOnce(Result<T, E>) -> ResultAsync<U, F2> + 'static,
    {
        match self.inner {
            Deferred::Settled(Some(result)) => g(result),
            Deferred::Settled(None) => panic!("{POLLED_AFTER_COMPLETION}"),
            inner => ResultAsync::from_future(async move { g(ResultAsync { inner }.await).await }),
        }
    }

    /// Resolves to `true` if the outcome is `Ok`.
    pub async fn is_ok(self) -> bool {
        self.await.is_ok()
    }

    /// Resolves to `true` if the outcome is `Err`.
    pub async fn is_err(self) -> bool {
        self.await.is_err()
    }

    /// Resolves to `true` if the outcome is `Ok` and `f` accepts the value.
    /// `f` is not called for `Err`.
    pub async fn is_ok_and<F>(self, f: F) -> bool
    where
        F: FnOnce(T) -> bool,
    {
        self.await.is_ok_and(f)
    }

    /// Resolves to `true` if the outcome is `Err` and `f` accepts the error.
    /// `f` is not called for `Ok`.
    pub async fn is_err_and<F>(self, f: F) -> bool
    where
        F: FnOnce(E) -> bool,
    {
        self.await.is_err_and(f)
    }

    /// Resolves to the success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Err`.
    pub async fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        self.await.unwrap()
    }

    /// Resolves to the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Ok`.
    pub async fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        self.await.unwrap_err()
    }

    /// Resolves to the success value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is `Err`.
    pub async fn expect(self, msg: &str) -> T
    where
        E: fmt::Debug,
    {
        self.await.expect(msg)
    }

    /// Resolves to the failure value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is `Ok`.
    pub async fn expect_err(self, msg: &str) -> E
    where
        T: fmt::Debug,
    {
        self.await.expect_err(msg)
    }

    /// Resolves to the success value or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    /// Resolves to the success value or `f(error)`.
    pub async fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.await.unwrap_or_else(f)
    }

    /// Resolves to the success value or the output of the future `f(error)`.
    pub async fn unwrap_or_else_async<F, Fut>(self, f: F) -> T
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = T>,
    {
        match self.await {
            Ok(value) => value,
            Err(e) => f(e).await,
        }
    }

    /// Resolves to `f(value)` on success or `default` on failure.
    pub async fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.await.map_or(default, f)
    }

    /// Resolves to `f(value)` on success or `default(error)` on failure.
    pub async fn map_or_else<U, D, F>(self, default: D, f: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        self.await.map_or_else(default, f)
    }

    /// Resolves by calling exactly one of the handlers.
    pub async fn match_with<U, OkF, ErrF>(self, on_ok: OkF, on_err: ErrF) -> U
    where
        OkF: FnOnce(T) -> U,
        ErrF: FnOnce(E) -> U,
    {
        self.await.match_with(on_ok, on_err)
    }

    /// Transforms the success value; a failure passes through untouched.
    pub fn map<U, F>(self, f: F) -> ResultAsync<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        self.pipe(move |r| r.map(f))
    }

    /// Transforms the success value with an asynchronous function.
    pub fn map_async<U, F, Fut>(self, f: F) -> ResultAsync<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => {
                let future = f(value);
                ResultAsync::from_future(async move { Ok(future.await) })
            }
            Err(e) => ResultAsync::err(e),
        })
    }

    /// Transforms the failure value; a success passes through untouched.
    pub fn map_err<F2, F>(self, f: F) -> ResultAsync<T, F2>
    where
        F2: 'static,
        F: FnOnce(E) -> F2 + 'static,
    {
        self.pipe(move |r| r.map_err(f))
    }

    /// Transforms the failure value with an asynchronous function.
    pub fn map_err_async<F2, F, Fut>(self, f: F) -> ResultAsync<T, F2>
    where
        F2: 'static,
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = F2> + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => ResultAsync::ok(value),
            Err(e) => {
                let future = f(e);
                ResultAsync::from_future(async move { Err(future.await) })
            }
        })
    }

    /// Converts the error into a wider error type.
    pub fn err_into<F2>(self) -> ResultAsync<T, F2>
    where
        F2: 'static,
        E: Into<F2>,
    {
        self.map_err(Into::into)
    }

    /// Continues with `f` on success; `f` is never called for a failure.
    ///
    /// `f` may return a `Result`, a `ResultAsync`, or an `Either` of the two.
    ///
    /// ```
    /// use either::Either;
    /// use resultant::prelude::*;
    ///
    /// fn lookup(id: u32) -> Either<Result<&'static str, String>, ResultAsync<&'static str, String>> {
    ///     if id == 0 {
    ///         Either::Left(err("id 0 is reserved".into()))
    ///     } else {
    ///         Either::Right(ResultAsync::from_future(async { Ok("remote") }))
    ///     }
    /// }
    ///
    /// # futures::executor::block_on(async {
    /// assert_eq!(ok_async(1).and_then(lookup).await, Ok("remote"));
    /// assert_eq!(ok_async(0).and_then(lookup).await, Err("id 0 is reserved".to_string()));
    /// # });
    /// ```
    pub fn and_then<U, R, F>(self, f: F) -> ResultAsync<U, E>
    where
        U: 'static,
        R: Into<ResultAsync<U, E>>,
        F: FnOnce(T) -> R + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => f(value).into(),
            Err(e) => ResultAsync::err(e),
        })
    }

    /// Continues with a function returning any future of a `Result`.
    pub fn and_then_async<U, F, Fut>(self, f: F) -> ResultAsync<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = Result<U, E>> + 'static,
    {
        self.and_then(move |value| ResultAsync::from_future(f(value)))
    }

    /// Keeps `other` if this is a success, otherwise keeps this failure.
    pub fn and<U, R>(self, other: R) -> ResultAsync<U, E>
    where
        U: 'static,
        R: Into<ResultAsync<U, E>>,
    {
        let other = other.into();
        self.pipe_async(move |r| match r {
            Ok(_) => other,
            Err(e) => ResultAsync::err(e),
        })
    }

    /// Keeps this success, otherwise falls back to `other`.
    pub fn or<F2, R>(self, other: R) -> ResultAsync<T, F2>
    where
        F2: 'static,
        R: Into<ResultAsync<T, F2>>,
    {
        let other = other.into();
        self.pipe_async(move |r| match r {
            Ok(value) => ResultAsync::ok(value),
            Err(_) => other,
        })
    }

    /// Recovers from a failure with `f`; `f` is never called for a success.
    pub fn or_else<F2, R, F>(self, f: F) -> ResultAsync<T, F2>
    where
        F2: 'static,
        R: Into<ResultAsync<T, F2>>,
        F: FnOnce(E) -> R + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => ResultAsync::ok(value),
            Err(e) => f(e).into(),
        })
    }

    /// Recovers with a function returning any future of a `Result`.
    pub fn or_else_async<F2, F, Fut>(self, f: F) -> ResultAsync<T, F2>
    where
        F2: 'static,
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = Result<T, F2>> + 'static,
    {
        self.or_else(move |e| ResultAsync::from_future(f(e)))
    }

    /// Calls `f` with the success value, then yields the outcome unchanged.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + 'static,
    {
        self.pipe(move |r| r.inspect(f))
    }

    /// Calls `f` with the failure value, then yields the outcome unchanged.
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + 'static,
    {
        self.pipe(move |r| r.inspect_err(f))
    }

    /// Awaits the future `f(&value)` on success, then yields the outcome unchanged.
    pub fn inspect_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => {
                let future = f(&value);
                ResultAsync::from_future(async move {
                    future.await;
                    Ok(value)
                })
            }
            Err(e) => ResultAsync::err(e),
        })
    }

    /// Awaits the future `f(&error)` on failure, then yields the outcome unchanged.
    pub fn inspect_err_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&E) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.pipe_async(move |r| match r {
            Ok(value) => ResultAsync::ok(value),
            Err(e) => {
                let future = f(&e);
                ResultAsync::from_future(async move {
                    future.await;
                    Err(e)
                })
            }
        })
    }

    /// Collapses a nested `Result` payload, widening the outer error into the inner one.
    pub fn flatten_result(self) -> ResultAsync<T::Ok, T::Err>
    where
        T: ResultLike,
        T::Ok: 'static,
        T::Err: 'static,
        E: Into<T::Err>,
    {
        self.pipe(|r| r.flatten_result())
    }
}

impl<T, E> Future for ResultAsync<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.get_mut().inner;
        match inner {
            Deferred::Settled(slot) => Poll::Ready(slot.take().expect(POLLED_AFTER_COMPLETION)),
            Deferred::Pending(future) => {
                let result = futures::ready!(future.as_mut().poll(cx));
                *inner = Deferred::Settled(None);
                Poll::Ready(result)
            }
        }
    }
}

// The settled payload is moved out, never pinned, and the pending future is already
// behind its own `Pin<Box<_>>`.
impl<T, E> Unpin for ResultAsync<T, E> {}

impl<T, E> From<Result<T, E>> for ResultAsync<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

impl<T, E, L, R> From<Either<L, R>> for ResultAsync<T, E>
where
    L: Into<ResultAsync<T, E>>,
    R: Into<ResultAsync<T, E>>,
{
    fn from(either: Either<L, R>) -> Self {
        either.either_into()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for ResultAsync<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Deferred::Settled(Some(result)) => f.debug_tuple("ResultAsync").field(result).finish(),
            Deferred::Settled(None) => f.write_str("ResultAsync(<taken>)"),
            Deferred::Pending(_) => f.write_str("ResultAsync(<pending>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{err, ok};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn pending<T: 'static, E: 'static>(result: Result<T, E>) -> ResultAsync<T, E> {
        ResultAsync::from_future(async move {
            crate::testing::yield_now().await;
            result
        })
    }

    #[test]
    fn test_settled_and_pending_await_to_same_result() {
        assert_eq!(block_on(ok_async::<_, ()>(3)), Ok(3));
        assert_eq!(block_on(pending::<_, ()>(Ok(3))), Ok(3));
        assert_eq!(block_on(err_async::<(), _>("x")), Err("x"));
        assert_eq!(block_on(pending::<(), _>(Err("x"))), Err("x"));
    }

    #[test]
    fn test_settled_combinators_stay_settled() {
        let r = ok_async::<_, &str>(2).map(|x| x * 2).and_then(|x| ok(x + 1));
        assert!(r.is_settled());
        assert_eq!(block_on(r), Ok(5));
    }

    #[test]
    fn test_map_sync_and_async_agree() {
        let sync = block_on(pending::<_, ()>(Ok(2)).map(|x| x * 2));
        let asynchronous = block_on(pending::<_, ()>(Ok(2)).map_async(|x| async move { x * 2 }));
        assert_eq!(sync, Ok(4));
        assert_eq!(asynchronous, Ok(4));
    }

    #[test]
    fn test_map_skips_err_and_map_err_skips_ok() {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let r = block_on(pending::<i32, _>(Err("bad")).map(move |x| {
            counted.set(counted.get() + 1);
            x
        }));
        assert_eq!(r, Err("bad"));
        assert_eq!(calls.get(), 0);

        let r = block_on(pending::<_, &str>(Ok(1)).map_err(|e| e.len()));
        assert_eq!(r, Ok(1));

        let r = block_on(pending::<i32, _>(Err("bad")).map_err_async(|e| async move { e.len() }));
        assert_eq!(r, Err(3));
    }

    #[test]
    fn test_and_then_normalizes_every_callback_shape() {
        let from_sync = block_on(pending::<_, &str>(Ok(1)).and_then(|x| ok(x + 1)));
        let from_async = block_on(pending::<_, &str>(Ok(1)).and_then(|x| pending(Ok(x + 1))));
        let from_future =
            block_on(pending::<_, &str>(Ok(1)).and_then_async(|x| async move { Ok(x + 1) }));
        let from_either = block_on(pending::<_, &str>(Ok(1)).and_then(|x| {
            if x > 0 {
                Either::Right(pending::<i32, &str>(Ok(x + 1)))
            } else {
                Either::Left(err::<i32, &str>("negative"))
            }
        }));

        assert_eq!(from_sync, Ok(2));
        assert_eq!(from_async, Ok(2));
        assert_eq!(from_future, Ok(2));
        assert_eq!(from_either, Ok(2));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let r = block_on(pending::<i32, _>(Err("bad")).and_then(move |x| {
            counted.set(counted.get() + 1);
            ok(x)
        }));
        assert_eq!(r, Err("bad"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_or_else_recovers_only_failures() {
        let r = block_on(pending::<i32, _>(Err("bad")).or_else(|e| ok::<_, ()>(e.len() as i32)));
        assert_eq!(r, Ok(3));

        let r = block_on(pending::<_, &str>(Ok(9)).or_else(|_| -> Result<i32, ()> {
            unreachable!("success must not be recovered")
        }));
        assert_eq!(r, Ok(9));

        let r = block_on(
            pending::<i32, _>(Err("bad")).or_else_async(|e| async move { err::<i32, _>(e.len()) }),
        );
        assert_eq!(r, Err(3));
    }

    #[test]
    fn test_and_or() {
        assert_eq!(block_on(pending::<_, &str>(Ok(1)).and(ok::<_, &str>("next"))), Ok("next"));
        assert_eq!(block_on(pending::<i32, _>(Err("first")).and(ok::<(), _>(()))), Err("first"));
        assert_eq!(block_on(pending::<_, &str>(Ok(1)).or(err::<_, ()>(()))), Ok(1));
        assert_eq!(block_on(pending::<i32, &str>(Err("no")).or(pending::<_, ()>(Ok(2)))), Ok(2));
    }

    #[test]
    fn test_inspect_leaves_outcome_unchanged() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ok_seen = Rc::clone(&seen);
        let err_seen = Rc::clone(&seen);

        let r = block_on(
            pending::<_, &str>(Ok(5))
                .inspect(move |v| ok_seen.borrow_mut().push(format!("ok {v}")))
                .inspect_err(|_| unreachable!("no error to inspect")),
        );
        assert_eq!(r, Ok(5));

        let r = block_on(
            pending::<i32, _>(Err("bad")).inspect_err(move |e| err_seen.borrow_mut().push(format!("err {e}"))),
        );
        assert_eq!(r, Err("bad"));
        assert_eq!(*seen.borrow(), ["ok 5", "err bad"]);
    }

    #[test]
    fn test_inspect_async_awaits_side_effect() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ok_seen = Rc::clone(&seen);
        let err_seen = Rc::clone(&seen);

        let r = block_on(
            pending::<_, &str>(Ok(5))
                .inspect_async(move |v| {
                    let line = format!("ok {v}");
                    async move {
                        crate::testing::yield_now().await;
                        ok_seen.borrow_mut().push(line);
                    }
                }),
        );
        assert_eq!(r, Ok(5));

        let r = block_on(ResultAsync::<i32, _>::err("bad").inspect_err_async(move |e| {
            let line = format!("err {e}");
            async move { err_seen.borrow_mut().push(line) }
        }));
        assert_eq!(r, Err("bad"));
        assert_eq!(*seen.borrow(), ["ok 5", "err bad"]);
    }

    #[test]
    fn test_inspect_async_skips_boxing_when_branch_does_not_match() {
        let skipped_ok = ok_async::<i32, &str>(1).inspect_err_async(|_| -> futures::future::Ready<()> {
            unreachable!("no error to inspect")
        });
        assert!(skipped_ok.is_settled());
        assert_eq!(block_on(skipped_ok), Ok(1));

        let skipped_err = err_async::<i32, &str>("bad").inspect_async(|_| -> futures::future::Ready<()> {
            unreachable!("no value to inspect")
        });
        assert!(skipped_err.is_settled());
        assert_eq!(block_on(skipped_err), Err("bad"));

        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let inspected = ok_async::<i32, &str>(1).inspect_async(move |_| async move { flag.set(true) });
        assert!(!ran.get());
        assert_eq!(block_on(inspected), Ok(1));
        assert!(ran.get());
    }

    #[test]
    fn test_unwrap_or_else_async() {
        let fallback = |e: &str| {
            let len = e.len() as i32;
            async move {
                crate::testing::yield_now().await;
                len
            }
        };
        assert_eq!(block_on(pending::<_, &str>(Ok(1)).unwrap_or_else_async(fallback)), 1);
        assert_eq!(block_on(pending::<i32, _>(Err("four")).unwrap_or_else_async(fallback)), 4);
    }

    #[test]
    fn test_combinator_on_completed_value_panics_at_call_site() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let message = |payload: Box<dyn std::any::Any + Send>| {
            payload.downcast_ref::<String>().cloned().unwrap_or_default()
        };

        let mut r = ok_async::<i32, &str>(1);
        assert_eq!(block_on(&mut r), Ok(1));
        let payload = catch_unwind(AssertUnwindSafe(move || {
            let _ = r.map(|x| x + 1);
        }))
        .unwrap_err();
        assert_eq!(message(payload), POLLED_AFTER_COMPLETION);

        let mut r = pending::<i32, &str>(Ok(1));
        assert_eq!(block_on(&mut r), Ok(1));
        let payload = catch_unwind(AssertUnwindSafe(move || {
            let _ = r.or_else(|e| err::<i32, &str>(e));
        }))
        .unwrap_err();
        assert_eq!(message(payload), POLLED_AFTER_COMPLETION);
    }

    #[test]
    fn test_extractors() {
        assert!(block_on(pending::<_, ()>(Ok(1)).is_ok()));
        assert!(block_on(pending::<(), _>(Err(1)).is_err()));
        assert!(block_on(pending::<_, ()>(Ok(2)).is_ok_and(|v| v == 2)));
        assert!(!block_on(pending::<i32, _>(Err(2)).is_ok_and(|_| unreachable!())));
        assert!(block_on(pending::<(), _>(Err(2)).is_err_and(|e| e == 2)));
        assert_eq!(block_on(pending::<i32, ()>(Err(())).unwrap_or(7)), 7);
        assert_eq!(block_on(pending::<usize, &str>(Err("abc")).unwrap_or_else(str::len)), 3);
        assert_eq!(block_on(pending::<i32, &str>(Ok(1)).map_or(0, |v| v + 1)), 2);
        assert_eq!(block_on(pending::<i32, &str>(Err("ab")).map_or_else(|e| e.len() as i32, |v| v)), 2);
        assert_eq!(
            block_on(pending::<i32, &str>(Err("ab")).match_with(|v| v, |e| -(e.len() as i32))),
            -2
        );
        assert_eq!(block_on(pending::<i32, &str>(Ok(4)).unwrap()), 4);
        assert_eq!(block_on(pending::<(), &str>(Err("e")).unwrap_err()), "e");
    }

    #[test]
    #[should_panic(expected = "config must load")]
    fn test_expect_panics_with_message() {
        block_on(pending::<(), _>(Err("missing file")).expect("config must load"));
    }

    #[test]
    #[should_panic(expected = "expected a failure")]
    fn test_expect_err_panics_with_message() {
        block_on(pending::<_, ()>(Ok(1)).expect_err("expected a failure"));
    }

    #[test]
    fn test_flatten_result() {
        assert_eq!(block_on(pending::<Result<i32, &str>, &str>(Ok(Ok(1))).flatten_result()), Ok(1));
        assert_eq!(
            block_on(pending::<Result<i32, &str>, &str>(Ok(Err("inner"))).flatten_result()),
            Err("inner")
        );
        assert_eq!(
            block_on(pending::<Result<i32, &str>, &str>(Err("outer")).flatten_result()),
            Err("outer")
        );
    }

    #[test]
    fn test_attempt_captures_sync_and_async_panics() {
        let r = block_on(ResultAsync::attempt(|| async { 1 }));
        assert_eq!(r, Ok(1));

        let r = block_on(ResultAsync::<i32, _>::attempt(|| -> futures::future::Ready<i32> {
            panic!("before the future existed")
        }));
        assert_eq!(r.unwrap_err().message(), "before the future existed");

        let r = block_on(ResultAsync::<(), _>::attempt(|| async {
            crate::testing::yield_now().await;
            panic!("while polling")
        }));
        assert_eq!(r.unwrap_err().message(), "while polling");
    }

    #[test]
    fn test_attempt_with_maps_panic() {
        let r: Result<(), String> = block_on(ResultAsync::attempt_with(
            || async { panic!("refused") },
            |p| format!("io: {p}"),
        ));
        assert_eq!(r, Err("io: refused".to_string()));
    }

    #[test]
    fn test_from_future_does_not_capture_panics() {
        let outcome = std::panic::catch_unwind(|| {
            block_on(ResultAsync::<i32, String>::from_future(async {
                panic!("contract broken")
            }))
        });
        assert!(outcome.is_err());
    }

    #[test]
    fn test_all_empty_and_ordered() {
        let empty: Vec<ResultAsync<i32, ()>> = Vec::new();
        assert_eq!(block_on(ResultAsync::all(empty)), Ok(vec![]));

        let mixed: Vec<ResultAsync<i32, ()>> = vec![pending(Ok(1)), ok(2).into(), pending(Ok(3))];
        assert_eq!(block_on(ResultAsync::all(mixed)), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_all_accepts_plain_results() {
        let plain: Vec<Result<i32, &str>> = vec![ok(1), err("x"), ok(3)];
        let r = ResultAsync::all(plain);
        assert!(r.is_settled());
        assert_eq!(block_on(r), Err("x"));
    }

    #[test]
    fn test_all_reports_first_failure_in_input_order() {
        let items = vec![pending::<i32, _>(Err("first")), err_async("second"), pending(Ok(3))];
        assert_eq!(block_on(ResultAsync::all(items)), Err("first"));
    }

    #[test]
    fn test_debug_shows_state() {
        assert_eq!(format!("{:?}", ok_async::<_, ()>(1)), "ResultAsync(Ok(1))");
        assert_eq!(format!("{:?}", pending::<i32, ()>(Ok(1))), "ResultAsync(<pending>)");
    }
}
