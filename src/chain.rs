//! Short-circuiting composition of fallible steps.
//!
//! A *step sequence* is a body that runs several fallible steps in order and stops at
//! the first failure. In Rust the `?` operator is the unwrap-or-abort point: `step?`
//! either hands the success value back to the body or suspends the sequence on the
//! failure token, and the driver never resumes it.
//!
//! [`chain`] advances a sequence exactly once and settles the outcome:
//!
//! - a normal return becomes the composed success,
//! - a failure token becomes the composed failure, after the abandoned body has been
//!   unwound (its locals dropped, [`defer`] guards run).
//!
//! Whether the composition is synchronous or asynchronous is decided by what that single
//! advance produces (see [`Advance`]): a `Result` settles immediately, a
//! [`ResultAsync`] stays deferred.
//!
//! ```
//! use resultant::prelude::*;
//!
//! fn parse(s: &str) -> Result<i32, String> {
//!     s.parse().map_err(|_| format!("not a number: {s}"))
//! }
//!
//! let sum = chain(|| -> Result<i32, String> {
//!     let a = parse("1")?;
//!     let b = parse("2")?;
//!     ok(a + b)
//! });
//! assert_eq!(sum, Ok(3));
//!
//! let sum = chain(|| -> Result<i32, String> {
//!     let a = parse("1")?;
//!     let b = parse("two")?;
//!     ok(a + b)
//! });
//! assert_eq!(sum, Err("not a number: two".to_string()));
//! ```
//!
//! # Panics are not failures
//!
//! The driver does not catch panics. A step that panics instead of returning `Err`
//! unwinds straight through [`chain`] to its caller; it is never turned into a failure.
//! Wrap any call that can panic with [`attempt`](crate::attempt) (or
//! [`ResultAsync::attempt`]) before using it as a step.
//!
//! ```should_panic
//! use resultant::prelude::*;
//!
//! let _ = chain(|| -> Result<u8, String> {
//!     let bytes: Vec<u8> = Vec::new();
//!     ok(bytes[0]) // out of bounds, unwinds through chain
//! });
//! ```

use std::future::Future;

use either::Either;

use crate::async_result::ResultAsync;
use crate::step::Step;

fn finish<T, E>(step: Step<E, T>) -> Result<T, E> {
    if step.is_yielded() {
        tracing::trace!("step sequence short-circuited");
    }
    step.into_result()
}

/// The outcome of the first advance of a step sequence.
///
/// The implementing type decides the mode of the whole composition: `Result` for
/// synchronous sequences, [`ResultAsync`] for asynchronous ones, and
/// `Either<Result, ResultAsync>` for sequences that only know at run time, which settle
/// into a `ResultAsync`.
pub trait Advance {
    /// `Result` or `ResultAsync`.
    type Output;

    /// Turns the advance into the composed result.
    fn settle(self) -> Self::Output;
}

impl<T, E> Advance for Result<T, E> {
    type Output = Result<T, E>;

    fn settle(self) -> Self::Output {
        finish(Step::from(self))
    }
}

impl<T: 'static, E: 'static> Advance for ResultAsync<T, E> {
    type Output = ResultAsync<T, E>;

    fn settle(self) -> Self::Output {
        self.inspect_err(|_| tracing::trace!("async step sequence short-circuited"))
    }
}

impl<T: 'static, E: 'static> Advance for Either<Result<T, E>, ResultAsync<T, E>> {
    type Output = ResultAsync<T, E>;

    fn settle(self) -> Self::Output {
        ResultAsync::from(self).settle()
    }
}

/// A step sequence that [`chain`] can drive.
///
/// Any `FnOnce() -> R` where `R: Advance` is a sequence; so is [`Steps`].
pub trait Sequence {
    /// `Result` or `ResultAsync`, matching the sequence's mode.
    type Output;

    /// Advances the sequence once and settles its outcome.
    fn run(self) -> Self::Output;
}

impl<F, A> Sequence for F
where
    F: FnOnce() -> A,
    A: Advance,
{
    type Output = A::Output;

    fn run(self) -> Self::Output {
        self().settle()
    }
}

/// Runs a step sequence, short-circuiting on its first failure.
///
/// The sequence is entered exactly once. Mode detection is by the type of that single
/// advance: a closure returning `Result` gives a `Result`, one returning a
/// [`ResultAsync`] gives a `ResultAsync`.
///
/// Panics raised by the sequence propagate to the caller.
pub fn chain<S: Sequence>(sequence: S) -> S::Output {
    sequence.run()
}

/// Runs an asynchronous step sequence written as an `async` block.
///
/// Inside the block, `.await?` on a [`ResultAsync`] (or any future of a `Result`) is the
/// unwrap-or-abort point.
///
/// ```
/// use resultant::prelude::*;
///
/// fn fetch(id: u32) -> ResultAsync<u32, String> {
///     ResultAsync::from_future(async move { Ok(id * 10) })
/// }
///
/// # futures::executor::block_on(async {
/// let total = chain_async(|| async {
///     let a = fetch(1).await?;
///     let b = fetch(2).await?;
///     Ok::<_, String>(a + b)
/// });
/// assert_eq!(total.await, Ok(30));
/// # });
/// ```
pub fn chain_async<T, E, F, Fut>(f: F) -> ResultAsync<T, E>
where
    T: 'static,
    E: 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    chain(move || ResultAsync::from_future(f()))
}

/// Runs `cleanup` when dropped, unless [disarmed](Defer::disarm).
///
/// Inside a step sequence this is the `finally` block: it runs when the body completes,
/// when `?` abandons it, and when a panic unwinds through it.
///
/// ```
/// use std::cell::Cell;
/// use resultant::prelude::*;
///
/// let released = Cell::new(false);
/// let r = chain(|| -> Result<(), &str> {
///     let _lock = defer(|| released.set(true));
///     err::<(), _>("disk full")?;
///     ok_unit()
/// });
/// assert_eq!(r, Err("disk full"));
/// assert!(released.get());
/// ```
#[must_use = "the cleanup runs as soon as an unused guard is dropped"]
pub struct Defer<F: FnOnce()> {
    cleanup: Option<F>,
}

/// Creates a [`Defer`] guard.
pub fn defer<F: FnOnce()>(cleanup: F) -> Defer<F> {
    Defer {
        cleanup: Some(cleanup),
    }
}

impl<F: FnOnce()> Defer<F> {
    /// Drops the guard without running the cleanup.
    pub fn disarm(mut self) {
        self.cleanup = None;
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

/// A step sequence built from separate thunks.
///
/// Each thunk receives the previous success value and returns a `Result`; the first
/// `Err` stops the sequence and the remaining thunks are never called. `finally` hooks
/// run once the sequence stops for any reason, newest first.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use resultant::prelude::*;
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let on_close = Rc::clone(&log);
///
/// let r = chain(
///     steps(|| ok::<_, String>("8080"))
///         .then(|raw| raw.parse::<u16>().map_err(|e| e.to_string()))
///         .then(|port| if port < 1024 { err("privileged port".into()) } else { ok(port) })
///         .finally(move || on_close.borrow_mut().push("closed")),
/// );
/// assert_eq!(r, Ok(8080));
/// assert_eq!(*log.borrow(), ["closed"]);
/// ```
#[must_use = "a step sequence does nothing until it is run"]
pub struct Steps<T, E> {
    head: Box<dyn FnOnce() -> Step<E, T>>,
    finalizers: Vec<Box<dyn FnOnce()>>,
}

/// Starts a [`Steps`] sequence with `first`.
pub fn steps<T, E, F>(first: F) -> Steps<T, E>
where
    T: 'static,
    E: 'static,
    F: FnOnce() -> Result<T, E> + 'static,
{
    Steps {
        head: Box::new(move || Step::from(first())),
        finalizers: Vec::new(),
    }
}

impl<T: 'static, E: 'static> Steps<T, E> {
    /// Appends a step fed with the previous success value.
    pub fn then<U, F>(self, next: F) -> Steps<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> Result<U, E> + 'static,
    {
        let Steps { head, finalizers } = self;
        Steps {
            head: Box::new(move || match head() {
                Step::Complete(value) => Step::from(next(value)),
                Step::Yielded(e) => Step::Yielded(e),
            }),
            finalizers,
        }
    }

    /// Registers a hook that runs when the sequence stops, however it stops.
    pub fn finally<F>(mut self, cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.finalizers.push(Box::new(cleanup));
        self
    }

    /// Runs the sequence to its first failure or to the end.
    pub fn run(self) -> Result<T, E> {
        let Steps { head, finalizers } = self;
        let _finalize = defer(move || {
            if !finalizers.is_empty() {
                tracing::trace!(hooks = finalizers.len(), "running finally hooks");
            }
            for cleanup in finalizers.into_iter().rev() {
                cleanup();
            }
        });
        finish(head())
    }
}

impl<T: 'static, E: 'static> Sequence for Steps<T, E> {
    type Output = Result<T, E>;

    fn run(self) -> Self::Output {
        Steps::run(self)
    }
}
