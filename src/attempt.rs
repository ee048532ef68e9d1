//! Bridging panicking code into `Result`.
//!
//! [`attempt`] is the one place where a panic is turned into a value. Wrappers around
//! code that can panic should go through it (or [`attempt_with`], or the async sibling
//! [`ResultAsync::attempt`](crate::ResultAsync::attempt)) instead of calling
//! `catch_unwind` themselves, so the payload handling stays in one place.
//!
//! The process panic hook still runs for a captured panic; install a quiet hook if the
//! default stderr report is unwanted.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;

const NON_STRING_PAYLOAD: &str = "panic payload was not a string";

/// Error value produced when [`attempt`] captures a panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    /// Creates a panic error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The panic message, or a fixed placeholder when the payload was not a string.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            NON_STRING_PAYLOAD.to_owned()
        };
        let panic = Self { message };
        tracing::debug!(message = %panic.message, "captured panic");
        panic
    }
}

/// Runs `f`, turning a panic into `Err(Panic)` and a normal return into `Ok`.
///
/// A `Result` returned by `f` is not inspected; it becomes the `Ok` payload as is.
///
/// ```rust
/// use resultant::attempt;
///
/// assert_eq!(attempt(|| 2 + 2), Ok(4));
///
/// let caught = attempt(|| -> i32 { panic!("boom") }).unwrap_err();
/// assert_eq!(caught.message(), "boom");
/// ```
pub fn attempt<T, F>(f: F) -> Result<T, Panic>
where
    F: FnOnce() -> T,
{
    // `f` is consumed, so no state it touched is observable after the unwind.
    catch_unwind(AssertUnwindSafe(f)).map_err(Panic::from_payload)
}

/// Like [`attempt`], mapping a captured panic into the caller's error type.
///
/// ```rust
/// use resultant::attempt_with;
///
/// #[derive(Debug, PartialEq)]
/// enum ParseError {
///     Crashed(String),
/// }
///
/// let r: Result<u8, ParseError> = attempt_with(
///     || panic!("bad byte"),
///     |p| ParseError::Crashed(p.message().to_owned()),
/// );
/// assert_eq!(r, Err(ParseError::Crashed("bad byte".into())));
/// ```
pub fn attempt_with<T, E, F, C>(f: F, catch: C) -> Result<T, E>
where
    F: FnOnce() -> T,
    C: FnOnce(Panic) -> E,
{
    attempt(f).map_err(catch)
}
