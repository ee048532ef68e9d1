//! # Resultant: Typed Failure Propagation
//!
//! Model the outcome of fallible work as a value. Failures travel through the type
//! system instead of unwinding, in both synchronous and asynchronous code.
//!
//! ## Core Types
//!
//! - **[`Result<T, E>`]**: the standard variant type, extended by [`ResultExt`]
//! - **[`ResultAsync<T, E>`]**: a deferred `Result` with the same combinator surface
//! - **[`Step<Y, D>`]**: the control signal of a step sequence: `Yielded` on failure,
//!   `Complete` on a normal return
//!
//! ## Key Features
//!
//! - **Composable**: `map`, `and_then`, `or_else` and friends on both types, with
//!   callbacks that may return either a `Result` or a `ResultAsync`
//! - **Bridging**: [`attempt`] and [`ResultAsync::attempt`] turn panics into values
//! - **Combining**: [`all`], [`all_async`] and [`ResultAsync::all`] keep the first failure
//!   in input order
//! - **Short-circuiting**: [`chain`] runs a body written with `?` and stops at the first
//!   failure
//!
//! ## Example
//!
//! ```
//! use resultant::prelude::*;
//!
//! fn divide(a: i32, b: i32) -> Result<i32, &'static str> {
//!     if b == 0 { err("division by zero") } else { ok(a / b) }
//! }
//!
//! let shown = divide(10, 0)
//!     .map(|n| n.to_string())
//!     .match_with(|s| s, |e| format!("failed: {e}"));
//! assert_eq!(shown, "failed: division by zero");
//!
//! let r = chain(|| -> Result<i32, &str> {
//!     let half = divide(10, 2)?;
//!     let third = divide(half, 0)?;
//!     ok(third + 1)
//! });
//! assert_eq!(r, Err("division by zero"));
//! ```
//!
//! ## Panics
//!
//! Nothing in this crate catches a panic unless asked to. In particular [`chain`] and
//! [`ResultAsync::from_future`] let panics propagate: only [`attempt`],
//! [`attempt_with`], [`ResultAsync::attempt`] and [`ResultAsync::attempt_with`] turn them
//! into `Err`.
//!
//! ## Common Functions
//!
//! **Constructors:**
//! - [`ok`], [`err`], [`ok_unit`] - synchronous results
//! - [`ok_async`], [`err_async`], [`ResultAsync::from_future`] - deferred results
//!
//! **Combining:**
//! - [`all`] - a `Vec`, array or tuple of results into one
//! - [`all_iter`], [`partition`] - iterator forms
//!
//! **Control flow:**
//! - [`chain`], [`chain_async`] - drive a step sequence
//! - [`steps`], [`defer`] - explicit steps and cleanup

mod all;
mod async_result;
mod attempt;
mod chain;
pub mod prelude;
mod result;
mod step;
#[cfg(test)]
mod testing;

pub use all::*;
pub use async_result::*;
pub use attempt::*;
pub use chain::*;
pub use result::*;
pub use step::*;
