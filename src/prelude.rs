//! Commonly used imports
//!
//! Use `use resultant::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Panic, ResultAsync, ResultExt, Step};

// Constructors
pub use crate::{err, err_async, ok, ok_async, ok_unit};

// Bridging
pub use crate::{attempt, attempt_with};

// Combining
pub use crate::{all, all_async, all_iter, partition};

// Control flow
pub use crate::{Steps, chain, chain_async, defer, steps};
