/// Outcome of advancing a step sequence to its next suspension point.
///
/// A sequence either suspends on a failure token (`Yielded`), at which point the
/// driver abandons it, or runs to the end and hands back its return value
/// (`Complete`).
///
/// # Examples
///
/// ```rust
/// use resultant::Step;
///
/// let stopped: Step<&str, i32> = Step::Yielded("bad input");
/// let finished: Step<&str, i32> = Step::Complete(3);
///
/// assert_eq!(stopped.into_result(), Err("bad input"));
/// assert_eq!(finished.map_complete(|n| n * 2), Step::Complete(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, D> {
    /// The sequence suspended on a failure token.
    Yielded(Y),
    /// The sequence returned normally.
    Complete(D),
}

impl<Y, D> Step<Y, D> {
    /// Returns `true` if the step is `Yielded`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::Step;
    ///
    /// let x: Step<&str, i32> = Step::Yielded("stop");
    /// assert!(x.is_yielded());
    ///
    /// let y: Step<&str, i32> = Step::Complete(1);
    /// assert!(!y.is_yielded());
    /// ```
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Converts from `Step<Y, D>` to `Option<Y>`, discarding a completion value.
    #[inline]
    pub fn yielded_value(self) -> Option<Y> {
        match self {
            Step::Yielded(y) => Some(y),
            Step::Complete(_) => None,
        }
    }

    /// Converts from `Step<Y, D>` to `Option<D>`, discarding a yielded token.
    #[inline]
    pub fn complete_value(self) -> Option<D> {
        match self {
            Step::Yielded(_) => None,
            Step::Complete(d) => Some(d),
        }
    }

    /// Maps the completion value, leaving a yielded token untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::Step;
    ///
    /// let x: Step<&str, i32> = Step::Complete(5);
    /// assert_eq!(x.map_complete(|v| v * 2), Step::Complete(10));
    ///
    /// let y: Step<&str, i32> = Step::Yielded("stop");
    /// assert_eq!(y.map_complete(|v| v * 2), Step::Yielded("stop"));
    /// ```
    #[inline]
    pub fn map_complete<D2, F>(self, f: F) -> Step<Y, D2>
    where
        F: FnOnce(D) -> D2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(d) => Step::Complete(f(d)),
        }
    }

    /// Maps the yielded token, leaving a completion value untouched.
    #[inline]
    pub fn map_yielded<Y2, F>(self, f: F) -> Step<Y2, D>
    where
        F: FnOnce(Y) -> Y2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(f(y)),
            Step::Complete(d) => Step::Complete(d),
        }
    }

    /// Settles the step: a completion becomes `Ok`, a yielded token becomes `Err`.
    #[inline]
    pub fn into_result(self) -> Result<D, Y> {
        match self {
            Step::Yielded(y) => Err(y),
            Step::Complete(d) => Ok(d),
        }
    }

    /// Returns the contained `Yielded` token, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Complete`.
    ///
    /// ```should_panic
    /// use resultant::Step;
    ///
    /// let x: Step<&str, i32> = Step::Complete(1);
    /// x.unwrap_yielded(); // panics
    /// ```
    #[inline]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the contained `Complete` value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Yielded`.
    #[inline]
    pub fn unwrap_complete(self) -> D {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(d) => d,
        }
    }
}

impl<Y, D> From<Result<D, Y>> for Step<Y, D> {
    /// An `Err` is the failure token a sequence suspends on; an `Ok` lets it complete.
    fn from(result: Result<D, Y>) -> Self {
        match result {
            Ok(d) => Step::Complete(d),
            Err(y) => Step::Yielded(y),
        }
    }
}
