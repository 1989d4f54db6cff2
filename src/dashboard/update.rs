//! The value-or-function argument accepted by every dashboard setter.

use std::fmt;

/// A pending change to one dashboard field.
///
/// Setters take `impl Into<StateUpdate<T>>`, so a plain `T` can be passed
/// directly. Use [`StateUpdate::with`] or [`StateUpdate::modify`] to derive
/// the next value from the previous one.
pub enum StateUpdate<T> {
    Replace(T),
    Apply(Box<dyn FnOnce(&T) -> T>),
}

impl<T> StateUpdate<T> {
    /// Computes the next value from the previous one.
    pub fn with(f: impl FnOnce(&T) -> T + 'static) -> Self {
        StateUpdate::Apply(Box::new(f))
    }

    /// Produces the value this update results in, given the current one.
    pub fn resolve(self, prev: &T) -> T {
        match self {
            StateUpdate::Replace(value) => value,
            StateUpdate::Apply(f) => f(prev),
        }
    }
}

impl<T: Clone + 'static> StateUpdate<T> {
    /// Edits a copy of the previous value in place.
    pub fn modify(f: impl FnOnce(&mut T) + 'static) -> Self {
        StateUpdate::with(move |prev: &T| {
            let mut next = prev.clone();
            f(&mut next);
            next
        })
    }
}

impl<T> From<T> for StateUpdate<T> {
    fn from(value: T) -> Self {
        StateUpdate::Replace(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for StateUpdate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateUpdate::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            StateUpdate::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}
