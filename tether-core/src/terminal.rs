// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// The single event that ends a subscription's delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal<E> {
    /// The publisher finished normally.
    Completed,
    /// The publisher failed; no further values follow.
    Failed(E),
}

impl<E> Terminal<E> {
    /// Returns `true` for [`Terminal::Completed`].
    pub const fn is_completed(&self) -> bool {
        matches!(self, Terminal::Completed)
    }

    /// Returns `true` for [`Terminal::Failed`].
    pub const fn is_failed(&self) -> bool {
        matches!(self, Terminal::Failed(_))
    }

    /// Converts the terminal into `Option<E>`, discarding completion.
    pub fn err(self) -> Option<E> {
        match self {
            Terminal::Completed => None,
            Terminal::Failed(e) => Some(e),
        }
    }

    /// Maps the failure with `f`, leaving completion untouched.
    pub fn map_err<F, O>(self, f: O) -> Terminal<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Terminal::Completed => Terminal::Completed,
            Terminal::Failed(e) => Terminal::Failed(f(e)),
        }
    }
}
