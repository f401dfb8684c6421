// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::implementation::SubjectCore;
use crate::{Publisher, StreamItem, SubjectError, SubscriberRef, TetherError, Terminal};
use std::sync::Arc;

/// A hot subject that always holds a current value.
///
/// New subscribers receive the current value as soon as they request demand. A
/// subscriber that falls behind keeps only the latest value it has not received
/// yet; older undelivered values are replaced.
pub struct CurrentValueSubject<T, E = TetherError> {
    core: Arc<SubjectCore<T, E>>,
}

impl<T, E> CurrentValueSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates an open subject holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            core: Arc::new(SubjectCore::current_value(initial)),
        }
    }

    /// Returns a clone of the current value.
    ///
    /// The value stays readable after the subject terminates.
    #[must_use]
    pub fn value(&self) -> T {
        self.core
            .current()
            .unwrap_or_else(|| unreachable!("current value subject always holds a value"))
    }

    /// Sends an item: a value replaces the current one, an error terminates the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already terminated.
    pub fn send(&self, item: StreamItem<T, E>) -> Result<(), SubjectError> {
        match item {
            StreamItem::Value(value) => self.next(value),
            StreamItem::Error(error) => self.error(error),
        }
    }

    /// Replaces the current value and broadcasts it.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already terminated.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.core.send_value(value)
    }

    /// Fails every subscriber with `error` and terminates the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already terminated.
    pub fn error(&self, error: E) -> Result<(), SubjectError> {
        self.core.terminate(Terminal::Failed(error))
    }

    /// Completes every subscriber. Idempotent.
    pub fn close(&self) {
        let _ = self.core.terminate(Terminal::Completed);
    }

    /// Returns `true` once the subject has completed or failed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    /// Returns the number of subscribers still attached.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.core.subscriber_count()
    }
}

impl<T, E> Publisher for CurrentValueSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        self.core.subscribe(subscriber);
    }
}

impl<T, E> Clone for CurrentValueSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}
