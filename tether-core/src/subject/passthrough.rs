// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::implementation::SubjectCore;
use crate::{Publisher, StreamItem, SubjectError, SubscriberRef, TetherError, Terminal};
use std::sync::Arc;

/// A hot subject that broadcasts values to every subscriber with outstanding demand.
///
/// Values are not retained: a subscriber that has not requested anything when a
/// value is sent misses it.
///
/// See the [module documentation](crate::subject) for an example.
pub struct PassthroughSubject<T, E = TetherError> {
    core: Arc<SubjectCore<T, E>>,
}

impl<T, E> PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: Arc::new(SubjectCore::passthrough()),
        }
    }

    /// Sends an item: a value is broadcast, an error terminates the subject.
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

    /// Broadcasts a value.
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

    /// Completes every subscriber and terminates the subject.
    ///
    /// Closing is idempotent; closing a subject that already failed keeps the failure.
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

impl<T, E> Publisher for PassthroughSubject<T, E>
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

impl<T, E> Default for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for PassthroughSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}
