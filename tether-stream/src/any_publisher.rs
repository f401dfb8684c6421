// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::Arc;
use tether_core::{Publisher, SubscriberRef};

/// A type-erased, cheaply cloneable publisher.
///
/// Operator chains have long concrete types; erase them at API boundaries so the
/// signature only names the output and failure types.
pub struct AnyPublisher<T, E> {
    inner: Arc<dyn Publisher<Output = T, Failure = E>>,
}

impl<T, E> AnyPublisher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Erases the type of `publisher`.
    pub fn new<P>(publisher: P) -> Self
    where
        P: Publisher<Output = T, Failure = E> + 'static,
    {
        Self {
            inner: Arc::new(publisher),
        }
    }
}

impl<T, E> Publisher for AnyPublisher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        self.inner.subscribe(subscriber);
    }
}

impl<T, E> Clone for AnyPublisher<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for AnyPublisher<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyPublisher").finish_non_exhaustive()
    }
}

/// Extension trait providing [`erase`](EraseExt::erase).
pub trait EraseExt: Publisher + Sized + 'static {
    /// Wraps `self` in an [`AnyPublisher`].
    fn erase(self) -> AnyPublisher<Self::Output, Self::Failure> {
        AnyPublisher::new(self)
    }
}

impl<P: Publisher + 'static> EraseExt for P {}
