// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use tether_core::{Demand, Publisher, Subscriber, SubscriberRef, SubscriptionRef, Terminal};

/// Extension trait providing the `map` operator.
pub trait MapExt: Publisher + Sized {
    /// Transforms every value with `f`. Demand, cancellation and the terminal event
    /// pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tether_core::Publisher;
    /// use tether_stream::{sequence, MapExt};
    /// use tether_test_utils::TestSubscriber;
    ///
    /// let results = TestSubscriber::<i32, std::convert::Infallible>::new();
    /// sequence(vec![1, 2, 3]).map(|x| x * 10).subscribe(results.clone());
    ///
    /// assert_eq!(results.values(), vec![10, 20, 30]);
    /// assert!(results.is_completed());
    /// ```
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        Map {
            upstream: self,
            transform: Arc::new(f),
        }
    }
}

impl<P: Publisher> MapExt for P {}

/// Publisher returned by [`map`](MapExt::map).
pub struct Map<P, F> {
    upstream: P,
    transform: Arc<F>,
}

impl<P, F, U> Publisher for Map<P, F>
where
    P: Publisher,
    F: Fn(P::Output) -> U + Send + Sync + 'static,
    U: Send + 'static,
{
    type Output = U;
    type Failure = P::Failure;

    fn subscribe(&self, subscriber: SubscriberRef<U, P::Failure>) {
        self.upstream.subscribe(Arc::new(MapSubscriber::<P::Output, U, P::Failure, F> {
            downstream: subscriber,
            transform: Arc::clone(&self.transform),
            _input: std::marker::PhantomData,
        }));
    }
}

struct MapSubscriber<T, U, E, F> {
    downstream: SubscriberRef<U, E>,
    transform: Arc<F>,
    _input: std::marker::PhantomData<fn(T)>,
}

impl<T, U, E, F> Subscriber for MapSubscriber<T, U, E, F>
where
    F: Fn(T) -> U + Send + Sync,
{
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.downstream.on_subscribe(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        self.downstream.on_next((self.transform)(value))
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.downstream.on_terminal(terminal);
    }
}
