// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod implementation;

use implementation::{JoinInner, JoinSubscription, PrimarySubscriber, SecondarySubscriber};
use std::sync::Arc;
use tether_core::{Demand, Publisher, SubscriberRef};

/// Extension trait providing the `with_latest_from` operator.
///
/// This operator combines a primary publisher with a secondary one, emitting only
/// when the primary emits, using the latest value seen on the secondary.
pub trait WithLatestFromExt: Publisher + Sized {
    /// Pairs every primary value with the most recent secondary value.
    ///
    /// # Behavior
    ///
    /// - Emissions are triggered **only** by the primary publisher (self)
    /// - Secondary values are cached but never trigger an emission
    /// - Primary values arriving before the first secondary value are dropped, not buffered
    /// - The result completes or fails when the primary does; the secondary's terminal
    ///   events are ignored and the last cached value keeps being used
    /// - Cancelling the result cancels both upstream subscriptions exactly once
    ///
    /// # Demand
    ///
    /// Downstream demand is forwarded to the primary. The secondary is requested
    /// without limit so the cache is always current. Each dropped primary value
    /// is replaced by one unit of demand so a bounded subscriber is not starved.
    ///
    /// # Ordering across threads
    ///
    /// Both inputs serialize on the operator's state lock. A primary value pairs with
    /// the latest secondary value stored before the primary value took the lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tether_core::{PassthroughSubject, Publisher};
    /// use tether_stream::WithLatestFromExt;
    /// use tether_test_utils::TestSubscriber;
    ///
    /// let primary = PassthroughSubject::<&str, std::convert::Infallible>::new();
    /// let secondary = PassthroughSubject::<i32, std::convert::Infallible>::new();
    /// let results = TestSubscriber::<(&str, i32), std::convert::Infallible>::new();
    ///
    /// primary.clone().with_latest_from(secondary.clone()).subscribe(results.clone());
    ///
    /// primary.next("dropped").unwrap();
    /// secondary.next(1).unwrap();
    /// primary.next("A").unwrap();
    /// secondary.next(2).unwrap();
    /// primary.next("B").unwrap();
    ///
    /// assert_eq!(results.values(), vec![("A", 1), ("B", 2)]);
    /// ```
    #[allow(clippy::type_complexity)]
    fn with_latest_from<S>(
        self,
        other: S,
    ) -> WithLatestFrom<Self, S, fn(Self::Output, S::Output) -> (Self::Output, S::Output)>
    where
        S: Publisher<Failure = Self::Failure>,
        S::Output: Clone,
    {
        WithLatestFrom::new(self, other, pair as fn(_, _) -> _)
    }

    /// Like [`with_latest_from`](WithLatestFromExt::with_latest_from), combining each
    /// pair with `selector` instead of emitting a tuple.
    fn with_latest_from_map<S, F, R>(self, other: S, selector: F) -> WithLatestFrom<Self, S, F>
    where
        S: Publisher<Failure = Self::Failure>,
        S::Output: Clone,
        F: Fn(Self::Output, S::Output) -> R + Send + Sync + 'static,
        R: Send + 'static,
    {
        WithLatestFrom::new(self, other, selector)
    }
}

impl<P: Publisher> WithLatestFromExt for P {}

fn pair<A, B>(primary: A, secondary: B) -> (A, B) {
    (primary, secondary)
}

/// Publisher returned by [`with_latest_from`](WithLatestFromExt::with_latest_from).
pub struct WithLatestFrom<P, S, F> {
    primary: P,
    secondary: S,
    selector: Arc<F>,
}

impl<P, S, F> WithLatestFrom<P, S, F> {
    fn new(primary: P, secondary: S, selector: F) -> Self {
        Self {
            primary,
            secondary,
            selector: Arc::new(selector),
        }
    }
}

impl<P, S, F, R> Publisher for WithLatestFrom<P, S, F>
where
    P: Publisher,
    S: Publisher<Failure = P::Failure>,
    S::Output: Clone,
    F: Fn(P::Output, S::Output) -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    type Output = R;
    type Failure = P::Failure;

    fn subscribe(&self, subscriber: SubscriberRef<R, P::Failure>) {
        let join: Arc<JoinInner<P::Output, S::Output, R, P::Failure, F>> =
            Arc::new(JoinInner::new(subscriber, Arc::clone(&self.selector)));

        // Secondary first, so a replaying source arms the cache before any primary value.
        join.secondary.request(Demand::Unbounded);
        self.secondary
            .subscribe(Arc::new(SecondarySubscriber::new(Arc::clone(&join))));

        join.downstream
            .on_subscribe(Arc::new(JoinSubscription::new(Arc::clone(&join))));

        self.primary.subscribe(Arc::new(PrimarySubscriber::new(join)));
    }
}
