// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::convert::Infallible;
use std::sync::Arc;
use tether_core::{Demand, Publisher, Subscriber, SubscriberRef, SubscriptionRef, Terminal};

/// Extension trait providing the `catch_silently` operator.
pub trait CatchSilentlyExt: Publisher + Sized {
    /// Ends the sequence with a normal completion when the upstream fails.
    ///
    /// The failure itself is discarded, so the result can never fail. This is how a
    /// fallible publisher is fed into a consumer that only accepts infallible input.
    fn catch_silently(self) -> CatchSilently<Self> {
        CatchSilently { upstream: self }
    }
}

impl<P: Publisher> CatchSilentlyExt for P {}

/// Publisher returned by [`catch_silently`](CatchSilentlyExt::catch_silently).
pub struct CatchSilently<P> {
    upstream: P,
}

impl<P: Publisher> Publisher for CatchSilently<P> {
    type Output = P::Output;
    type Failure = Infallible;

    fn subscribe(&self, subscriber: SubscriberRef<P::Output, Infallible>) {
        self.upstream.subscribe(Arc::new(CatchSubscriber::<P::Output, P::Failure> {
            downstream: subscriber,
            _failure: std::marker::PhantomData,
        }));
    }
}

struct CatchSubscriber<T, E> {
    downstream: SubscriberRef<T, Infallible>,
    _failure: std::marker::PhantomData<fn(E)>,
}

impl<T, E> Subscriber for CatchSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.downstream.on_subscribe(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        self.downstream.on_next(value)
    }

    fn on_terminal(&self, _terminal: Terminal<E>) {
        self.downstream.on_terminal(Terminal::Completed);
    }
}
