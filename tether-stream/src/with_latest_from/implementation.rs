// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;
use tether_core::{
    Demand, Downstream, Subscriber, SubscriberRef, Subscription, SubscriptionRef, Terminal,
    Upstream,
};

/// Latest-value cache and lifecycle of one join subscription.
enum Phase<B> {
    /// No secondary value seen yet.
    Idle,
    Armed(B),
    Terminated,
}

/// State shared by the join subscription and its two inner subscribers.
///
/// Both inner subscribers hold it strongly, so the join stays alive while either
/// upstream can still deliver, whether or not the downstream keeps its
/// [`JoinSubscription`]. Cancellation and the primary's terminal release the
/// upstream subscriptions, which drops the inner subscribers with them.
pub(super) struct JoinInner<A, B, R, E, F> {
    pub(super) downstream: Downstream<R, E>,
    pub(super) primary: Upstream,
    pub(super) secondary: Upstream,
    phase: Mutex<Phase<B>>,
    selector: Arc<F>,
    _primary: PhantomData<fn(A)>,
}

impl<A, B, R, E, F> JoinInner<A, B, R, E, F>
where
    B: Clone,
    F: Fn(A, B) -> R,
{
    pub(super) fn new(subscriber: SubscriberRef<R, E>, selector: Arc<F>) -> Self {
        Self {
            downstream: Downstream::new(subscriber),
            primary: Upstream::new(),
            secondary: Upstream::new(),
            phase: Mutex::new(Phase::Idle),
            selector,
            _primary: PhantomData,
        }
    }

    fn on_primary(&self, value: A) -> Demand {
        let latest = match &*self.phase.lock() {
            Phase::Armed(latest) => latest.clone(),
            Phase::Idle => return Demand::max(1),
            Phase::Terminated => return Demand::NONE,
        };

        let combined = (self.selector)(value, latest);
        self.downstream.send(combined).unwrap_or(Demand::NONE)
    }

    fn on_secondary(&self, value: B) {
        let mut phase = self.phase.lock();
        if !matches!(*phase, Phase::Terminated) {
            *phase = Phase::Armed(value);
        }
    }

    fn on_primary_terminal(&self, terminal: Terminal<E>) {
        *self.phase.lock() = Phase::Terminated;
        self.primary.finish();
        self.downstream.finish(terminal);
        self.secondary.cancel();
    }

    fn cancel(&self) {
        self.downstream.cancel();
        *self.phase.lock() = Phase::Terminated;
        self.primary.cancel();
        self.secondary.cancel();
    }
}

impl<A, B, R, E, F> Drop for JoinInner<A, B, R, E, F> {
    fn drop(&mut self) {
        self.primary.cancel();
        self.secondary.cancel();
    }
}

/// Subscription handed to the join's downstream.
pub(super) struct JoinSubscription<A, B, R, E, F> {
    join: Arc<JoinInner<A, B, R, E, F>>,
}

impl<A, B, R, E, F> JoinSubscription<A, B, R, E, F> {
    pub(super) fn new(join: Arc<JoinInner<A, B, R, E, F>>) -> Self {
        Self { join }
    }
}

impl<A, B, R, E, F> Subscription for JoinSubscription<A, B, R, E, F>
where
    B: Clone + Send,
    F: Fn(A, B) -> R + Send + Sync,
{
    fn request(&self, demand: Demand) {
        self.join.primary.request(demand);
    }

    fn cancel(&self) {
        self.join.cancel();
    }
}

pub(super) struct PrimarySubscriber<A, B, R, E, F> {
    join: Arc<JoinInner<A, B, R, E, F>>,
}

impl<A, B, R, E, F> PrimarySubscriber<A, B, R, E, F> {
    pub(super) fn new(join: Arc<JoinInner<A, B, R, E, F>>) -> Self {
        Self { join }
    }
}

impl<A, B, R, E, F> Subscriber for PrimarySubscriber<A, B, R, E, F>
where
    B: Clone + Send,
    F: Fn(A, B) -> R + Send + Sync,
{
    type Input = A;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.join.primary.attach(subscription);
    }

    fn on_next(&self, value: A) -> Demand {
        self.join.on_primary(value)
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.join.on_primary_terminal(terminal);
    }
}

pub(super) struct SecondarySubscriber<A, B, R, E, F> {
    join: Arc<JoinInner<A, B, R, E, F>>,
}

impl<A, B, R, E, F> SecondarySubscriber<A, B, R, E, F> {
    pub(super) fn new(join: Arc<JoinInner<A, B, R, E, F>>) -> Self {
        Self { join }
    }
}

impl<A, B, R, E, F> Subscriber for SecondarySubscriber<A, B, R, E, F>
where
    B: Clone + Send,
    F: Fn(A, B) -> R + Send + Sync,
{
    type Input = B;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.join.secondary.attach(subscription);
    }

    fn on_next(&self, value: B) -> Demand {
        self.join.on_secondary(value);
        Demand::NONE
    }

    // Secondary completion or failure leaves the cached value in place.
    fn on_terminal(&self, _terminal: Terminal<E>) {
        self.join.secondary.finish();
    }
}
