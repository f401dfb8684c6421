// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold sources: every subscription replays the same values from the start.
//!
//! [`Sequence`] (and [`just`], a one-element sequence) only emits what the
//! subscriber has requested, and completes as soon as the last value has been
//! delivered. [`empty`] and [`fail`] terminate right after `on_subscribe`.

use parking_lot::Mutex;
use std::convert::Infallible;
use std::iter::{Once, Peekable};
use std::marker::PhantomData;
use std::sync::Arc;
use tether_core::{
    Demand, DemandTracker, Downstream, EmptySubscription, Publisher, SubscriberRef, Subscription,
    Terminal,
};

/// A source emitting `value` once and completing.
pub fn just<T: Clone>(value: T) -> Just<T> {
    Sequence::new(std::iter::once(value))
}

/// A source emitting every item of `items` and completing.
pub fn sequence<I>(items: I) -> Sequence<I>
where
    I: IntoIterator + Clone,
{
    Sequence::new(items)
}

/// A source that completes without emitting.
pub fn empty<T>() -> Empty<T> {
    Empty {
        _types: PhantomData,
    }
}

/// A source that fails with `error` without emitting.
pub fn fail<T, E: Clone>(error: E) -> Fail<T, E> {
    Fail {
        error,
        _output: PhantomData,
    }
}

/// Publisher returned by [`just`].
pub type Just<T, E = Infallible> = Sequence<Once<T>, E>;

/// Publisher returned by [`sequence`].
///
/// Use [`Sequence::new`] to pick a failure type other than `Infallible`, for example
/// to join it with a fallible publisher.
pub struct Sequence<I, E = Infallible> {
    items: I,
    _failure: PhantomData<fn() -> E>,
}

impl<I, E> Sequence<I, E>
where
    I: IntoIterator + Clone,
{
    pub fn new(items: I) -> Self {
        Self {
            items,
            _failure: PhantomData,
        }
    }
}

impl<I, E> Publisher for Sequence<I, E>
where
    I: IntoIterator + Clone + Send + Sync,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
    E: Send + 'static,
{
    type Output = I::Item;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<I::Item, E>) {
        let subscription = Arc::new(SequenceSubscription {
            downstream: Downstream::new(subscriber),
            state: Mutex::new(SequenceState {
                remaining: Some(self.items.clone().into_iter().peekable()),
                demand: DemandTracker::new(),
                draining: false,
            }),
        });
        subscription
            .downstream
            .on_subscribe(Arc::clone(&subscription) as Arc<dyn Subscription>);
        // Completes an exhausted iterator without waiting for demand.
        subscription.resume(Demand::NONE);
    }
}

struct SequenceState<I: Iterator> {
    /// `None` once exhausted or cancelled.
    remaining: Option<Peekable<I>>,
    demand: DemandTracker,
    draining: bool,
}

struct SequenceSubscription<I: Iterator, E> {
    downstream: Downstream<I::Item, E>,
    state: Mutex<SequenceState<I>>,
}

impl<I: Iterator, E> SequenceSubscription<I, E> {
    /// Adds demand and drains, unless a drain is already running further up this
    /// thread's stack or on another thread; that drain picks up the new demand.
    fn resume(&self, demand: Demand) {
        {
            let mut state = self.state.lock();
            if state.remaining.is_none() {
                return;
            }
            state.demand.request(demand);
            if state.draining {
                return;
            }
            state.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let next = {
                let mut guard = self.state.lock();
                let state = &mut *guard;
                let Some(items) = state.remaining.as_mut() else {
                    state.draining = false;
                    return;
                };
                let has_next = items.peek().is_some();
                if has_next && !state.demand.consume_one() {
                    state.draining = false;
                    return;
                }
                let next = items.next();
                if next.is_none() {
                    state.remaining = None;
                    state.draining = false;
                }
                next
            };

            let Some(value) = next else {
                self.downstream.finish(Terminal::Completed);
                return;
            };

            if let Some(additional) = self.downstream.send(value) {
                if additional.has_demand() {
                    self.state.lock().demand.request(additional);
                }
            }
        }
    }
}

impl<I, E> Subscription for SequenceSubscription<I, E>
where
    I: Iterator + Send,
    I::Item: Send,
    E: Send,
{
    fn request(&self, demand: Demand) {
        self.resume(demand);
    }

    fn cancel(&self) {
        let remaining = self.state.lock().remaining.take();
        drop(remaining);
        self.downstream.cancel();
    }
}

/// Publisher returned by [`empty`].
pub struct Empty<T, E = Infallible> {
    _types: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Publisher for Empty<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        let downstream = Downstream::new(subscriber);
        downstream.on_subscribe(Arc::new(EmptySubscription));
        downstream.finish(Terminal::Completed);
    }
}

/// Publisher returned by [`fail`].
pub struct Fail<T, E> {
    error: E,
    _output: PhantomData<fn() -> T>,
}

impl<T, E> Publisher for Fail<T, E>
where
    T: Send + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        let downstream = Downstream::new(subscriber);
        downstream.on_subscribe(Arc::new(EmptySubscription));
        downstream.finish(Terminal::Failed(self.error.clone()));
    }
}
