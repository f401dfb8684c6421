// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tether_core::{Demand, Subscriber, SubscriptionRef, Terminal};

/// A subscriber that records every event it receives.
///
/// The test keeps an `Arc` to the subscriber, hands a clone to the publisher and
/// then drives demand with [`request`](TestSubscriber::request) and teardown with
/// [`cancel`](TestSubscriber::cancel).
pub struct TestSubscriber<T, E> {
    initial_demand: Demand,
    cancel_after: Option<usize>,
    retain_subscription: bool,
    subscription: Mutex<Option<SubscriptionRef>>,
    values: Mutex<Vec<T>>,
    terminal: Mutex<Option<Terminal<E>>>,
    subscribe_count: AtomicUsize,
    terminal_count: AtomicUsize,
}

impl<T, E> TestSubscriber<T, E> {
    /// A subscriber requesting unbounded demand on subscription.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_demand(Demand::Unbounded)
    }

    /// A subscriber requesting `demand` on subscription and nothing afterwards.
    #[must_use]
    pub fn with_demand(demand: Demand) -> Arc<Self> {
        Arc::new(Self::build(demand, None))
    }

    /// A subscriber requesting unbounded demand that drops the subscription handle
    /// right after `on_subscribe`, so [`request`](TestSubscriber::request) and
    /// [`cancel`](TestSubscriber::cancel) do nothing.
    #[must_use]
    pub fn detached() -> Arc<Self> {
        let mut subscriber = Self::build(Demand::Unbounded, None);
        subscriber.retain_subscription = false;
        Arc::new(subscriber)
    }

    /// A subscriber with unbounded demand that cancels from inside `on_next` once it
    /// has received `count` values.
    #[must_use]
    pub fn cancelling_after(count: usize) -> Arc<Self> {
        Arc::new(Self::build(Demand::Unbounded, Some(count)))
    }

    fn build(initial_demand: Demand, cancel_after: Option<usize>) -> Self {
        Self {
            initial_demand,
            cancel_after,
            retain_subscription: true,
            subscription: Mutex::new(None),
            values: Mutex::new(Vec::new()),
            terminal: Mutex::new(None),
            subscribe_count: AtomicUsize::new(0),
            terminal_count: AtomicUsize::new(0),
        }
    }

    /// Requests more values through the stored subscription.
    pub fn request(&self, demand: Demand) {
        let subscription = self.subscription.lock().clone();
        if let Some(subscription) = subscription {
            subscription.request(demand);
        }
    }

    /// Cancels the stored subscription. The handle is kept, so repeated calls reach
    /// the publisher again.
    pub fn cancel(&self) {
        let subscription = self.subscription.lock().clone();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }

    /// Returns a copy of the values received so far.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.lock().clone()
    }

    /// Number of values received so far.
    pub fn value_count(&self) -> usize {
        self.values.lock().len()
    }

    /// Returns the terminal event, if one arrived.
    pub fn terminal(&self) -> Option<Terminal<E>>
    where
        E: Clone,
    {
        self.terminal.lock().clone()
    }

    /// Returns `true` if the sequence completed normally.
    pub fn is_completed(&self) -> bool {
        matches!(*self.terminal.lock(), Some(Terminal::Completed))
    }

    /// Returns `true` if the sequence failed.
    pub fn is_failed(&self) -> bool {
        matches!(*self.terminal.lock(), Some(Terminal::Failed(_)))
    }

    /// Returns `true` if any terminal event arrived.
    pub fn is_terminated(&self) -> bool {
        self.terminal.lock().is_some()
    }

    /// Number of `on_subscribe` calls received.
    pub fn subscribe_count(&self) -> usize {
        self.subscribe_count.load(Ordering::SeqCst)
    }

    /// Number of `on_terminal` calls received.
    pub fn terminal_count(&self) -> usize {
        self.terminal_count.load(Ordering::SeqCst)
    }
}

impl<T, E> Subscriber for TestSubscriber<T, E>
where
    T: Send,
    E: Send,
{
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.subscribe_count.fetch_add(1, Ordering::SeqCst);
        if self.retain_subscription {
            *self.subscription.lock() = Some(Arc::clone(&subscription));
        }
        if self.initial_demand.has_demand() {
            subscription.request(self.initial_demand);
        }
    }

    fn on_next(&self, value: T) -> Demand {
        let received = {
            let mut values = self.values.lock();
            values.push(value);
            values.len()
        };
        if self.cancel_after == Some(received) {
            self.cancel();
        }
        Demand::NONE
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.terminal_count.fetch_add(1, Ordering::SeqCst);
        *self.terminal.lock() = Some(terminal);
    }
}
