// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tether_core::{
    Demand, Publisher, Subscriber, SubscriberRef, Subscription, SubscriptionRef, Terminal,
};

/// Protocol calls observed by a [`Probe`].
#[derive(Debug, Default)]
pub struct ProbeStats {
    subscribes: AtomicUsize,
    cancels: AtomicUsize,
    requests: Mutex<Vec<Demand>>,
}

impl ProbeStats {
    /// Number of subscriptions made through the probe.
    pub fn subscribe_count(&self) -> usize {
        self.subscribes.load(Ordering::SeqCst)
    }

    /// Number of `cancel` calls that reached the wrapped publisher.
    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Every demand requested from the wrapped publisher, in call order.
    pub fn requests(&self) -> Vec<Demand> {
        self.requests.lock().clone()
    }
}

/// A publisher wrapper that records subscribe, request and cancel calls.
pub struct Probe<P> {
    inner: P,
    stats: Arc<ProbeStats>,
}

/// Wraps `publisher` in a [`Probe`] and returns the shared statistics.
pub fn probe<P: Publisher>(publisher: P) -> (Probe<P>, Arc<ProbeStats>) {
    let stats = Arc::new(ProbeStats::default());
    let probe = Probe {
        inner: publisher,
        stats: Arc::clone(&stats),
    };
    (probe, stats)
}

impl<P: Publisher> Publisher for Probe<P> {
    type Output = P::Output;
    type Failure = P::Failure;

    fn subscribe(&self, subscriber: SubscriberRef<P::Output, P::Failure>) {
        self.stats.subscribes.fetch_add(1, Ordering::SeqCst);
        self.inner.subscribe(Arc::new(ProbeSubscriber {
            downstream: subscriber,
            stats: Arc::clone(&self.stats),
        }));
    }
}

struct ProbeSubscriber<T, E> {
    downstream: SubscriberRef<T, E>,
    stats: Arc<ProbeStats>,
}

impl<T, E> Subscriber for ProbeSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.downstream.on_subscribe(Arc::new(ProbeSubscription {
            upstream: subscription,
            stats: Arc::clone(&self.stats),
        }));
    }

    fn on_next(&self, value: T) -> Demand {
        self.downstream.on_next(value)
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.downstream.on_terminal(terminal);
    }
}

struct ProbeSubscription {
    upstream: SubscriptionRef,
    stats: Arc<ProbeStats>,
}

impl Subscription for ProbeSubscription {
    fn request(&self, demand: Demand) {
        self.stats.requests.lock().push(demand);
        self.upstream.request(demand);
    }

    fn cancel(&self) {
        self.stats.cancels.fetch_add(1, Ordering::SeqCst);
        self.upstream.cancel();
    }
}
